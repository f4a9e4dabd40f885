//! Event repository implementation
//!
//! Owns events and their attendee sets. Every read returns an `EventView`
//! built by one grouped query: the attendee ids, their count and the
//! viewer's membership are aggregated over a `LEFT JOIN` of
//! `event_attendees`, so listing N events costs one round trip.
//! Mutations run in a single transaction each.

use std::time::Instant;
use sqlx::{PgExecutor, PgPool};
use crate::models::event::{Event, EventView, EventFilter, ValidEventPayload};
use crate::utils::errors::LevelUpError;
use crate::utils::logging::log_database_operation;

/// `$1` is the viewer id (nullable); filters start at `$2`.
const VIEW_SELECT: &str = r#"
    SELECT e.id, e.description, e.date, e.game_id, e.organizer_id,
           COALESCE(
               ARRAY_AGG(ea.gamer_id ORDER BY ea.gamer_id) FILTER (WHERE ea.gamer_id IS NOT NULL),
               '{}'::BIGINT[]
           ) AS attendees,
           COUNT(ea.gamer_id) AS attendee_count,
           CASE WHEN $1::BIGINT IS NULL THEN NULL
                ELSE COALESCE(BOOL_OR(ea.gamer_id = $1::BIGINT), FALSE)
           END AS joined
    FROM events e
    LEFT JOIN event_attendees ea ON ea.event_id = e.id
"#;

const VIEW_GROUPING: &str = "GROUP BY e.id ORDER BY e.id ASC";

fn view_query(condition: &str) -> String {
    format!("{} WHERE {} {}", VIEW_SELECT, condition, VIEW_GROUPING)
}

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load one event as seen by `viewer`
    pub async fn retrieve(&self, event_id: i64, viewer: Option<i64>) -> Result<EventView, LevelUpError> {
        fetch_view(&self.pool, event_id, viewer)
            .await?
            .ok_or(LevelUpError::EventNotFound { event_id })
    }

    /// List events as seen by `viewer`, in id order
    pub async fn list(&self, viewer: Option<i64>, filter: EventFilter) -> Result<Vec<EventView>, LevelUpError> {
        let started = Instant::now();
        let sql = view_query(
            "($2::BIGINT IS NULL OR e.game_id = $2) AND ($3::BIGINT IS NULL OR e.organizer_id = $3)",
        );

        let result = sqlx::query_as::<_, EventView>(&sql)
            .bind(viewer)
            .bind(filter.game_id)
            .bind(filter.organizer_id)
            .fetch_all(&self.pool)
            .await;

        log_database_operation("list", "events", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?)
    }

    /// List the events `gamer_id` attends
    pub async fn list_joined(&self, gamer_id: i64) -> Result<Vec<EventView>, LevelUpError> {
        let sql = view_query(
            "EXISTS (SELECT 1 FROM event_attendees m WHERE m.event_id = e.id AND m.gamer_id = $1::BIGINT)",
        );

        let events = sqlx::query_as::<_, EventView>(&sql)
            .bind(Some(gamer_id))
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    /// Find the stored event row by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, LevelUpError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, description, date, game_id, organizer_id, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Create an event organized by `organizer_id`, who becomes its first attendee
    pub async fn create(&self, payload: ValidEventPayload, organizer_id: i64) -> Result<EventView, LevelUpError> {
        let mut tx = self.pool.begin().await?;

        ensure_game_exists(&mut *tx, payload.game_id).await?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (description, date, game_id, organizer_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, description, date, game_id, organizer_id, created_at, updated_at
            "#
        )
        .bind(payload.description)
        .bind(payload.date)
        .bind(payload.game_id)
        .bind(organizer_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO event_attendees (event_id, gamer_id) VALUES ($1, $2)")
            .bind(event.id)
            .bind(organizer_id)
            .execute(&mut *tx)
            .await?;

        let view = fetch_view(&mut *tx, event.id, Some(organizer_id))
            .await?
            .ok_or(LevelUpError::EventNotFound { event_id: event.id })?;

        tx.commit().await?;
        Ok(view)
    }

    /// Replace description, date and game; only the organizer may do this
    pub async fn update(&self, event_id: i64, payload: ValidEventPayload, caller_id: i64) -> Result<(), LevelUpError> {
        let mut tx = self.pool.begin().await?;

        let event = lock_event(&mut *tx, event_id).await?;
        ensure_organizer(&event, caller_id, "update")?;
        ensure_game_exists(&mut *tx, payload.game_id).await?;

        sqlx::query(
            r#"
            UPDATE events
            SET description = $2,
                date = $3,
                game_id = $4,
                updated_at = NOW()
            WHERE id = $1
            "#
        )
        .bind(event_id)
        .bind(payload.description)
        .bind(payload.date)
        .bind(payload.game_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete an event and its attendee rows; only the organizer may do this
    pub async fn destroy(&self, event_id: i64, caller_id: i64) -> Result<(), LevelUpError> {
        let mut tx = self.pool.begin().await?;

        let event = lock_event(&mut *tx, event_id).await?;
        ensure_organizer(&event, caller_id, "delete")?;

        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Add `gamer_id` to the attendee set; returns whether the set changed
    pub async fn signup(&self, event_id: i64, gamer_id: i64) -> Result<bool, LevelUpError> {
        let mut tx = self.pool.begin().await?;

        ensure_event_exists(&mut *tx, event_id).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO event_attendees (event_id, gamer_id)
            VALUES ($1, $2)
            ON CONFLICT (event_id, gamer_id) DO NOTHING
            "#
        )
        .bind(event_id)
        .bind(gamer_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove `gamer_id` from the attendee set; returns whether the set changed
    pub async fn leave(&self, event_id: i64, gamer_id: i64) -> Result<bool, LevelUpError> {
        let mut tx = self.pool.begin().await?;

        ensure_event_exists(&mut *tx, event_id).await?;

        let result = sqlx::query("DELETE FROM event_attendees WHERE event_id = $1 AND gamer_id = $2")
            .bind(event_id)
            .bind(gamer_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, LevelUpError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

async fn fetch_view<'e, E>(executor: E, event_id: i64, viewer: Option<i64>) -> Result<Option<EventView>, LevelUpError>
where
    E: PgExecutor<'e>,
{
    let sql = view_query("e.id = $2");

    let view = sqlx::query_as::<_, EventView>(&sql)
        .bind(viewer)
        .bind(event_id)
        .fetch_optional(executor)
        .await?;

    Ok(view)
}

/// Lock the event row for the rest of the transaction
async fn lock_event<'e, E>(executor: E, event_id: i64) -> Result<Event, LevelUpError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Event>(
        "SELECT id, description, date, game_id, organizer_id, created_at, updated_at FROM events WHERE id = $1 FOR UPDATE"
    )
    .bind(event_id)
    .fetch_optional(executor)
    .await?
    .ok_or(LevelUpError::EventNotFound { event_id })
}

/// Share-lock the event row so it cannot be deleted under a roster change
async fn ensure_event_exists<'e, E>(executor: E, event_id: i64) -> Result<(), LevelUpError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>("SELECT id FROM events WHERE id = $1 FOR SHARE")
        .bind(event_id)
        .fetch_optional(executor)
        .await?
        .map(|_| ())
        .ok_or(LevelUpError::EventNotFound { event_id })
}

async fn ensure_game_exists<'e, E>(executor: E, game_id: i64) -> Result<(), LevelUpError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>("SELECT id FROM games WHERE id = $1 FOR SHARE")
        .bind(game_id)
        .fetch_optional(executor)
        .await?
        .map(|_| ())
        .ok_or(LevelUpError::GameNotFound { game_id })
}

fn ensure_organizer(event: &Event, caller_id: i64, action: &str) -> Result<(), LevelUpError> {
    if event.is_organized_by(caller_id) {
        Ok(())
    } else {
        Err(LevelUpError::PermissionDenied(format!(
            "only the organizer may {} event {}",
            action, event.id
        )))
    }
}
