//! Event model
//!
//! `Event` mirrors the stored row. `EventView` is the per-request read model:
//! the stored columns plus the attendee set and the fields derived for the
//! requesting gamer, filled in by the aggregate queries in the event
//! repository and never written back.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::utils::errors::{LevelUpError, Result};
use crate::utils::helpers::{check_text_field, parse_timestamp};

/// Column limit of `events.description`
pub const MAX_DESCRIPTION_LENGTH: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub description: String,
    pub date: DateTime<Utc>,
    pub game_id: i64,
    pub organizer_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_organized_by(&self, gamer_id: i64) -> bool {
        self.organizer_id == gamer_id
    }
}

/// Event as seen by one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventView {
    pub id: i64,
    pub description: String,
    pub date: DateTime<Utc>,
    pub game_id: i64,
    pub organizer_id: i64,
    /// Attendee gamer ids, ascending
    pub attendees: Vec<i64>,
    pub attendee_count: i64,
    /// `None` when the view was built without a viewer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined: Option<bool>,
}

/// Create/update body as supplied by a client
///
/// Carries no organizer: the organizer is always the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPayload {
    pub description: String,
    pub date: String,
    #[serde(alias = "gameId", alias = "game")]
    pub game_id: i64,
}

/// Payload that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEventPayload {
    pub description: String,
    pub date: DateTime<Utc>,
    pub game_id: i64,
}

impl EventPayload {
    pub fn new(description: impl Into<String>, date: impl Into<String>, game_id: i64) -> Self {
        Self {
            description: description.into(),
            date: date.into(),
            game_id,
        }
    }

    /// Validate the payload against the description limit and parse the date
    ///
    /// The game id is not checked here; an id that does not resolve is a
    /// `GameNotFound` from the repository.
    pub fn validate(&self, max_description_length: usize) -> Result<ValidEventPayload> {
        check_text_field("description", &self.description, max_description_length)
            .map_err(LevelUpError::Validation)?;

        let date = parse_timestamp(&self.date).ok_or_else(|| {
            LevelUpError::Validation(format!("date '{}' is not a valid timestamp", self.date))
        })?;

        Ok(ValidEventPayload {
            description: self.description.clone(),
            date,
            game_id: self.game_id,
        })
    }
}

/// Restrictions applied when listing events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(alias = "game")]
    pub game_id: Option<i64>,
    #[serde(alias = "organizer")]
    pub organizer_id: Option<i64>,
}

impl EventFilter {
    pub fn by_game(game_id: i64) -> Self {
        Self { game_id: Some(game_id), ..Self::default() }
    }

    pub fn by_organizer(organizer_id: i64) -> Self {
        Self { organizer_id: Some(organizer_id), ..Self::default() }
    }
}
