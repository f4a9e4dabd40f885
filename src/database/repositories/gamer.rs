//! Gamer repository implementation

use sqlx::PgPool;
use crate::models::gamer::{Gamer, CreateGamerRequest};
use crate::utils::errors::LevelUpError;

#[derive(Debug, Clone)]
pub struct GamerRepository {
    pool: PgPool,
}

impl GamerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a gamer for the identity unless one exists, and return the stored profile
    pub async fn create_if_absent(&self, request: CreateGamerRequest) -> Result<Gamer, LevelUpError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO gamers (user_ref, first_name, last_name, bio)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_ref) DO NOTHING
            "#
        )
        .bind(&request.user_ref)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.bio)
        .execute(&mut *tx)
        .await?;

        let gamer = sqlx::query_as::<_, Gamer>(
            "SELECT id, user_ref, first_name, last_name, bio, created_at FROM gamers WHERE user_ref = $1"
        )
        .bind(&request.user_ref)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(gamer)
    }

    /// Find gamer by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Gamer>, LevelUpError> {
        let gamer = sqlx::query_as::<_, Gamer>(
            "SELECT id, user_ref, first_name, last_name, bio, created_at FROM gamers WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(gamer)
    }

    /// Find gamer by external identity handle
    pub async fn find_by_user_ref(&self, user_ref: &str) -> Result<Option<Gamer>, LevelUpError> {
        let gamer = sqlx::query_as::<_, Gamer>(
            "SELECT id, user_ref, first_name, last_name, bio, created_at FROM gamers WHERE user_ref = $1"
        )
        .bind(user_ref)
        .fetch_optional(&self.pool)
        .await?;

        Ok(gamer)
    }

    /// Delete gamer; owned games, organized events and memberships cascade
    pub async fn delete(&self, id: i64) -> Result<(), LevelUpError> {
        let result = sqlx::query("DELETE FROM gamers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LevelUpError::GamerNotFound { gamer_id: id });
        }

        Ok(())
    }

    /// Count total gamers
    pub async fn count(&self) -> Result<i64, LevelUpError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM gamers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
