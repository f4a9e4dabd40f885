//! Game catalog repository implementation

use sqlx::PgPool;
use crate::models::game::{Game, GameType, CreateGameRequest};
use crate::utils::errors::LevelUpError;

#[derive(Debug, Clone)]
pub struct GameRepository {
    pool: PgPool,
}

impl GameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a game type unless the label exists, and return the stored row
    pub async fn create_game_type(&self, label: &str) -> Result<GameType, LevelUpError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO game_types (label) VALUES ($1) ON CONFLICT (label) DO NOTHING")
            .bind(label)
            .execute(&mut *tx)
            .await?;

        let game_type = sqlx::query_as::<_, GameType>(
            "SELECT id, label FROM game_types WHERE label = $1"
        )
        .bind(label)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(game_type)
    }

    /// Find game type by ID
    pub async fn find_game_type(&self, id: i64) -> Result<Option<GameType>, LevelUpError> {
        let game_type = sqlx::query_as::<_, GameType>(
            "SELECT id, label FROM game_types WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game_type)
    }

    /// List all game types
    pub async fn list_game_types(&self) -> Result<Vec<GameType>, LevelUpError> {
        let game_types = sqlx::query_as::<_, GameType>(
            "SELECT id, label FROM game_types ORDER BY id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(game_types)
    }

    /// Create a new game owned by `gamer_id`
    pub async fn create(&self, request: CreateGameRequest, gamer_id: i64) -> Result<Game, LevelUpError> {
        let game = sqlx::query_as::<_, Game>(
            r#"
            INSERT INTO games (title, maker, num_of_players, skill_level, game_type_id, gamer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, maker, num_of_players, skill_level, game_type_id, gamer_id, created_at
            "#
        )
        .bind(request.title)
        .bind(request.maker)
        .bind(request.num_of_players)
        .bind(request.skill_level)
        .bind(request.game_type_id)
        .bind(gamer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(game)
    }

    /// Find game by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Game>, LevelUpError> {
        let game = sqlx::query_as::<_, Game>(
            "SELECT id, title, maker, num_of_players, skill_level, game_type_id, gamer_id, created_at FROM games WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    /// List games, optionally of one type
    pub async fn list(&self, game_type_id: Option<i64>) -> Result<Vec<Game>, LevelUpError> {
        let games = sqlx::query_as::<_, Game>(
            r#"
            SELECT id, title, maker, num_of_players, skill_level, game_type_id, gamer_id, created_at
            FROM games
            WHERE ($1::BIGINT IS NULL OR game_type_id = $1)
            ORDER BY id ASC
            "#
        )
        .bind(game_type_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    /// Delete game; events played with it cascade
    pub async fn delete(&self, id: i64) -> Result<(), LevelUpError> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LevelUpError::GameNotFound { game_id: id });
        }

        Ok(())
    }

    /// Count total games
    pub async fn count(&self) -> Result<i64, LevelUpError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM games")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
