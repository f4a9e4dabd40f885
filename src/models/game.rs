//! Game catalog models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::utils::errors::{LevelUpError, Result};
use crate::utils::helpers::check_text_field;

pub const MAX_TITLE_LENGTH: usize = 50;
pub const MAX_MAKER_LENGTH: usize = 75;
pub const MAX_NUM_OF_PLAYERS_LENGTH: usize = 15;
pub const MAX_SKILL_LEVEL_LENGTH: usize = 50;
pub const MAX_GAME_TYPE_LABEL_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GameType {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub maker: String,
    pub num_of_players: String,
    pub skill_level: String,
    pub game_type_id: i64,
    pub gamer_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Game payload as supplied by a client; the owner comes from the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub title: String,
    pub maker: String,
    pub num_of_players: String,
    pub skill_level: String,
    pub game_type_id: i64,
}

impl CreateGameRequest {
    /// Check field presence and column lengths
    pub fn validate(&self) -> Result<()> {
        check_text_field("title", &self.title, MAX_TITLE_LENGTH)
            .and_then(|_| check_text_field("maker", &self.maker, MAX_MAKER_LENGTH))
            .and_then(|_| check_text_field("num_of_players", &self.num_of_players, MAX_NUM_OF_PLAYERS_LENGTH))
            .and_then(|_| check_text_field("skill_level", &self.skill_level, MAX_SKILL_LEVEL_LENGTH))
            .map_err(LevelUpError::Validation)
    }
}
