//! Database service layer
//!
//! This module bundles the repositories around one shared pool

use serde::Serialize;
use crate::database::{DatabasePool, GamerRepository, GameRepository, EventRepository};
use crate::utils::errors::LevelUpError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub gamers: GamerRepository,
    pub games: GameRepository,
    pub events: EventRepository,
    pool: DatabasePool,
}

/// Row counts across the catalog and roster tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub gamers: i64,
    pub games: i64,
    pub events: i64,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            gamers: GamerRepository::new(pool.clone()),
            games: GameRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Get system statistics
    pub async fn get_stats(&self) -> Result<CatalogStats, LevelUpError> {
        Ok(CatalogStats {
            gamers: self.gamers.count().await?,
            games: self.games.count().await?,
            events: self.events.count().await?,
        })
    }
}
