//! LevelUp event roster backend
//!
//! Gamers own games, organize events around them, and join or leave each
//! other's events. This library provides the game catalog, the gamer
//! directory, and the event roster with its per-viewer read model.

pub mod config;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{LevelUpError, Result, ErrorResponse};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::{ServiceFactory, AuthenticatedUser};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
