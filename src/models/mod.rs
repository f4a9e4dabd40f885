//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod gamer;
pub mod game;
pub mod event;

// Re-export commonly used models
pub use gamer::{Gamer, CreateGamerRequest};
pub use game::{Game, GameType, CreateGameRequest};
pub use event::{Event, EventView, EventPayload, ValidEventPayload, EventFilter};
