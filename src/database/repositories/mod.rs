//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod gamer;
pub mod game;
pub mod event;

// Re-export repositories
pub use gamer::GamerRepository;
pub use game::GameRepository;
pub use event::EventRepository;
