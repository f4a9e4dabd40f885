//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod event;
pub mod game;
pub mod gamer;

// Re-export commonly used services
pub use auth::{AuthService, AuthenticatedUser};
pub use event::{EventService, into_response, render};
pub use game::GameService;
pub use gamer::GamerService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub gamer_service: GamerService,
    pub game_service: GameService,
    pub event_service: EventService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: &DatabaseService) -> Self {
        let auth_service = AuthService::new(database.gamers.clone());
        let gamer_service = GamerService::new(database.gamers.clone());
        let game_service = GameService::new(database.games.clone(), auth_service.clone());
        let event_service = EventService::new(
            database.events.clone(),
            auth_service.clone(),
            settings.roster.max_description_length,
        );

        Self {
            auth_service,
            gamer_service,
            game_service,
            event_service,
        }
    }
}
