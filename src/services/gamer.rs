//! Gamer directory service
//!
//! Provisions and looks up gamer profiles keyed by external identity.

use tracing::{info, debug};
use crate::database::repositories::GamerRepository;
use crate::models::gamer::{Gamer, CreateGamerRequest};
use crate::utils::errors::{LevelUpError, Result};

/// Gamer service for managing profiles
#[derive(Clone)]
pub struct GamerService {
    gamer_repository: GamerRepository,
}

impl GamerService {
    /// Create a new GamerService instance
    pub fn new(gamer_repository: GamerRepository) -> Self {
        Self { gamer_repository }
    }

    /// Register a new gamer or get the existing profile for the identity
    pub async fn register_or_get(&self, request: CreateGamerRequest) -> Result<Gamer> {
        if request.user_ref.trim().is_empty() {
            return Err(LevelUpError::Validation("user_ref must not be empty".to_string()));
        }

        debug!(user_ref = %request.user_ref, "Registering or fetching gamer");
        let gamer = self.gamer_repository.create_if_absent(request).await?;
        info!(gamer_id = gamer.id, user_ref = %gamer.user_ref, name = %gamer.full_name(), "Gamer profile ready");

        Ok(gamer)
    }

    /// Get gamer by identity handle
    pub async fn get_by_user_ref(&self, user_ref: &str) -> Result<Option<Gamer>> {
        debug!(user_ref = %user_ref, "Getting gamer by identity");
        self.gamer_repository.find_by_user_ref(user_ref).await
    }

    /// Get gamer by ID
    pub async fn get_gamer(&self, gamer_id: i64) -> Result<Gamer> {
        self.gamer_repository.find_by_id(gamer_id).await?
            .ok_or(LevelUpError::GamerNotFound { gamer_id })
    }

    /// Remove a gamer with everything they own, organize or attend
    pub async fn remove_gamer(&self, gamer_id: i64) -> Result<()> {
        self.gamer_repository.delete(gamer_id).await?;
        info!(gamer_id = gamer_id, "Gamer removed");
        Ok(())
    }
}
