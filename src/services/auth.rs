//! Authentication service implementation
//!
//! Identities are issued by an external provider and reach this crate as an
//! opaque handle. This service maps a handle to its gamer profile and
//! enforces ownership of gamer-owned records.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::database::repositories::GamerRepository;
use crate::models::Gamer;
use crate::utils::errors::{LevelUpError, Result};

/// Identity handed over by the external provider for the current request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_ref: String,
}

impl AuthenticatedUser {
    pub fn new(user_ref: impl Into<String>) -> Self {
        Self { user_ref: user_ref.into() }
    }
}

/// Authentication service for resolving callers and checking ownership
#[derive(Clone)]
pub struct AuthService {
    gamer_repository: GamerRepository,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(gamer_repository: GamerRepository) -> Self {
        Self { gamer_repository }
    }

    /// Resolve the caller's gamer profile
    pub async fn resolve_gamer(&self, user: &AuthenticatedUser) -> Result<Gamer> {
        if user.user_ref.trim().is_empty() {
            warn!("Request carried an empty identity handle");
            return Err(LevelUpError::Authorization(
                "authenticated identity is empty".to_string()
            ));
        }

        let gamer = self.gamer_repository.find_by_user_ref(&user.user_ref).await?
            .ok_or_else(|| {
                warn!(user_ref = %user.user_ref, "No gamer profile for authenticated identity");
                LevelUpError::Authorization(format!(
                    "no gamer profile for identity {}",
                    user.user_ref
                ))
            })?;

        debug!(user_ref = %user.user_ref, gamer_id = gamer.id, "Resolved caller");
        Ok(gamer)
    }

    /// Require that `caller` owns a record owned by `owner_id`
    pub fn require_owner(&self, caller: &Gamer, owner_id: i64, what: &str) -> Result<()> {
        if caller.id == owner_id {
            Ok(())
        } else {
            warn!(gamer_id = caller.id, owner_id = owner_id, what = what, "Ownership check failed");
            Err(LevelUpError::PermissionDenied(format!(
                "gamer {} does not own {}",
                caller.id, what
            )))
        }
    }
}
