//! Error handling for LevelUp
//!
//! This module defines the main error type used throughout the application
//! and the structured response it is translated into at the access boundary.

use serde::Serialize;
use thiserror::Error;

/// Main error type for LevelUp application
#[derive(Error, Debug)]
pub enum LevelUpError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gamer not found: {gamer_id}")]
    GamerNotFound { gamer_id: i64 },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: i64 },

    #[error("Game type not found: {game_type_id}")]
    GameTypeNotFound { game_type_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for LevelUp operations
pub type Result<T> = std::result::Result<T, LevelUpError>;

impl LevelUpError {
    /// Check whether the error means a referenced id did not resolve
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LevelUpError::GamerNotFound { .. }
                | LevelUpError::GameNotFound { .. }
                | LevelUpError::GameTypeNotFound { .. }
                | LevelUpError::EventNotFound { .. }
        )
    }

    /// HTTP status code the access boundary reports for this error
    pub fn status_code(&self) -> u16 {
        match self {
            e if e.is_not_found() => 404,
            LevelUpError::Validation(_) => 400,
            LevelUpError::Authorization(_) => 401,
            LevelUpError::PermissionDenied(_) => 403,
            _ => 500,
        }
    }

    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            e if e.is_not_found() => "not_found",
            LevelUpError::Validation(_) => "validation_error",
            LevelUpError::Authorization(_) => "authorization_error",
            LevelUpError::PermissionDenied(_) => "permission_denied",
            _ => "internal_error",
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LevelUpError::Database(_) => ErrorSeverity::Critical,
            LevelUpError::Migration(_) => ErrorSeverity::Critical,
            LevelUpError::Config(_) => ErrorSeverity::Critical,
            LevelUpError::PermissionDenied(_) => ErrorSeverity::Warning,
            LevelUpError::Authorization(_) => ErrorSeverity::Warning,
            LevelUpError::Validation(_) => ErrorSeverity::Info,
            e if e.is_not_found() => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Translate into the structured response handed back to the caller
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            status: self.status_code(),
            error: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Structured error body produced at the access boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = LevelUpError::EventNotFound { event_id: 9999 };
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.severity(), ErrorSeverity::Info);

        let response = err.to_response();
        assert_eq!(response.status, 404);
        assert_eq!(response.error, "not_found");
        assert_eq!(response.message, "Event not found: 9999");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(LevelUpError::Validation("bad date".into()).status_code(), 400);
        assert_eq!(LevelUpError::Authorization("no profile".into()).status_code(), 401);
        assert_eq!(LevelUpError::PermissionDenied("not yours".into()).status_code(), 403);
        assert_eq!(LevelUpError::GameNotFound { game_id: 1 }.status_code(), 404);
        assert_eq!(LevelUpError::Config("missing url".into()).status_code(), 500);
    }

    #[test]
    fn test_response_preserves_message() {
        let err = LevelUpError::Validation("description must not be empty".into());
        let body = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(body["status"], 400);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "Validation error: description must not be empty");
    }
}
