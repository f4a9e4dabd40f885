//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the LevelUp application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{ErrorSeverity, LevelUpError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer when dropped, so the caller
/// must keep it alive for as long as it logs.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| LevelUpError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log event management actions
pub fn log_event_action(event_id: i64, action: &str, gamer_id: i64, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        gamer_id = gamer_id,
        details = details,
        "Event action performed"
    );
}

/// Log a failed access-layer operation at the level its severity calls for
pub fn log_operation_failure(operation: &str, user_ref: &str, error: &LevelUpError) {
    let status = error.status_code();
    match error.severity() {
        ErrorSeverity::Info => debug!(operation = operation, user_ref = user_ref, status = status, error = %error, "Operation rejected"),
        ErrorSeverity::Warning => warn!(operation = operation, user_ref = user_ref, status = status, error = %error, "Operation refused"),
        ErrorSeverity::Error | ErrorSeverity::Critical => error!(operation = operation, user_ref = user_ref, status = status, error = %error, "Operation failed"),
    }
}

/// Log attendee set changes
pub fn log_roster_change(event_id: i64, gamer_id: i64, joined: bool, changed: bool) {
    debug!(
        event_id = event_id,
        gamer_id = gamer_id,
        joined = joined,
        changed = changed,
        "Roster updated"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
