//! Tracing subscriber set-up for hosts embedding the board.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `kanban_board=debug`.
pub const LOG_ENV: &str = "KANBAN_LOG";

/// Error returned when a global subscriber cannot be installed.
#[derive(Debug, Error)]
#[error("failed to initialise tracing subscriber: {0}")]
pub struct TelemetryError(String);

/// Installs a formatted subscriber filtered by [`LOG_ENV`], falling back to
/// `default_level` when the variable is unset or invalid.
///
/// # Errors
///
/// Returns [`TelemetryError`] when a global subscriber is already set.
pub fn init_tracing(default_level: &str) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| TelemetryError(err.to_string()))
}
