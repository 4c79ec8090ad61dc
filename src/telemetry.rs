use crate::config::LoggingConfig;
use crate::error::GestureError;
use std::str::FromStr;
use tracing::Level;

/// Install the global fmt subscriber at the configured level.
///
/// Fails if the level does not parse or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), GestureError> {
    let level = parse_level(&config.level)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .map_err(|e| GestureError::Logging(e.to_string()))
}

pub fn parse_level(level: &str) -> Result<Level, GestureError> {
    Level::from_str(level.trim())
        .map_err(|_| GestureError::InvalidConfiguration(format!("Unknown log level: {}", level)))
}
