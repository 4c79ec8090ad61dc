use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum GestureError {
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Failed to decode perception frame: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
    #[error("The pipeline is closed.")]
    PipelineClosed,
    #[error("Pipeline runner failed: {0}")]
    Runner(String),
}
