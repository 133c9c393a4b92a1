use std::result::Result as StdResult;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error type shared by the engine, configuration and CLI layers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid range: start {start} must be before end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

pub type Result<T> = StdResult<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
