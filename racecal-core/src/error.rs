//! Error types for racecal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating a calendar.
#[derive(Error, Debug)]
pub enum RaceCalError {
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid date/time: {0}")]
    Format(String),

    #[error("Unknown timezone: {0}")]
    Timezone(String),

    #[error("Record '{record}' is missing required field '{field}'")]
    MissingField { record: String, field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for racecal operations.
pub type RaceCalResult<T> = Result<T, RaceCalError>;
