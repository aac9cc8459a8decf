//! Error types for bigtimer.

use thiserror::Error;

/// Errors that can occur in bigtimer.
#[derive(Debug, Error)]
pub enum BigTimerError {
    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key-value database could not be opened, read or written.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A persisted value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The live status surface rejected a request.
    #[error("Presentation error: {0}")]
    Presentation(String),
}

impl From<rusqlite::Error> for BigTimerError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl BigTimerError {
    /// Exit code for the binary.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::NotFound(_) => 3,
            _ => 1,
        }
    }
}
