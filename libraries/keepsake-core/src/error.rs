/// Core error types for Keepsake
use thiserror::Error;

/// Result type alias using `KeepsakeError`
pub type Result<T> = std::result::Result<T, KeepsakeError>;

/// Core error type for Keepsake
#[derive(Error, Debug)]
pub enum KeepsakeError {
    /// Audio loading/playback errors reported by the platform backend
    #[error("Audio error: {0}")]
    Audio(String),

    /// The audio handle is no longer known to the backend
    #[error("Unknown audio handle: {0}")]
    UnknownHandle(u64),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl KeepsakeError {
    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
