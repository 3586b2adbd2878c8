//! Error types for slideshow playback

use thiserror::Error;

/// Slideshow errors
#[derive(Debug, Error)]
pub enum SlideshowError {
    /// Requested slide does not exist
    #[error("Index out of bounds: {index} (total slides: {total})")]
    IndexOutOfBounds { index: usize, total: usize },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from the shared core crate
    #[error(transparent)]
    Core(#[from] keepsake_core::KeepsakeError),
}

/// Result type for slideshow operations
pub type Result<T> = std::result::Result<T, SlideshowError>;
