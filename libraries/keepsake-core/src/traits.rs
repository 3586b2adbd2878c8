/// Core traits for Keepsake
use crate::error::Result;
use crate::types::AudioHandle;
use async_trait::async_trait;

/// Platform audio capability
///
/// Implementers wrap the host's audio primitive (AVFoundation, ExoPlayer,
/// a desktop mixer, or a test double). The slideshow engine only ever talks
/// to audio through this trait and never holds platform state of its own.
///
/// Handles are single-owner: `release` consumes the handle, and the engine
/// guarantees every handle returned by `load` is eventually passed to
/// `release` exactly once.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Load the audio resource behind `uri` and return a playable handle
    ///
    /// # Errors
    /// Returns an error if the resource cannot be resolved or decoded
    async fn load(&self, uri: &str) -> Result<AudioHandle>;

    /// Start or resume playback of a loaded handle
    fn play(&self, handle: &AudioHandle) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&self, handle: &AudioHandle) -> Result<()>;

    /// Stop playback and rewind to the start
    fn stop(&self, handle: &AudioHandle) -> Result<()>;

    /// Free the platform resources behind `handle`
    fn release(&self, handle: AudioHandle);
}
