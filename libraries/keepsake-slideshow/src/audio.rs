//! Background music track
//!
//! Owns at most one platform audio handle at a time. Loading runs as a
//! spawned task that reports back over a oneshot channel; dropping the
//! receiver is the cancellation signal, and a load that completes after
//! cancellation releases its handle instead of delivering it.

use keepsake_core::{AudioBackend, AudioHandle, KeepsakeError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Audio track state
#[derive(Debug, PartialEq, Eq)]
pub enum AudioTrackState {
    /// No track selected
    Idle,

    /// Waiting for the backend to load `uri`
    Loading { uri: String },

    /// Loaded, not playing
    Ready(AudioHandle),

    /// Playing
    Playing(AudioHandle),

    /// Paused mid-track
    Paused(AudioHandle),

    /// Load or playback failed; the slideshow keeps running without music
    Failed(String),
}

impl AudioTrackState {
    /// Handle currently owned, if any
    pub fn handle(&self) -> Option<&AudioHandle> {
        match self {
            Self::Ready(handle) | Self::Playing(handle) | Self::Paused(handle) => Some(handle),
            _ => None,
        }
    }

    /// Handle-free summary for events and UI
    pub fn status(&self) -> AudioStatus {
        match self {
            Self::Idle => AudioStatus::Idle,
            Self::Loading { .. } => AudioStatus::Loading,
            Self::Ready(_) => AudioStatus::Ready,
            Self::Playing(_) => AudioStatus::Playing,
            Self::Paused(_) => AudioStatus::Paused,
            Self::Failed(_) => AudioStatus::Failed,
        }
    }
}

/// Summary of `AudioTrackState` without the handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioStatus {
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Failed,
}

type LoadResult = keepsake_core::Result<AudioHandle>;

/// In-flight load
struct PendingLoad {
    uri: String,
    rx: oneshot::Receiver<LoadResult>,
}

/// Background music for one slideshow session
///
/// Play/pause here is independent of slide playback. Dropping the track
/// releases whatever it holds.
pub struct AudioTrack {
    backend: Arc<dyn AudioBackend>,
    state: AudioTrackState,
    pending: Option<PendingLoad>,
    autoplay: bool,
}

impl std::fmt::Debug for AudioTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioTrack")
            .field("state", &self.state)
            .field("loading", &self.pending.as_ref().map(|p| p.uri.as_str()))
            .field("autoplay", &self.autoplay)
            .finish_non_exhaustive()
    }
}

impl AudioTrack {
    /// Create an idle track
    ///
    /// With `autoplay` set, a track starts playing as soon as it loads.
    pub fn new(backend: Arc<dyn AudioBackend>, autoplay: bool) -> Self {
        Self {
            backend,
            state: AudioTrackState::Idle,
            pending: None,
            autoplay,
        }
    }

    /// Current state
    pub fn state(&self) -> &AudioTrackState {
        &self.state
    }

    /// Current status
    pub fn status(&self) -> AudioStatus {
        self.state.status()
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Select a new track
    ///
    /// Releases the current handle (and abandons any in-flight load) before
    /// starting to acquire the next one. Must be called inside a Tokio runtime.
    pub fn select_track(&mut self, uri: impl Into<String>) {
        let uri = uri.into();
        self.release();

        let (tx, rx) = oneshot::channel();
        let backend = Arc::clone(&self.backend);
        let task_uri = uri.clone();

        tokio::spawn(async move {
            let result = backend.load(&task_uri).await;
            if let Err(Ok(handle)) = tx.send(result) {
                debug!(
                    "Load of {} finished after cancellation, releasing {}",
                    task_uri, handle
                );
                backend.release(handle);
            }
        });

        debug!("Loading music track {}", uri);
        self.state = AudioTrackState::Loading { uri: uri.clone() };
        self.pending = Some(PendingLoad { uri, rx });
    }

    /// Wait for the in-flight load and apply its result
    ///
    /// Never completes when nothing is loading. Cancel-safe: dropping the
    /// future before it resolves leaves the load in flight.
    pub async fn complete_load(&mut self) -> AudioStatus {
        let result = match self.pending.as_mut() {
            Some(pending) => (&mut pending.rx).await,
            None => std::future::pending().await,
        };

        let uri = self.pending.take().map(|p| p.uri).unwrap_or_default();
        let result = result
            .unwrap_or_else(|_| Err(KeepsakeError::audio("load task ended without a result")));

        match result {
            Ok(handle) => {
                info!("Music track {} ready ({})", uri, handle);
                self.state = AudioTrackState::Ready(handle);
                if self.autoplay {
                    self.play();
                }
            }
            Err(e) => {
                warn!("Failed to load music track {}: {}", uri, e);
                self.state = AudioTrackState::Failed(e.to_string());
            }
        }

        self.status()
    }

    /// Start or resume the loaded track; no-op without a handle
    pub fn play(&mut self) {
        match self.take_state() {
            AudioTrackState::Ready(handle) | AudioTrackState::Paused(handle) => {
                match self.backend.play(&handle) {
                    Ok(()) => self.state = AudioTrackState::Playing(handle),
                    Err(e) => self.fail("play", handle, e),
                }
            }
            other => self.state = other,
        }
    }

    /// Pause the playing track; no-op otherwise
    pub fn pause(&mut self) {
        match self.take_state() {
            AudioTrackState::Playing(handle) => match self.backend.pause(&handle) {
                Ok(()) => self.state = AudioTrackState::Paused(handle),
                Err(e) => self.fail("pause", handle, e),
            },
            other => self.state = other,
        }
    }

    /// Stop and rewind, keeping the track loaded; no-op without a handle
    pub fn stop(&mut self) {
        match self.take_state() {
            AudioTrackState::Playing(handle) | AudioTrackState::Paused(handle) => {
                match self.backend.stop(&handle) {
                    Ok(()) => self.state = AudioTrackState::Ready(handle),
                    Err(e) => self.fail("stop", handle, e),
                }
            }
            other => self.state = other,
        }
    }

    /// Pause when playing, play otherwise
    pub fn toggle(&mut self) {
        if matches!(self.state, AudioTrackState::Playing(_)) {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Release the handle and abandon any in-flight load
    pub fn release(&mut self) {
        if let Some(mut pending) = self.pending.take() {
            debug!("Abandoning load of {}", pending.uri);
            // After close() a late send fails and the task releases; a result
            // already delivered is still ours to release
            pending.rx.close();
            if let Ok(Ok(handle)) = pending.rx.try_recv() {
                debug!("Releasing uncollected {}", handle);
                self.backend.release(handle);
            }
        }

        if let Some(handle) = self.take_state().into_handle() {
            debug!("Releasing {}", handle);
            self.backend.release(handle);
        }
    }

    fn take_state(&mut self) -> AudioTrackState {
        std::mem::replace(&mut self.state, AudioTrackState::Idle)
    }

    fn fail(&mut self, op: &str, handle: AudioHandle, error: KeepsakeError) {
        warn!("Music {} failed on {}: {}", op, handle, error);
        self.backend.release(handle);
        self.state = AudioTrackState::Failed(error.to_string());
    }
}

impl AudioTrackState {
    fn into_handle(self) -> Option<AudioHandle> {
        match self {
            Self::Ready(handle) | Self::Playing(handle) | Self::Paused(handle) => Some(handle),
            _ => None,
        }
    }
}

impl Drop for AudioTrack {
    fn drop(&mut self) {
        self.release();
    }
}
