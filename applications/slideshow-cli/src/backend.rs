//! Simulated audio output
//!
//! There is no sound device in a headless host. Tracks "load" after a fixed
//! delay and playback transitions are logged. `file://` URIs must point at an
//! existing file; other schemes are accepted as-is.

use async_trait::async_trait;
use keepsake_core::{AudioBackend, AudioHandle, KeepsakeError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

pub struct SimulatedBackend {
    load_delay: Duration,
    /// Live handles and the URI each was loaded from
    loaded: Mutex<HashMap<u64, String>>,
}

impl SimulatedBackend {
    pub fn new(load_delay: Duration) -> Self {
        Self {
            load_delay,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Number of handles not yet released
    pub fn live_handles(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, String>> {
        // Critical sections are single inserts/removes, so a poisoned map is still valid
        self.loaded.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn uri_of(&self, handle: &AudioHandle) -> Result<String> {
        self.lock()
            .get(&handle.id())
            .cloned()
            .ok_or(KeepsakeError::UnknownHandle(handle.id()))
    }
}

#[async_trait]
impl AudioBackend for SimulatedBackend {
    async fn load(&self, uri: &str) -> Result<AudioHandle> {
        debug!("Loading {}", uri);
        tokio::time::sleep(self.load_delay).await;

        if let Some(path) = uri.strip_prefix("file://") {
            let path = PathBuf::from(path);
            if !tokio::fs::try_exists(&path).await? {
                return Err(KeepsakeError::audio(format!(
                    "no such file: {}",
                    path.display()
                )));
            }
        }

        let handle = AudioHandle::generate();
        self.lock().insert(handle.id(), uri.to_string());
        Ok(handle)
    }

    fn play(&self, handle: &AudioHandle) -> Result<()> {
        info!("♪ Playing {}", self.uri_of(handle)?);
        Ok(())
    }

    fn pause(&self, handle: &AudioHandle) -> Result<()> {
        info!("♪ Paused {}", self.uri_of(handle)?);
        Ok(())
    }

    fn stop(&self, handle: &AudioHandle) -> Result<()> {
        info!("♪ Stopped {}", self.uri_of(handle)?);
        Ok(())
    }

    fn release(&self, handle: AudioHandle) {
        if let Some(uri) = self.lock().remove(&handle.id()) {
            debug!("Released {} ({})", handle, uri);
        }
    }
}
