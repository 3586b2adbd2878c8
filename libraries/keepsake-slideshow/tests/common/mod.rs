//! Shared test helpers

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use keepsake_core::{AudioBackend, AudioHandle, KeepsakeError, MemoryEntry, MemoryRecord};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One call observed by the mock backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load(String),
    Play(u64),
    Pause(u64),
    Stop(u64),
    Release(u64),
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    live: HashSet<u64>,
    max_live: usize,
}

/// Audio backend double
///
/// Loads take `load_delay` of (virtual) time. URIs containing "missing"
/// fail to load. Operations on handles that are not live fail, so a test
/// notices if the engine touches a released handle.
pub struct MockBackend {
    load_delay: Duration,
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new(load_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            load_delay,
            state: Mutex::new(MockState::default()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn live_handles(&self) -> usize {
        self.state.lock().unwrap().live.len()
    }

    pub fn max_live_handles(&self) -> usize {
        self.state.lock().unwrap().max_live
    }

    pub fn play_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Play(_)))
            .count()
    }

    fn check_live(&self, handle: &AudioHandle, call: Call) -> keepsake_core::Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.live.contains(&handle.id()) {
            return Err(KeepsakeError::UnknownHandle(handle.id()));
        }
        state.calls.push(call);
        Ok(())
    }
}

#[async_trait]
impl AudioBackend for MockBackend {
    async fn load(&self, uri: &str) -> keepsake_core::Result<AudioHandle> {
        self.state.lock().unwrap().calls.push(Call::Load(uri.to_string()));
        tokio::time::sleep(self.load_delay).await;

        if uri.contains("missing") {
            return Err(KeepsakeError::audio(format!("{} not found", uri)));
        }

        let handle = AudioHandle::generate();
        let mut state = self.state.lock().unwrap();
        state.live.insert(handle.id());
        state.max_live = state.max_live.max(state.live.len());
        Ok(handle)
    }

    fn play(&self, handle: &AudioHandle) -> keepsake_core::Result<()> {
        self.check_live(handle, Call::Play(handle.id()))
    }

    fn pause(&self, handle: &AudioHandle) -> keepsake_core::Result<()> {
        self.check_live(handle, Call::Pause(handle.id()))
    }

    fn stop(&self, handle: &AudioHandle) -> keepsake_core::Result<()> {
        self.check_live(handle, Call::Stop(handle.id()))
    }

    fn release(&self, handle: AudioHandle) {
        let mut state = self.state.lock().unwrap();
        assert!(
            state.live.remove(&handle.id()),
            "released {} twice or never loaded",
            handle
        );
        state.calls.push(Call::Release(handle.id()));
    }
}

/// Counts close callback invocations
#[derive(Clone, Default)]
pub struct CloseCounter(Arc<AtomicUsize>);

impl CloseCounter {
    pub fn callback(&self) -> impl FnMut() + Send + 'static {
        let count = Arc::clone(&self.0);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 10, 17).unwrap()
}

pub fn photo_memory(id: &str, photos: usize, years_ago: u32) -> MemoryRecord {
    let uris = (0..photos)
        .map(|i| format!("file:///photos/{}-{}.jpg", id, i))
        .collect();
    let entry = MemoryEntry::photo(uris, date())
        .with_id(format!("entry-{}", id))
        .with_caption(format!("Caption for {}", id));
    MemoryRecord::new(entry, years_ago, 2026 - years_ago as i32).with_id(id)
}

pub fn video_memory(id: &str) -> MemoryRecord {
    let entry = MemoryEntry::video(vec![format!("file:///videos/{}.mp4", id)], date())
        .with_id(format!("entry-{}", id));
    MemoryRecord::new(entry, 2, 2024).with_id(id)
}

/// Two photo memories with 1 and 2 photos
pub fn three_slide_memories() -> Vec<MemoryRecord> {
    vec![photo_memory("m1", 1, 1), photo_memory("m2", 2, 3)]
}
