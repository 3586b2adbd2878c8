//! Keepsake - Memory Slideshow Playback
//!
//! Platform-agnostic playback engine for the memories slideshow.
//!
//! This crate provides:
//! - Slide flattening (photo memories → ordered slides, videos skipped)
//! - Play/pause state machine with wrap-around navigation
//! - Timed automatic advance with an owned, cancellable timer
//! - Background music with single-handle ownership and cancellable loads
//! - Visibility-bound sessions with an empty-state fallback
//!
//! # Architecture
//!
//! `keepsake-slideshow` is completely platform-agnostic:
//! - No dependency on any UI toolkit
//! - No dependency on a platform audio API
//! - No persistence
//!
//! Platform audio is provided through [`keepsake_core::AudioBackend`].
//! Everything runs on the host's task; the advance timer and music loads are
//! the only scheduled work and both surface through [`SlideshowSession::step`].
//!
//! # Example: Slides and Navigation
//!
//! ```rust
//! use keepsake_core::{MemoryEntry, MemoryRecord};
//! use keepsake_slideshow::{flatten, PlaybackController};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
//! let memories = vec![
//!     MemoryRecord::new(MemoryEntry::photo(vec!["a.jpg".into()], date), 5, 2020),
//!     MemoryRecord::new(MemoryEntry::photo(vec!["b.jpg".into(), "c.jpg".into()], date), 5, 2020),
//!     MemoryRecord::new(MemoryEntry::video(vec!["d.mp4".into()], date), 5, 2020),
//! ];
//!
//! let slides = flatten(&memories);
//! assert_eq!(slides.len(), 3);
//!
//! let mut controller = PlaybackController::for_slides(slides.len()).unwrap();
//! assert_eq!(controller.counter(), "1 / 3");
//! controller.next();
//! assert_eq!(controller.counter(), "2 / 3");
//! controller.prev();
//! assert_eq!(controller.counter(), "1 / 3");
//! ```
//!
//! # Example: Hosting a Session
//!
//! ```rust,no_run
//! use keepsake_slideshow::{SlideshowCommand, SlideshowConfig, SlideshowSession};
//! # use keepsake_core::{AudioBackend, AudioHandle, MemoryRecord, Result};
//! # struct Speaker;
//! # #[async_trait::async_trait]
//! # impl AudioBackend for Speaker {
//! #     async fn load(&self, _uri: &str) -> Result<AudioHandle> { Ok(AudioHandle::generate()) }
//! #     fn play(&self, _h: &AudioHandle) -> Result<()> { Ok(()) }
//! #     fn pause(&self, _h: &AudioHandle) -> Result<()> { Ok(()) }
//! #     fn stop(&self, _h: &AudioHandle) -> Result<()> { Ok(()) }
//! #     fn release(&self, _h: AudioHandle) {}
//! # }
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! # async fn host(memories: Vec<MemoryRecord>, mut commands: mpsc::Receiver<SlideshowCommand>) {
//! let mut session = SlideshowSession::new(Arc::new(Speaker), SlideshowConfig::default(), || {
//!     println!("slideshow dismissed");
//! })
//! .expect("default config is valid");
//! session.set_visible(true, &memories);
//!
//! while session.is_active() {
//!     tokio::select! {
//!         Some(_step) = session.step() => {}
//!         Some(command) = commands.recv() => {
//!             session.apply(command).ok();
//!         }
//!     }
//!     for event in session.drain_events() {
//!         println!("{:?}", event);
//!     }
//! }
//! # }
//! ```

mod audio;
mod controller;
mod error;
mod events;
mod flatten;
mod session;
mod timer;
pub mod types;

// Public exports
pub use audio::{AudioStatus, AudioTrack, AudioTrackState};
pub use controller::{PlaybackController, TickOutcome};
pub use error::{Result, SlideshowError};
pub use events::SlideshowEvent;
pub use flatten::{count_slides, flatten};
pub use session::{CloseCallback, SessionStatus, SessionStep, SlideshowSession};
pub use timer::AdvanceTimer;
pub use types::{
    EndOfSlidesPolicy, Slide, SlideView, SlideshowCommand, SlideshowConfig,
    DEFAULT_ADVANCE_INTERVAL_MS,
};
