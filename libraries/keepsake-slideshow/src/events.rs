//! Slideshow Events
//!
//! Event-based communication for UI synchronization. Events are queued on
//! the session and drained by the host after each command or step.

use crate::audio::AudioStatus;
use serde::{Deserialize, Serialize};

/// Events emitted by a slideshow session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SlideshowEvent {
    /// Session became visible with at least one slide
    Activated {
        /// Number of slides in this activation
        total_slides: usize,
    },

    /// Session became visible but there is nothing to show
    EmptyState,

    /// Current slide changed (tick or manual navigation)
    SlideChanged {
        /// New slide index (0-based)
        index: usize,
        /// 1-based counter, e.g. `"2 / 3"`
        counter: String,
    },

    /// Automatic advance started or stopped
    PlaybackToggled {
        /// Whether slides now advance automatically
        is_playing: bool,
    },

    /// Background music changed state
    AudioStateChanged {
        /// New music status
        status: AudioStatus,
    },

    /// Session was dismissed
    Closed,
}
