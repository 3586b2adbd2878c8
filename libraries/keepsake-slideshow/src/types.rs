//! Core types for slideshow playback

use crate::error::{Result, SlideshowError};
use keepsake_core::{EntryId, MemoryId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay between automatic slide advances
pub const DEFAULT_ADVANCE_INTERVAL_MS: u64 = 4_000;

/// One displayable photo derived from a memory record
///
/// Slides are computed once per activation and never change afterwards.
/// `position` is the 0-based index in playback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Memory the photo came from
    pub memory_id: MemoryId,

    /// Entry the photo belongs to
    pub entry_id: EntryId,

    /// Photo URI (opaque, resolved by the host)
    pub media_uri: String,

    /// Caption of the owning entry
    pub caption: Option<String>,

    /// Years between the entry and today
    pub years_ago: u32,

    /// Calendar year of the entry
    pub year: i32,

    /// Position in playback order
    pub position: usize,
}

impl Slide {
    /// Human-readable age line shown under the photo
    pub fn years_ago_label(&self) -> String {
        match self.years_ago {
            0 => "This year".to_string(),
            1 => "1 year ago".to_string(),
            n => format!("{} years ago", n),
        }
    }
}

/// Everything the UI needs to draw the current slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideView {
    pub media_uri: String,
    pub caption: Option<String>,
    pub years_ago: u32,
    pub years_ago_label: String,
    pub year: i32,
    /// 1-based counter, e.g. `"2 / 3"`
    pub counter: String,
    pub is_playing: bool,
}

/// What an automatic advance does on the last slide
///
/// Manual navigation always wraps regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfSlidesPolicy {
    /// Wrap to the first slide and keep playing
    #[default]
    Loop,

    /// Stay on the last slide and pause
    Pause,

    /// Close the slideshow
    Close,
}

/// Commands a host can forward to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "camelCase")]
pub enum SlideshowCommand {
    /// Play/pause control or a tap on the slide surface
    Toggle,
    Next,
    Prev,
    /// Jump straight to a slide (thumbnail strip)
    JumpTo(usize),
    /// Pick a background music track
    SelectTrack(String),
    PlayMusic,
    PauseMusic,
    StopMusic,
    ToggleMusic,
    Close,
}

/// Configuration for a slideshow session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Delay between automatic advances in milliseconds (default: 4000)
    pub advance_interval_ms: u64,

    /// Start music as soon as a selected track finishes loading (default: true)
    pub autoplay_music: bool,

    /// Automatic-advance behavior past the last slide (default: Loop)
    pub end_of_slides: EndOfSlidesPolicy,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            advance_interval_ms: DEFAULT_ADVANCE_INTERVAL_MS,
            autoplay_music: true,
            end_of_slides: EndOfSlidesPolicy::Loop,
        }
    }
}

impl SlideshowConfig {
    /// Delay between automatic advances
    pub fn advance_interval(&self) -> Duration {
        Duration::from_millis(self.advance_interval_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.advance_interval_ms == 0 {
            return Err(SlideshowError::InvalidConfig(
                "advance_interval_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
