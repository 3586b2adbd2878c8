//! Playback controller - slide index and play/pause state machine
//!
//! The controller is pure state: it never touches timers or audio. The
//! owning session turns its results into timer arm/disarm calls.

use crate::error::{Result, SlideshowError};
use crate::types::EndOfSlidesPolicy;
use std::num::NonZeroUsize;

/// Result of an automatic advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved to the given slide
    Advanced(usize),

    /// Last slide reached under `EndOfSlidesPolicy::Pause`; now paused
    Stopped,

    /// Last slide reached under `EndOfSlidesPolicy::Close`
    CloseRequested,

    /// Tick arrived while paused; nothing changed
    Ignored,
}

/// Slide playback state machine
///
/// ```text
///              toggle()
///   Playing ◄────────────► Paused
///   tick, next, prev       next, prev
/// ```
///
/// Invariant: `current_index < total_slides` at all times. A controller
/// for zero slides cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackController {
    current_index: usize,
    is_playing: bool,
    total_slides: NonZeroUsize,
}

impl PlaybackController {
    /// Create a controller at the first slide, playing
    pub fn new(total_slides: NonZeroUsize) -> Self {
        Self {
            current_index: 0,
            is_playing: true,
            total_slides,
        }
    }

    /// Create a controller if there is at least one slide
    pub fn for_slides(total_slides: usize) -> Option<Self> {
        NonZeroUsize::new(total_slides).map(Self::new)
    }

    // ===== Read surface =====

    /// Current slide index (0-based)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether automatic advance is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Number of slides
    pub fn total_slides(&self) -> usize {
        self.total_slides.get()
    }

    /// 1-based counter shown to the user, e.g. `"1 / 3"`
    pub fn counter(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.total_slides)
    }

    /// Whether the current slide is the last one
    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.total_slides.get()
    }

    // ===== Transitions =====

    /// Flip between playing and paused, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }

    /// Set the play state explicitly
    ///
    /// Returns `true` if the state changed.
    pub fn set_playing(&mut self, playing: bool) -> bool {
        let changed = self.is_playing != playing;
        self.is_playing = playing;
        changed
    }

    /// Advance one slide, wrapping after the last
    pub fn next(&mut self) -> usize {
        self.current_index = (self.current_index + 1) % self.total_slides;
        self.current_index
    }

    /// Go back one slide, wrapping before the first
    pub fn prev(&mut self) -> usize {
        let total = self.total_slides.get();
        self.current_index = (self.current_index + total - 1) % total;
        self.current_index
    }

    /// Jump to a specific slide
    pub fn jump_to(&mut self, index: usize) -> Result<usize> {
        if index >= self.total_slides.get() {
            return Err(SlideshowError::IndexOutOfBounds {
                index,
                total: self.total_slides.get(),
            });
        }

        self.current_index = index;
        Ok(index)
    }

    /// Apply one automatic advance
    pub fn tick(&mut self, policy: EndOfSlidesPolicy) -> TickOutcome {
        if !self.is_playing {
            return TickOutcome::Ignored;
        }

        if self.is_last() {
            match policy {
                EndOfSlidesPolicy::Loop => {}
                EndOfSlidesPolicy::Pause => {
                    self.is_playing = false;
                    return TickOutcome::Stopped;
                }
                EndOfSlidesPolicy::Close => return TickOutcome::CloseRequested,
            }
        }

        TickOutcome::Advanced(self.next())
    }
}
