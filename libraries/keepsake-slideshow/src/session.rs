//! Slideshow session - visibility-bound lifecycle
//!
//! Coordinates flattening, the playback controller, the advance timer and
//! background music for one activation-to-dismissal lifetime.

use crate::{
    audio::{AudioStatus, AudioTrack, AudioTrackState},
    controller::{PlaybackController, TickOutcome},
    error::Result,
    events::SlideshowEvent,
    flatten::flatten,
    timer::AdvanceTimer,
    types::{Slide, SlideView, SlideshowCommand, SlideshowConfig},
};
use keepsake_core::{AudioBackend, MemoryRecord};
use std::sync::Arc;
use tracing::{debug, info};

/// Dismissal callback supplied by the host
pub type CloseCallback = Box<dyn FnMut() + Send>;

/// Which path the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Not visible
    Inactive,

    /// Visible, but no photo slides; only `close()` is available
    Empty,

    /// Visible and playing back slides
    Active,
}

/// What a call to [`SlideshowSession::step`] applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// Automatic advance moved to this slide
    Advanced(usize),

    /// Automatic advance reached the last slide and paused
    ReachedEnd,

    /// Automatic advance reached the last slide and closed the session
    Closed,

    /// A music track finished loading (or failed to)
    Audio(AudioStatus),
}

enum Occurrence {
    Tick,
    Audio(AudioStatus),
}

/// Everything that exists only while slides are on screen
///
/// Dropping it cancels the timer and releases the music handle.
#[derive(Debug)]
struct ActiveShow {
    slides: Vec<Slide>,
    controller: PlaybackController,
    timer: AdvanceTimer,
    audio: AudioTrack,
}

#[derive(Debug)]
enum Phase {
    Inactive,
    Empty,
    Active(ActiveShow),
}

/// Memory slideshow session
///
/// Created once by the host and driven by `set_visible`. While active, the
/// host forwards user commands and polls [`step`](Self::step) for scheduled
/// work; all state changes happen synchronously on the caller's task.
pub struct SlideshowSession {
    backend: Arc<dyn AudioBackend>,
    config: SlideshowConfig,
    on_close: CloseCallback,
    phase: Phase,
    pending_events: Vec<SlideshowEvent>,
}

impl std::fmt::Debug for SlideshowSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideshowSession")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("pending_events", &self.pending_events.len())
            .finish_non_exhaustive()
    }
}

impl SlideshowSession {
    /// Create an inactive session
    ///
    /// # Errors
    /// Returns `SlideshowError::InvalidConfig` if `config` fails validation
    pub fn new(
        backend: Arc<dyn AudioBackend>,
        config: SlideshowConfig,
        on_close: impl FnMut() + Send + 'static,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            backend,
            config,
            on_close: Box::new(on_close),
            phase: Phase::Inactive,
            pending_events: Vec::new(),
        })
    }

    // ===== Lifecycle =====

    /// Follow the host's visibility flag
    ///
    /// `memories` is only read when becoming visible.
    pub fn set_visible(&mut self, visible: bool, memories: &[MemoryRecord]) -> SessionStatus {
        if visible {
            self.activate(memories)
        } else {
            self.deactivate();
            self.status()
        }
    }

    /// Compute slides and start playback
    ///
    /// Re-activating an active session discards its playback state, timer and
    /// music without invoking the close callback. Must be called inside a
    /// Tokio runtime when the collection has photos.
    pub fn activate(&mut self, memories: &[MemoryRecord]) -> SessionStatus {
        // Drop the previous activation first so its handle is released
        self.phase = Phase::Inactive;

        let slides = flatten(memories);
        let Some(controller) = PlaybackController::for_slides(slides.len()) else {
            info!(
                "No photo slides in {} memories, showing empty state",
                memories.len()
            );
            self.phase = Phase::Empty;
            self.pending_events.push(SlideshowEvent::EmptyState);
            return SessionStatus::Empty;
        };

        info!(
            "Slideshow activated: {} slides from {} memories",
            slides.len(),
            memories.len()
        );

        let mut timer = AdvanceTimer::new(self.config.advance_interval());
        timer.arm();

        let total_slides = slides.len();
        self.phase = Phase::Active(ActiveShow {
            slides,
            controller,
            timer,
            audio: AudioTrack::new(Arc::clone(&self.backend), self.config.autoplay_music),
        });

        self.pending_events.push(SlideshowEvent::Activated { total_slides });
        self.emit_slide_changed();
        self.emit_playback_toggled(true);

        SessionStatus::Active
    }

    /// Tear down and notify the host
    ///
    /// Cancels the timer, releases music (including in-flight loads) and
    /// invokes the close callback. Returns `false` and does nothing when the
    /// session is already inactive.
    pub fn deactivate(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Inactive) {
            Phase::Inactive => return false,
            Phase::Empty => debug!("Closing empty slideshow"),
            Phase::Active(mut show) => {
                show.timer.disarm();
                show.audio.release();
                info!("Slideshow closed at slide {}", show.controller.counter());
            }
        }

        self.pending_events.push(SlideshowEvent::Closed);
        (self.on_close)();
        true
    }

    /// Close/exit action; same as [`deactivate`](Self::deactivate)
    pub fn close(&mut self) -> bool {
        self.deactivate()
    }

    /// Current lifecycle path
    pub fn status(&self) -> SessionStatus {
        match self.phase {
            Phase::Inactive => SessionStatus::Inactive,
            Phase::Empty => SessionStatus::Empty,
            Phase::Active(_) => SessionStatus::Active,
        }
    }

    /// Whether slides are on screen
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    /// Whether the empty-state path is showing
    pub fn is_empty(&self) -> bool {
        matches!(self.phase, Phase::Empty)
    }

    // ===== Read surface =====

    /// Slides of the current activation
    pub fn slides(&self) -> &[Slide] {
        match &self.phase {
            Phase::Active(show) => &show.slides,
            _ => &[],
        }
    }

    /// Number of slides (0 unless active)
    pub fn total_slides(&self) -> usize {
        self.slides().len()
    }

    /// Current slide index
    pub fn current_index(&self) -> Option<usize> {
        self.show().map(|show| show.controller.current_index())
    }

    /// Slide on screen
    pub fn current_slide(&self) -> Option<&Slide> {
        self.show().map(|show| &show.slides[show.controller.current_index()])
    }

    /// Whether slides advance automatically
    pub fn is_playing(&self) -> bool {
        self.show().is_some_and(|show| show.controller.is_playing())
    }

    /// 1-based counter, e.g. `"1 / 3"`
    pub fn counter(&self) -> Option<String> {
        self.show().map(|show| show.controller.counter())
    }

    /// Snapshot for rendering the current slide
    pub fn view(&self) -> Option<SlideView> {
        let show = self.show()?;
        let slide = &show.slides[show.controller.current_index()];

        Some(SlideView {
            media_uri: slide.media_uri.clone(),
            caption: slide.caption.clone(),
            years_ago: slide.years_ago,
            years_ago_label: slide.years_ago_label(),
            year: slide.year,
            counter: show.controller.counter(),
            is_playing: show.controller.is_playing(),
        })
    }

    /// Music state (only while active)
    pub fn audio_state(&self) -> Option<&AudioTrackState> {
        self.show().map(|show| show.audio.state())
    }

    /// Whether the advance timer is armed
    pub fn is_timer_armed(&self) -> bool {
        self.show().is_some_and(|show| show.timer.is_armed())
    }

    // ===== Slide commands =====

    /// Play/pause the slideshow (control button or tap on the slide)
    pub fn toggle(&mut self) {
        let Some(show) = self.show_mut() else { return };

        let playing = show.controller.toggle();
        if playing {
            show.timer.arm();
        } else {
            show.timer.disarm();
        }
        debug!("Slideshow {}", if playing { "resumed" } else { "paused" });
        self.emit_playback_toggled(playing);
    }

    /// Resume automatic advance
    pub fn play(&mut self) {
        self.set_playing(true);
    }

    /// Pause automatic advance
    pub fn pause(&mut self) {
        self.set_playing(false);
    }

    /// Next slide, wrapping after the last
    pub fn next(&mut self) {
        let Some(show) = self.show_mut() else { return };
        show.controller.next();
        Self::restart_countdown(show);
        self.emit_slide_changed();
    }

    /// Previous slide, wrapping before the first
    pub fn prev(&mut self) {
        let Some(show) = self.show_mut() else { return };
        show.controller.prev();
        Self::restart_countdown(show);
        self.emit_slide_changed();
    }

    /// Jump to a slide
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        let Some(show) = self.show_mut() else {
            return Ok(());
        };
        show.controller.jump_to(index)?;
        Self::restart_countdown(show);
        self.emit_slide_changed();
        Ok(())
    }

    // ===== Music commands =====

    /// Pick a background track, replacing the current one
    pub fn select_track(&mut self, uri: impl Into<String>) {
        let Some(show) = self.show_mut() else { return };
        show.audio.select_track(uri);
        self.emit_audio_status();
    }

    /// Start or resume music
    pub fn play_music(&mut self) {
        self.with_audio(AudioTrack::play);
    }

    /// Pause music
    pub fn pause_music(&mut self) {
        self.with_audio(AudioTrack::pause);
    }

    /// Stop music, keeping the track loaded
    pub fn stop_music(&mut self) {
        self.with_audio(AudioTrack::stop);
    }

    /// Play/pause music
    pub fn toggle_music(&mut self) {
        self.with_audio(AudioTrack::toggle);
    }

    /// Apply a host command
    pub fn apply(&mut self, command: SlideshowCommand) -> Result<()> {
        match command {
            SlideshowCommand::Toggle => self.toggle(),
            SlideshowCommand::Next => self.next(),
            SlideshowCommand::Prev => self.prev(),
            SlideshowCommand::JumpTo(index) => self.jump_to(index)?,
            SlideshowCommand::SelectTrack(uri) => self.select_track(uri),
            SlideshowCommand::PlayMusic => self.play_music(),
            SlideshowCommand::PauseMusic => self.pause_music(),
            SlideshowCommand::StopMusic => self.stop_music(),
            SlideshowCommand::ToggleMusic => self.toggle_music(),
            SlideshowCommand::Close => {
                self.close();
            }
        }
        Ok(())
    }

    // ===== Scheduling =====

    /// Wait for the next scheduled occurrence and apply it
    ///
    /// Occurrences are advance ticks and music load completions. Returns
    /// `None` immediately when nothing can ever fire (inactive or empty
    /// session); otherwise waits, possibly forever while paused with no load
    /// in flight. Cancel-safe, so hosts can `select!` it against their
    /// command source.
    pub async fn step(&mut self) -> Option<SessionStep> {
        loop {
            let Phase::Active(show) = &mut self.phase else {
                return None;
            };

            let occurrence = tokio::select! {
                () = show.timer.tick() => Occurrence::Tick,
                status = show.audio.complete_load() => Occurrence::Audio(status),
            };

            match occurrence {
                Occurrence::Audio(status) => {
                    self.pending_events.push(SlideshowEvent::AudioStateChanged { status });
                    return Some(SessionStep::Audio(status));
                }
                Occurrence::Tick => {
                    let outcome = show.controller.tick(self.config.end_of_slides);
                    match outcome {
                        TickOutcome::Advanced(index) => {
                            self.emit_slide_changed();
                            return Some(SessionStep::Advanced(index));
                        }
                        TickOutcome::Stopped => {
                            show.timer.disarm();
                            debug!("Reached last slide, pausing");
                            self.emit_playback_toggled(false);
                            return Some(SessionStep::ReachedEnd);
                        }
                        TickOutcome::CloseRequested => {
                            debug!("Reached last slide, closing");
                            self.deactivate();
                            return Some(SessionStep::Closed);
                        }
                        TickOutcome::Ignored => show.timer.disarm(),
                    }
                }
            }
        }
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<SlideshowEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn show(&self) -> Option<&ActiveShow> {
        match &self.phase {
            Phase::Active(show) => Some(show),
            _ => None,
        }
    }

    fn show_mut(&mut self) -> Option<&mut ActiveShow> {
        match &mut self.phase {
            Phase::Active(show) => Some(show),
            _ => None,
        }
    }

    fn set_playing(&mut self, playing: bool) {
        let Some(show) = self.show_mut() else { return };
        if !show.controller.set_playing(playing) {
            return;
        }
        if playing {
            show.timer.arm();
        } else {
            show.timer.disarm();
        }
        self.emit_playback_toggled(playing);
    }

    /// Give a manually selected slide a full interval on screen
    fn restart_countdown(show: &mut ActiveShow) {
        if show.controller.is_playing() {
            show.timer.arm();
        }
    }

    fn with_audio(&mut self, op: impl FnOnce(&mut AudioTrack)) {
        let Some(show) = self.show_mut() else { return };
        let before = show.audio.status();
        op(&mut show.audio);
        if show.audio.status() != before {
            self.emit_audio_status();
        }
    }

    fn emit_slide_changed(&mut self) {
        if let Some(show) = self.show() {
            let event = SlideshowEvent::SlideChanged {
                index: show.controller.current_index(),
                counter: show.controller.counter(),
            };
            self.pending_events.push(event);
        }
    }

    fn emit_playback_toggled(&mut self, is_playing: bool) {
        self.pending_events.push(SlideshowEvent::PlaybackToggled { is_playing });
    }

    fn emit_audio_status(&mut self) {
        if let Some(show) = self.show() {
            let status = show.audio.status();
            self.pending_events.push(SlideshowEvent::AudioStateChanged { status });
        }
    }
}
