//! Host loop
//!
//! Drives one slideshow session: forwards commands, polls scheduled work and
//! reports events until the session closes or a stop condition is met.

use crate::error::Result;
use keepsake_core::MemoryRecord;
use keepsake_slideshow::{
    AudioStatus, SessionStatus, SessionStep, SlideshowCommand, SlideshowEvent, SlideshowSession,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Track selected right after activation
    pub music: Option<String>,

    /// Close after this many automatic advances
    pub max_advances: Option<usize>,

    /// Close after this much time
    pub duration: Option<Duration>,

    /// Print events to stdout as JSON lines
    pub json_events: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Path taken on activation
    pub activation: SessionStatus,

    /// Automatic advances applied
    pub advances: usize,

    /// Commands applied
    pub commands: usize,

    /// Every event in emission order
    pub events: Vec<SlideshowEvent>,
}

/// Show `memories` until the session is dismissed
///
/// Returns once the session is inactive. The session is closed when a stop
/// condition fires, or when input has ended and the show is paused (or
/// empty) with no music loading.
pub async fn run_session(
    session: &mut SlideshowSession,
    memories: &[MemoryRecord],
    mut commands: mpsc::Receiver<SlideshowCommand>,
    options: &RunOptions,
) -> Result<RunSummary> {
    let activation = session.set_visible(true, memories);
    let mut summary = RunSummary {
        activation,
        advances: 0,
        commands: 0,
        events: Vec::new(),
    };

    if let Some(uri) = &options.music {
        session.select_track(uri.clone());
    }
    report(session, options, &mut summary)?;

    let deadline = async {
        match options.duration {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);
    let mut input_open = true;

    while session.status() != SessionStatus::Inactive {
        tokio::select! {
            Some(step) = session.step(), if session.is_active() => {
                if let SessionStep::Advanced(_) = step {
                    summary.advances += 1;
                    if options.max_advances.is_some_and(|max| summary.advances >= max) {
                        info!("Shown {} advances, closing", summary.advances);
                        session.close();
                    }
                }
            }
            command = commands.recv(), if input_open => match command {
                Some(command) => {
                    summary.commands += 1;
                    if let Err(e) = session.apply(command) {
                        warn!("{}", e);
                    }
                }
                None => input_open = false,
            },
            () = &mut deadline => {
                info!("Time is up, closing");
                session.close();
            }
        }

        report(session, options, &mut summary)?;

        if !input_open && options.duration.is_none() && is_idle(session) {
            info!("Input closed and nothing left to show, closing");
            session.close();
            report(session, options, &mut summary)?;
        }
    }

    Ok(summary)
}

/// Whether nothing will happen without user input
fn is_idle(session: &SlideshowSession) -> bool {
    let loading = session
        .audio_state()
        .is_some_and(|state| state.status() == AudioStatus::Loading);
    !session.is_playing() && !loading
}

fn report(
    session: &mut SlideshowSession,
    options: &RunOptions,
    summary: &mut RunSummary,
) -> Result<()> {
    for event in session.drain_events() {
        match &event {
            SlideshowEvent::Activated { total_slides } => {
                info!("Showing {} photos", total_slides);
            }
            SlideshowEvent::EmptyState => info!("No photo memories to show"),
            SlideshowEvent::SlideChanged { index, counter } => match session.slides().get(*index) {
                Some(slide) => info!(
                    "[{}] {} ({}){}",
                    counter,
                    slide.media_uri,
                    slide.years_ago_label(),
                    slide
                        .caption
                        .as_deref()
                        .map(|c| format!(" - {}", c))
                        .unwrap_or_default()
                ),
                None => info!("[{}]", counter),
            },
            SlideshowEvent::PlaybackToggled { is_playing } => {
                info!("Slideshow {}", if *is_playing { "playing" } else { "paused" });
            }
            SlideshowEvent::AudioStateChanged { status } => info!("Music {:?}", status),
            SlideshowEvent::Closed => info!("Slideshow closed"),
        }

        if options.json_events {
            println!("{}", serde_json::to_string(&event)?);
        }
        summary.events.push(event);
    }

    Ok(())
}
