//! Session lifecycle tests
//!
//! These run on a paused Tokio clock: awaiting `step()` advances virtual
//! time straight to the next timer deadline or load completion.

mod common;

use common::{photo_memory, three_slide_memories, video_memory, Call, CloseCounter, MockBackend};
use keepsake_slideshow::{
    AudioStatus, EndOfSlidesPolicy, SessionStatus, SessionStep, SlideshowCommand,
    SlideshowConfig, SlideshowError, SlideshowEvent, SlideshowSession,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout, Instant};

const LOAD_DELAY: Duration = Duration::from_millis(250);

type Harness = (SlideshowSession, Arc<MockBackend>, CloseCounter);

fn session_with(config: SlideshowConfig) -> Harness {
    let backend = MockBackend::new(LOAD_DELAY);
    let closes = CloseCounter::default();
    let session = SlideshowSession::new(backend.clone(), config, closes.callback()).unwrap();
    (session, backend, closes)
}

fn session() -> Harness {
    session_with(SlideshowConfig::default())
}

fn assert_elapsed(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(5),
        "expected ~{:?}, got {:?}",
        expected,
        elapsed
    );
}

// ===== Activation =====

#[tokio::test(start_paused = true)]
async fn activation_starts_playing_at_first_slide() {
    let (mut session, _backend, closes) = session();

    let status = session.set_visible(true, &three_slide_memories());

    assert_eq!(status, SessionStatus::Active);
    assert_eq!(session.total_slides(), 3);
    assert_eq!(session.current_index(), Some(0));
    assert!(session.is_playing());
    assert!(session.is_timer_armed());
    assert_eq!(session.counter().as_deref(), Some("1 / 3"));
    assert_eq!(closes.count(), 0);

    let view = session.view().unwrap();
    assert_eq!(view.media_uri, "file:///photos/m1-0.jpg");
    assert_eq!(view.caption.as_deref(), Some("Caption for m1"));
    assert_eq!(view.years_ago, 1);
    assert_eq!(view.years_ago_label, "1 year ago");
    assert!(view.is_playing);
}

#[tokio::test(start_paused = true)]
async fn next_then_prev_scenario() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.next();
    assert_eq!(session.counter().as_deref(), Some("2 / 3"));
    assert_eq!(session.current_slide().unwrap().media_uri, "file:///photos/m2-0.jpg");
    assert!(session.is_playing());

    session.prev();
    assert_eq!(session.counter().as_deref(), Some("1 / 3"));
}

#[tokio::test(start_paused = true)]
async fn activation_events_are_queued() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    let events = session.drain_events();
    assert_eq!(
        events,
        vec![
            SlideshowEvent::Activated { total_slides: 3 },
            SlideshowEvent::SlideChanged {
                index: 0,
                counter: "1 / 3".to_string()
            },
            SlideshowEvent::PlaybackToggled { is_playing: true },
        ]
    );
    assert!(!session.has_pending_events());
}

// ===== Empty state =====

#[tokio::test(start_paused = true)]
async fn video_only_collection_shows_empty_state() {
    let (mut session, backend, closes) = session();

    let status = session.set_visible(true, &[video_memory("v1"), video_memory("v2")]);

    assert_eq!(status, SessionStatus::Empty);
    assert!(session.is_empty());
    assert_eq!(session.total_slides(), 0);
    assert_eq!(session.current_index(), None);
    assert!(session.view().is_none());
    assert!(session.audio_state().is_none());
    assert_eq!(session.drain_events(), vec![SlideshowEvent::EmptyState]);

    // Commands other than close do nothing
    session.next();
    session.toggle();
    session.select_track("file:///music/song.mp3");
    assert!(backend.calls().is_empty());
    assert_eq!(session.step().await, None);

    assert!(session.close());
    assert_eq!(closes.count(), 1);

    assert!(!session.close());
    assert_eq!(closes.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn zero_memories_shows_empty_state() {
    let (mut session, _backend, closes) = session();

    assert_eq!(session.set_visible(true, &[]), SessionStatus::Empty);

    session.close();
    session.close();
    assert_eq!(closes.count(), 1);
    assert_eq!(session.status(), SessionStatus::Inactive);
}

// ===== Automatic advance =====

#[tokio::test(start_paused = true)]
async fn ticks_advance_and_loop() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    let start = Instant::now();
    assert_eq!(session.step().await, Some(SessionStep::Advanced(1)));
    assert_elapsed(start, Duration::from_secs(4));

    assert_eq!(session.step().await, Some(SessionStep::Advanced(2)));
    assert_eq!(session.step().await, Some(SessionStep::Advanced(0)));
    assert_elapsed(start, Duration::from_secs(12));
    assert!(session.is_playing());
}

#[tokio::test(start_paused = true)]
async fn paused_session_does_not_advance() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.toggle();
    assert!(!session.is_playing());
    assert!(!session.is_timer_armed());

    let waited = timeout(Duration::from_secs(60), session.step()).await;
    assert!(waited.is_err());
    assert_eq!(session.current_index(), Some(0));

    // Manual navigation still works while paused
    session.next();
    assert_eq!(session.current_index(), Some(1));
    assert!(!session.is_playing());

    session.toggle();
    let start = Instant::now();
    assert_eq!(session.step().await, Some(SessionStep::Advanced(2)));
    assert_elapsed(start, Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn explicit_play_and_pause_only_report_changes() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());
    session.drain_events();

    session.pause();
    session.pause();
    assert!(!session.is_timer_armed());
    session.play();
    session.play();
    assert!(session.is_timer_armed());

    assert_eq!(
        session.drain_events(),
        vec![
            SlideshowEvent::PlaybackToggled { is_playing: false },
            SlideshowEvent::PlaybackToggled { is_playing: true },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn manual_navigation_restarts_countdown() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    tokio::time::advance(Duration::from_secs(3)).await;
    session.next();

    let start = Instant::now();
    assert_eq!(session.step().await, Some(SessionStep::Advanced(2)));
    assert_elapsed(start, Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn custom_interval_is_used() {
    let (mut session, _backend, _closes) = session_with(SlideshowConfig {
        advance_interval_ms: 1_500,
        ..Default::default()
    });
    session.set_visible(true, &three_slide_memories());

    let start = Instant::now();
    session.step().await;
    assert_elapsed(start, Duration::from_millis(1_500));
}

#[tokio::test(start_paused = true)]
async fn pause_policy_stops_on_last_slide() {
    let (mut session, _backend, _closes) = session_with(SlideshowConfig {
        end_of_slides: EndOfSlidesPolicy::Pause,
        ..Default::default()
    });
    session.set_visible(true, &[photo_memory("m1", 2, 1)]);

    assert_eq!(session.step().await, Some(SessionStep::Advanced(1)));
    assert_eq!(session.step().await, Some(SessionStep::ReachedEnd));
    assert_eq!(session.current_index(), Some(1));
    assert!(!session.is_playing());
    assert!(!session.is_timer_armed());

    // Manual next still wraps
    session.next();
    assert_eq!(session.current_index(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn close_policy_dismisses_after_last_slide() {
    let (mut session, _backend, closes) = session_with(SlideshowConfig {
        end_of_slides: EndOfSlidesPolicy::Close,
        ..Default::default()
    });
    session.set_visible(true, &[photo_memory("m1", 1, 1)]);

    assert_eq!(session.step().await, Some(SessionStep::Closed));
    assert_eq!(session.status(), SessionStatus::Inactive);
    assert_eq!(closes.count(), 1);
    assert_eq!(session.step().await, None);
}

// ===== Deactivation =====

#[tokio::test(start_paused = true)]
async fn hiding_closes_exactly_once_and_freezes_state() {
    let (mut session, _backend, closes) = session();
    session.set_visible(true, &three_slide_memories());
    session.next();

    assert_eq!(session.set_visible(false, &[]), SessionStatus::Inactive);
    assert_eq!(closes.count(), 1);
    assert_eq!(session.drain_events().last(), Some(&SlideshowEvent::Closed));

    session.next();
    session.toggle();
    session.close();
    session.set_visible(false, &[]);

    assert_eq!(closes.count(), 1);
    assert_eq!(session.current_index(), None);
    assert!(!session.is_playing());
    assert!(!session.has_pending_events());
    assert_eq!(session.step().await, None);
}

#[tokio::test(start_paused = true)]
async fn reactivation_resets_playback() {
    let (mut session, _backend, closes) = session();
    session.set_visible(true, &three_slide_memories());
    session.next();
    session.toggle();

    let status = session.set_visible(true, &[photo_memory("m9", 5, 2)]);

    assert_eq!(status, SessionStatus::Active);
    assert_eq!(session.total_slides(), 5);
    assert_eq!(session.current_index(), Some(0));
    assert!(session.is_playing());
    assert_eq!(closes.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn reopening_after_close_gets_a_new_close() {
    let (mut session, _backend, closes) = session();

    session.set_visible(true, &three_slide_memories());
    session.close();
    session.set_visible(true, &three_slide_memories());
    assert_eq!(session.counter().as_deref(), Some("1 / 3"));
    session.close();

    assert_eq!(closes.count(), 2);
}

// ===== Music =====

#[tokio::test(start_paused = true)]
async fn selected_track_autoplays_after_load() {
    let (mut session, backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.select_track("file:///music/lullaby.mp3");
    assert_eq!(session.audio_state().unwrap().status(), AudioStatus::Loading);

    let start = Instant::now();
    assert_eq!(
        session.step().await,
        Some(SessionStep::Audio(AudioStatus::Playing))
    );
    assert_elapsed(start, LOAD_DELAY);
    assert_eq!(backend.play_count(), 1);

    // Slides keep their own schedule
    assert_eq!(session.step().await, Some(SessionStep::Advanced(1)));
}

#[tokio::test(start_paused = true)]
async fn navigation_is_not_blocked_while_loading() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.select_track("file:///music/lullaby.mp3");
    session.next();
    session.toggle();

    assert_eq!(session.current_index(), Some(1));
    assert!(!session.is_playing());
    assert_eq!(session.audio_state().unwrap().status(), AudioStatus::Loading);
}

#[tokio::test(start_paused = true)]
async fn music_and_slides_pause_independently() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());
    session.select_track("file:///music/lullaby.mp3");
    session.step().await;

    session.toggle();
    assert!(!session.is_playing());
    assert_eq!(session.audio_state().unwrap().status(), AudioStatus::Playing);

    session.toggle();
    session.pause_music();
    assert!(session.is_playing());
    assert_eq!(session.audio_state().unwrap().status(), AudioStatus::Paused);

    session.toggle_music();
    assert_eq!(session.audio_state().unwrap().status(), AudioStatus::Playing);
    session.stop_music();
    assert_eq!(session.audio_state().unwrap().status(), AudioStatus::Ready);
    session.play_music();
    assert_eq!(session.audio_state().unwrap().status(), AudioStatus::Playing);
}

#[tokio::test(start_paused = true)]
async fn load_failure_does_not_stop_slides() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.select_track("file:///music/missing.mp3");
    assert_eq!(
        session.step().await,
        Some(SessionStep::Audio(AudioStatus::Failed))
    );

    session.next();
    assert_eq!(session.current_index(), Some(1));
    assert_eq!(session.step().await, Some(SessionStep::Advanced(2)));

    // Selecting another track recovers
    session.select_track("file:///music/lullaby.mp3");
    assert_eq!(
        session.step().await,
        Some(SessionStep::Audio(AudioStatus::Playing))
    );
}

#[tokio::test(start_paused = true)]
async fn second_track_releases_first_before_loading() {
    let (mut session, backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.select_track("file:///music/first.mp3");
    session.step().await;
    session.select_track("file:///music/second.mp3");
    session.step().await;

    let calls = backend.calls();
    let first_handle = calls
        .iter()
        .find_map(|c| match c {
            Call::Play(id) => Some(*id),
            _ => None,
        })
        .unwrap();
    let released_at = calls
        .iter()
        .position(|c| *c == Call::Release(first_handle))
        .unwrap();
    let second_load_at = calls
        .iter()
        .position(|c| *c == Call::Load("file:///music/second.mp3".to_string()))
        .unwrap();

    assert!(released_at < second_load_at, "{:?}", calls);
    assert_eq!(backend.max_live_handles(), 1);
    assert_eq!(backend.live_handles(), 1);

    session.close();
    assert_eq!(backend.live_handles(), 0);
}

#[tokio::test(start_paused = true)]
async fn superseded_load_is_released_not_played() {
    let (mut session, backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.select_track("file:///music/first.mp3");
    session.select_track("file:///music/second.mp3");

    assert_eq!(
        session.step().await,
        Some(SessionStep::Audio(AudioStatus::Playing))
    );
    // Let the abandoned load finish too
    tokio::time::sleep(LOAD_DELAY * 2).await;

    assert_eq!(backend.play_count(), 1);
    assert_eq!(backend.live_handles(), 1);
    assert_eq!(backend.max_live_handles(), 1);
}

#[tokio::test(start_paused = true)]
async fn closing_mid_load_never_plays_the_track() {
    let (mut session, backend, closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.select_track("file:///music/lullaby.mp3");
    session.close();
    assert_eq!(closes.count(), 1);

    // Give the in-flight load time to resolve
    tokio::time::sleep(LOAD_DELAY * 4).await;

    let calls = backend.calls();
    assert_eq!(backend.play_count(), 0, "{:?}", calls);
    assert!(calls.iter().any(|c| matches!(c, Call::Release(_))), "{:?}", calls);
    assert_eq!(backend.live_handles(), 0);
}

#[tokio::test(start_paused = true)]
async fn closing_releases_a_load_that_finished_unobserved() {
    let (mut session, backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.select_track("file:///music/lullaby.mp3");
    // Load completes but step() never collects it
    tokio::time::sleep(LOAD_DELAY * 2).await;
    assert_eq!(backend.live_handles(), 1);

    session.close();
    tokio::time::sleep(LOAD_DELAY * 4).await;

    let calls = backend.calls();
    assert_eq!(backend.play_count(), 0, "{:?}", calls);
    assert!(calls.iter().any(|c| matches!(c, Call::Release(_))), "{:?}", calls);
    assert_eq!(backend.live_handles(), 0);
}

#[tokio::test(start_paused = true)]
async fn reselecting_releases_a_load_that_finished_unobserved() {
    let (mut session, backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.select_track("file:///music/first.mp3");
    tokio::time::sleep(LOAD_DELAY * 2).await;
    assert_eq!(backend.live_handles(), 1);

    session.select_track("file:///music/second.mp3");
    assert_eq!(backend.live_handles(), 0);

    assert_eq!(
        session.step().await,
        Some(SessionStep::Audio(AudioStatus::Playing))
    );
    assert_eq!(backend.live_handles(), 1);
    assert_eq!(backend.max_live_handles(), 1);
    assert_eq!(backend.play_count(), 1);

    session.close();
    assert_eq!(backend.live_handles(), 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_session_releases_an_unobserved_load() {
    let (mut session, backend, closes) = session();
    session.set_visible(true, &three_slide_memories());

    session.select_track("file:///music/lullaby.mp3");
    tokio::time::sleep(LOAD_DELAY * 2).await;
    drop(session);

    assert_eq!(backend.live_handles(), 0);
    assert_eq!(closes.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn zero_interval_config_is_rejected() {
    let backend = MockBackend::new(LOAD_DELAY);
    let config = SlideshowConfig {
        advance_interval_ms: 0,
        ..Default::default()
    };

    let err = SlideshowSession::new(backend, config, || {}).unwrap_err();
    assert!(matches!(err, SlideshowError::InvalidConfig(_)), "{:?}", err);
}

#[tokio::test(start_paused = true)]
async fn closing_releases_playing_track() {
    let (mut session, backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());
    session.select_track("file:///music/lullaby.mp3");
    session.step().await;
    assert_eq!(backend.live_handles(), 1);

    session.set_visible(false, &[]);

    assert_eq!(backend.live_handles(), 0);
    assert!(session.audio_state().is_none());
}

// ===== Commands =====

#[tokio::test(start_paused = true)]
async fn commands_are_applied_in_order() {
    let (mut session, _backend, closes) = session();
    session.set_visible(true, &three_slide_memories());

    for command in [
        SlideshowCommand::Next,
        SlideshowCommand::Next,
        SlideshowCommand::Prev,
        SlideshowCommand::Toggle,
    ] {
        session.apply(command).unwrap();
    }
    assert_eq!(session.counter().as_deref(), Some("2 / 3"));
    assert!(!session.is_playing());

    session.apply(SlideshowCommand::JumpTo(2)).unwrap();
    assert_eq!(session.current_index(), Some(2));

    let err = session.apply(SlideshowCommand::JumpTo(3)).unwrap_err();
    assert!(matches!(
        err,
        SlideshowError::IndexOutOfBounds { index: 3, total: 3 }
    ));
    assert_eq!(session.current_index(), Some(2));

    session.apply(SlideshowCommand::Close).unwrap();
    assert_eq!(closes.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn slide_change_events_follow_navigation() {
    let (mut session, _backend, _closes) = session();
    session.set_visible(true, &three_slide_memories());
    session.drain_events();

    session.next();
    session.step().await;

    assert_eq!(
        session.drain_events(),
        vec![
            SlideshowEvent::SlideChanged {
                index: 1,
                counter: "2 / 3".to_string()
            },
            SlideshowEvent::SlideChanged {
                index: 2,
                counter: "3 / 3".to_string()
            },
        ]
    );
}
