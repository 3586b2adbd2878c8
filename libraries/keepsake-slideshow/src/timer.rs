//! Automatic-advance timer
//!
//! An owned, cancellable schedule. While armed it yields one tick per
//! interval; disarming (or dropping) it guarantees no further tick fires.
//! Must be armed from inside a Tokio runtime.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Scoped scheduler handle for automatic slide advance
#[derive(Debug)]
pub struct AdvanceTimer {
    period: Duration,
    interval: Option<Interval>,
}

impl AdvanceTimer {
    /// Create a disarmed timer
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Start (or restart) the countdown; the first tick fires one full period from now
    pub fn arm(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        // A host that stalls gets one late tick, not a burst of catch-up advances
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Cancel the countdown
    pub fn disarm(&mut self) {
        self.interval = None;
    }

    /// Whether a tick is scheduled
    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Interval between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick
    ///
    /// Never completes while disarmed. Cancel-safe.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}
