//! Clocks: the seam between simulated durations and real waiting.
//!
//! The core computes durations but never sleeps; a [`Clock`] decides what
//! a wait means. [`WallClock`] actually sleeps (optionally capped per
//! wait), [`InstantClock`] advances a virtual timestamp so tests and fast
//! runs finish immediately while timestamps stay ordered.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Source of timestamps and waiting behavior for a protocol run.
pub trait Clock {
    /// Current time according to this clock.
    fn now(&self) -> DateTime<Utc>;

    /// Let the given simulated duration pass.
    fn wait(&mut self, duration: Duration);
}

/// Real time: `now` is the system clock and `wait` sleeps the thread.
#[derive(Debug, Default, Clone)]
pub struct WallClock {
    cap: Option<Duration>,
}

impl WallClock {
    /// A wall clock that sleeps for the full requested duration.
    pub fn new() -> Self {
        WallClock { cap: None }
    }

    /// Cap each individual wait at `cap` (long travel legs still log
    /// their true simulated duration but don't stall an interactive run).
    pub fn with_cap(cap: Duration) -> Self {
        WallClock { cap: Some(cap) }
    }
}

impl Clock for WallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn wait(&mut self, duration: Duration) {
        let actual = match self.cap {
            Some(cap) => duration.min(cap),
            None => duration,
        };
        if !actual.is_zero() {
            std::thread::sleep(actual);
        }
    }
}

/// Virtual time: `wait` advances the clock without sleeping.
#[derive(Debug, Clone)]
pub struct InstantClock {
    now: DateTime<Utc>,
}

impl InstantClock {
    /// Start the virtual clock at the current system time.
    pub fn new() -> Self {
        InstantClock { now: Utc::now() }
    }

    /// Start the virtual clock at an explicit instant.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        InstantClock { now }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn wait(&mut self, duration: Duration) {
        if let Ok(delta) = chrono::Duration::from_std(duration) {
            self.now += delta;
        }
    }
}
