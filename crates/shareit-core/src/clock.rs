//! # Clock
//!
//! Time source for every "is this in the past" decision.
//!
//! The engine never caches a reading: each validation or query asks the
//! clock again, so a long-running process keeps judging windows against the
//! real current time.
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use shareit_core::{Clock, ManualClock};
//!
//! let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap());
//! clock.advance(Duration::hours(2));
//! assert_eq!(clock.now(), Utc.with_ymd_and_hms(2026, 1, 1, 14, 0, 0).unwrap());
//! ```
//!
//! ## Precision
//! Clock readings keep full precision, but stored booking times are whole
//! Unix milliseconds. Requested windows go through [`ceil_to_millis`] before
//! they are validated, so what is checked is exactly what is stored.

use std::sync::RwLock;

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Rounds `t` up to the next whole millisecond.
///
/// Whole-millisecond instants come back unchanged.
pub fn ceil_to_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    let floor = t.trunc_subsecs(3);
    if floor == t {
        t
    } else {
        floor + Duration::milliseconds(1)
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Samples the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used by tests and fixtures.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        ManualClock {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        // A poisoned lock still holds a valid timestamp.
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard = now;
    }

    /// Moves the clock forward (or backward for a negative duration).
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}
