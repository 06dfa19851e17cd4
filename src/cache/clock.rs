//! Clock Module
//!
//! Time sources used by cache entries to observe "now".

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, TimeDelta, Utc};

// == Clock Trait ==
/// Source of the current instant.
pub trait Clock {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

// == System Clock ==
/// Wall clock backed by `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// == Manual Clock ==
/// Clock whose instant only moves when told to.
///
/// Clones share the same instant, so a clock handed to an entry can still be
/// advanced from the outside.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Arc<RwLock<DateTime<Utc>>>,
}

impl ManualClock {
    // == Constructor ==
    /// Creates a clock frozen at `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Arc::new(RwLock::new(instant)),
        }
    }

    /// Creates a clock frozen at the current wall-clock instant.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    // == Set ==
    /// Moves the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.write().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    // == Advance ==
    /// Moves the clock forward (or backward, for negative deltas) by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut guard = self.instant.write().unwrap_or_else(PoisonError::into_inner);
        *guard = guard.checked_add_signed(delta).unwrap_or(*guard);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.read().unwrap_or_else(PoisonError::into_inner)
    }
}
