//! Pinned clock for tests and reproducible renders.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can hand one clone to a handler
/// and advance the other.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<Timestamp>>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// # Panics
    ///
    /// If `secs` is outside the range chrono can represent.
    pub fn at_unix_secs(secs: i64) -> Self {
        Self::new(Timestamp::from_unix_secs(secs).expect("unix seconds in range"))
    }

    pub fn set(&self, now: Timestamp) {
        *self.guard() = now;
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.guard();
        *now = now.plus_secs(secs);
    }

    fn guard(&self) -> MutexGuard<'_, Timestamp> {
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.guard()
    }
}
