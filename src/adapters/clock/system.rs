//! Wall-clock adapter.

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Reads the system clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
