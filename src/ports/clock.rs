//! Clock Port - source of "now" for timestamped transitions.
//!
//! The transition engine takes `now` as an argument; callers read it from
//! a `Clock` so tests can pin time.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
