//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole-number percentage between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Rounds `part / whole` to the nearest whole percent, halves rounding up.
    ///
    /// A zero `whole` is treated as one, so an empty total yields 0%.
    /// 100% is reserved for `part == whole`; an incomplete ratio that would
    /// round up to 100 reports 99.
    pub fn from_ratio(part: usize, whole: usize) -> Self {
        let whole = whole.max(1) as u64;
        let part = (part as u64).min(whole);
        // round(100 * part / whole) without floating point
        let rounded = (200 * part + whole) / (2 * whole);
        if part < whole {
            return Self::new(rounded.min(99) as u8);
        }
        Self::new(rounded as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// True at exactly 100%.
    pub fn is_complete(&self) -> bool {
        self.0 == 100
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
