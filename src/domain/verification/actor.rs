//! Actor enum - the two independent technicians verifying each step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two technicians who must each confirm every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Actor {
    A,
    B,
}

impl Actor {
    /// Both actors, A first.
    pub const BOTH: [Actor; 2] = [Actor::A, Actor::B];

    /// The other technician.
    pub fn other(&self) -> Actor {
        match self {
            Actor::A => Actor::B,
            Actor::B => Actor::A,
        }
    }

    /// Human-readable label, e.g. `Technician A`.
    pub fn label(&self) -> &'static str {
        match self {
            Actor::A => "Technician A",
            Actor::B => "Technician B",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::A => write!(f, "A"),
            Actor::B => write!(f, "B"),
        }
    }
}
