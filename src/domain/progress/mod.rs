//! Progress module - completion percentage and the export gate.

mod evaluator;
mod gate;
mod report;

pub use evaluator::{
    completion_percentage, is_fully_verified, is_step_attributed, is_step_verified, satisfied_units,
};
pub use gate::{certify, GateError, VerifiedSnapshot};
pub use report::{ProgressReport, SequenceProgress};
