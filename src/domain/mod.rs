//! Domain layer containing the checklist's state and validation model.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - Immutable step catalog and the built-in CSS092 procedure
//! - `verification` - Per-step dual-actor state and the transition engine
//! - `progress` - Completion percentage, progress report and export gate

pub mod catalog;
pub mod foundation;
pub mod progress;
pub mod verification;
