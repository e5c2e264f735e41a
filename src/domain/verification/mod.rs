//! Verification module - per-step dual-actor verification state.
//!
//! # Components
//!
//! - `VerificationStore` - one `VerificationRecord` per catalog step
//! - `transitions` - pure state-in/state-out actions enforcing invariants
//! - `ActorPhase` - the per-(step, actor) lifecycle as a state machine
//! - `ChecklistSession` - store plus form metadata, the unit the UI holds
//! - `SessionDocument` - a saved session awaiting `ChecklistSession::restore`

mod action;
mod actor;
mod errors;
mod metadata;
mod phase;
mod record;
mod session;
mod store;
pub mod transitions;

pub use action::ChecklistAction;
pub use actor::Actor;
pub use errors::VerificationError;
pub use metadata::FormMetadata;
pub use phase::ActorPhase;
pub use record::{ActorRecord, ActorVerification, VerificationRecord};
pub use session::{ChecklistSession, SessionDocument};
pub use store::VerificationStore;
