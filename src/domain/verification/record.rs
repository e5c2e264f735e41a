//! Verification records - per-step, per-actor completion state.

use serde::{Deserialize, Serialize};

use super::{Actor, ActorPhase, VerificationError};
use crate::domain::catalog::Step;
use crate::domain::foundation::Timestamp;

/// Completion state of one actor on one step.
///
/// A tagged variant rather than independent flags: secondary confirmation
/// can only exist on top of a completion, so "confirmed but not completed"
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ActorVerification {
    #[default]
    Pending,
    Completed {
        completed_at: Timestamp,
    },
    Confirmed {
        completed_at: Timestamp,
        confirmed_at: Timestamp,
    },
}

impl ActorVerification {
    pub fn is_completed(&self) -> bool {
        !matches!(self, ActorVerification::Pending)
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, ActorVerification::Confirmed { .. })
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        match self {
            ActorVerification::Pending => None,
            ActorVerification::Completed { completed_at }
            | ActorVerification::Confirmed { completed_at, .. } => Some(*completed_at),
        }
    }

    pub fn confirmed_at(&self) -> Option<Timestamp> {
        match self {
            ActorVerification::Confirmed { confirmed_at, .. } => Some(*confirmed_at),
            _ => None,
        }
    }

    /// Flips completion. Clearing completion also drops any confirmation.
    pub(crate) fn toggled_completion(self, now: Timestamp) -> Self {
        match self {
            ActorVerification::Pending => ActorVerification::Completed { completed_at: now },
            ActorVerification::Completed { .. } | ActorVerification::Confirmed { .. } => {
                ActorVerification::Pending
            }
        }
    }

    /// Flips secondary confirmation, or `None` when not yet completed.
    pub(crate) fn toggled_confirmation(self, now: Timestamp) -> Option<Self> {
        match self {
            ActorVerification::Pending => None,
            ActorVerification::Completed { completed_at } => Some(ActorVerification::Confirmed {
                completed_at,
                confirmed_at: now,
            }),
            ActorVerification::Confirmed { completed_at, .. } => {
                Some(ActorVerification::Completed { completed_at })
            }
        }
    }
}

/// One actor's entry on a step: the typed name plus verification state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActorRecord {
    pub(crate) name: String,
    pub(crate) verification: ActorVerification,
}

impl ActorRecord {
    /// Name exactly as typed (untrimmed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the name has visible characters.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn verification(&self) -> ActorVerification {
        self.verification
    }

    pub fn is_completed(&self) -> bool {
        self.verification.is_completed()
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.verification.completed_at()
    }

    pub fn is_secondary_confirmed(&self) -> bool {
        self.verification.is_confirmed()
    }

    pub fn secondary_confirmed_at(&self) -> Option<Timestamp> {
        self.verification.confirmed_at()
    }

    /// Lifecycle phase derived from name and verification.
    pub fn phase(&self) -> ActorPhase {
        ActorPhase::of(self)
    }
}

/// Mutable verification state for one step.
///
/// Records are values: the store swaps whole records, so every record it
/// hands out is internally consistent.
///
/// The lock requirement is copied from the catalog step and never
/// serialized; a restored record takes it from the catalog again.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub(crate) actor_a: ActorRecord,
    pub(crate) actor_b: ActorRecord,
    pub(crate) note: String,
    #[serde(skip)]
    pub(crate) requires_secondary_confirmation: bool,
}

impl VerificationRecord {
    /// Zero-valued record for a catalog step.
    pub fn for_step(step: &Step) -> Self {
        Self {
            requires_secondary_confirmation: step.requires_secondary_confirmation(),
            ..Self::default()
        }
    }

    /// Binds a saved record to its catalog step.
    ///
    /// # Errors
    ///
    /// - `CompletedWithoutName` if an actor is completed with a blank name
    /// - `ConfirmationNotRequired` if an actor confirmed locks the step does
    ///   not require
    pub(crate) fn restored_for(mut self, step: &Step) -> Result<Self, VerificationError> {
        self.requires_secondary_confirmation = step.requires_secondary_confirmation();
        for actor in Actor::BOTH {
            let slot = self.actor(actor);
            if slot.is_completed() && !slot.has_name() {
                return Err(VerificationError::CompletedWithoutName {
                    step_id: step.id().clone(),
                    actor,
                });
            }
            if slot.is_secondary_confirmed() && !self.requires_secondary_confirmation {
                return Err(VerificationError::ConfirmationNotRequired {
                    step_id: step.id().clone(),
                    actor,
                });
            }
        }
        Ok(self)
    }

    pub fn actor(&self, actor: Actor) -> &ActorRecord {
        match actor {
            Actor::A => &self.actor_a,
            Actor::B => &self.actor_b,
        }
    }

    pub(crate) fn actor_mut(&mut self, actor: Actor) -> &mut ActorRecord {
        match actor {
            Actor::A => &mut self.actor_a,
            Actor::B => &mut self.actor_b,
        }
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Whether this step's secondary confirmation counts at all.
    pub fn requires_secondary_confirmation(&self) -> bool {
        self.requires_secondary_confirmation
    }

    // Flat accessors mirroring the per-actor fields of the paper form.

    pub fn actor_name(&self, actor: Actor) -> &str {
        self.actor(actor).name()
    }

    pub fn completed(&self, actor: Actor) -> bool {
        self.actor(actor).is_completed()
    }

    pub fn completed_at(&self, actor: Actor) -> Option<Timestamp> {
        self.actor(actor).completed_at()
    }

    pub fn secondary_confirmed(&self, actor: Actor) -> bool {
        self.actor(actor).is_secondary_confirmed()
    }

    pub fn secondary_confirmed_at(&self, actor: Actor) -> Option<Timestamp> {
        self.actor(actor).secondary_confirmed_at()
    }
}
