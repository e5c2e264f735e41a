//! ActorPhase - the per-(step, actor) verification lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ActorRecord, ActorVerification};
use crate::domain::foundation::StateMachine;

/// Where one actor stands on one step.
///
/// ```text
/// Unnamed ⇄ NamedNotCompleted ⇄ Completed ⇄ CompletedAndConfirmed
///                ^                                   |
///                └───────── completion cleared ──────┘
/// ```
///
/// `CompletedAndConfirmed` is only reachable on steps that require
/// secondary confirmation. There is no terminal phase; a session simply ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorPhase {
    Unnamed,
    NamedNotCompleted,
    Completed,
    CompletedAndConfirmed,
}

impl ActorPhase {
    /// Derives the phase from a record.
    ///
    /// Completion wins over the name: clearing the name of an actor who has
    /// already completed does not un-complete the step.
    pub fn of(record: &ActorRecord) -> Self {
        match record.verification() {
            ActorVerification::Confirmed { .. } => ActorPhase::CompletedAndConfirmed,
            ActorVerification::Completed { .. } => ActorPhase::Completed,
            ActorVerification::Pending if record.has_name() => ActorPhase::NamedNotCompleted,
            ActorVerification::Pending => ActorPhase::Unnamed,
        }
    }
}

impl StateMachine for ActorPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ActorPhase::*;
        matches!(
            (self, target),
            // Name typed or erased
            (Unnamed, NamedNotCompleted) |
            (NamedNotCompleted, Unnamed) |
            // Completion toggle
            (NamedNotCompleted, Completed) |
            (Completed, NamedNotCompleted) |
            // Secondary confirmation toggle
            (Completed, CompletedAndConfirmed) |
            (CompletedAndConfirmed, Completed) |
            // Completion cleared while confirmed resets the confirmation too
            (CompletedAndConfirmed, NamedNotCompleted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ActorPhase::*;
        match self {
            Unnamed => vec![NamedNotCompleted],
            NamedNotCompleted => vec![Unnamed, Completed],
            Completed => vec![NamedNotCompleted, CompletedAndConfirmed],
            CompletedAndConfirmed => vec![Completed, NamedNotCompleted],
        }
    }
}

impl fmt::Display for ActorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActorPhase::Unnamed => "Unnamed",
            ActorPhase::NamedNotCompleted => "Named",
            ActorPhase::Completed => "Completed",
            ActorPhase::CompletedAndConfirmed => "Completed & Confirmed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    const ALL: [ActorPhase; 4] = [
        ActorPhase::Unnamed,
        ActorPhase::NamedNotCompleted,
        ActorPhase::Completed,
        ActorPhase::CompletedAndConfirmed,
    ];

    fn record(name: &str, verification: ActorVerification) -> ActorRecord {
        ActorRecord {
            name: name.to_string(),
            verification,
        }
    }

    #[test]
    fn unnamed_is_initial() {
        assert_eq!(ActorRecord::default().phase(), ActorPhase::Unnamed);
    }

    #[test]
    fn phase_derivation_covers_each_variant() {
        let t = Timestamp::from_unix_secs(0).unwrap();
        assert_eq!(
            record("Alice", ActorVerification::Pending).phase(),
            ActorPhase::NamedNotCompleted
        );
        assert_eq!(
            record("Alice", ActorVerification::Completed { completed_at: t }).phase(),
            ActorPhase::Completed
        );
        assert_eq!(
            record(
                "Alice",
                ActorVerification::Confirmed {
                    completed_at: t,
                    confirmed_at: t
                }
            )
            .phase(),
            ActorPhase::CompletedAndConfirmed
        );
    }

    #[test]
    fn completed_actor_keeps_phase_after_name_cleared() {
        let t = Timestamp::from_unix_secs(0).unwrap();
        assert_eq!(
            record("", ActorVerification::Completed { completed_at: t }).phase(),
            ActorPhase::Completed
        );
    }

    #[test]
    fn no_phase_is_terminal() {
        for phase in ALL {
            assert!(!phase.is_terminal(), "{:?} should not be terminal", phase);
        }
    }

    #[test]
    fn cannot_confirm_without_completing() {
        assert!(ActorPhase::NamedNotCompleted
            .transition_to(ActorPhase::CompletedAndConfirmed)
            .is_err());
        assert!(ActorPhase::Unnamed
            .transition_to(ActorPhase::Completed)
            .is_err());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }
}
