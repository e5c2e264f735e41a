//! State transition engine.
//!
//! Pure functions from (store, step, action) to a new store. Each action
//! either produces a store with exactly one record replaced, or returns an
//! equal copy of the input when the action's precondition does not hold.
//! Only an unknown step id is an error.
//!
//! The clock is not read here: callers pass `now`, which keeps every
//! function deterministic.

use tracing::debug;

use super::{Actor, VerificationError, VerificationRecord, VerificationStore};
use crate::domain::foundation::{StepId, Timestamp};

/// Sets an actor's name on a step. Stored as typed, untrimmed.
pub fn set_actor_name(
    store: &VerificationStore,
    step_id: &StepId,
    actor: Actor,
    name: impl Into<String>,
) -> Result<VerificationStore, VerificationError> {
    let name = name.into();
    update(store, step_id, |record| {
        let mut next = record.clone();
        next.actor_mut(actor).name = name;
        Some(next)
    })
}

/// Flips an actor's completion on a step.
///
/// No-op when the actor's trimmed name is empty. Completing stamps `now`;
/// un-completing clears the completion time and any secondary confirmation.
pub fn toggle_completion(
    store: &VerificationStore,
    step_id: &StepId,
    actor: Actor,
    now: Timestamp,
) -> Result<VerificationStore, VerificationError> {
    update(store, step_id, |record| {
        let current = record.actor(actor);
        if !current.has_name() {
            debug!(step_id = %step_id, actor = %actor, "completion toggle ignored: no name");
            return None;
        }

        let mut next = record.clone();
        let slot = next.actor_mut(actor);
        slot.verification = slot.verification.toggled_completion(now);
        Some(next)
    })
}

/// Flips an actor's secondary (lock/tag) confirmation on a step.
///
/// No-op when the actor has not completed the step, or when the step does
/// not require secondary confirmation.
pub fn toggle_secondary_confirmation(
    store: &VerificationStore,
    step_id: &StepId,
    actor: Actor,
    now: Timestamp,
) -> Result<VerificationStore, VerificationError> {
    update(store, step_id, |record| {
        if !record.requires_secondary_confirmation() {
            debug!(step_id = %step_id, actor = %actor, "confirmation toggle ignored: not required");
            return None;
        }

        let toggled = record.actor(actor).verification.toggled_confirmation(now);
        let Some(verification) = toggled else {
            debug!(step_id = %step_id, actor = %actor, "confirmation toggle ignored: not completed");
            return None;
        };

        let mut next = record.clone();
        next.actor_mut(actor).verification = verification;
        Some(next)
    })
}

/// Sets the free-text note of a step.
pub fn set_note(
    store: &VerificationStore,
    step_id: &StepId,
    text: impl Into<String>,
) -> Result<VerificationStore, VerificationError> {
    let text = text.into();
    update(store, step_id, |record| {
        let mut next = record.clone();
        next.note = text;
        Some(next)
    })
}

/// Applies `change` to one record. `None` from `change` means "no-op".
fn update<F>(
    store: &VerificationStore,
    step_id: &StepId,
    change: F,
) -> Result<VerificationStore, VerificationError>
where
    F: FnOnce(&VerificationRecord) -> Option<VerificationRecord>,
{
    let record = store.get(step_id)?;
    let mut next = store.clone();
    if let Some(updated) = change(record) {
        next.replace(step_id, updated)?;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Sequence, Step, StepCatalog};
    use crate::domain::foundation::StateMachine;
    use proptest::prelude::*;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs).unwrap()
    }

    fn id(s: &str) -> StepId {
        StepId::new(s).unwrap()
    }

    /// "plain" needs no secondary confirmation, "locked" does.
    fn two_step_store() -> VerificationStore {
        let catalog = StepCatalog::new(vec![
            Step::new(id("plain"), Sequence::DeEnergise, 1),
            Step::new(id("locked"), Sequence::DeEnergise, 2).requiring_secondary_confirmation(),
        ])
        .unwrap();
        VerificationStore::initialize(&catalog)
    }

    fn named(store: &VerificationStore, step: &str, actor: Actor) -> VerificationStore {
        set_actor_name(store, &id(step), actor, "Alice").unwrap()
    }

    // ───────────────────────────────────────────────────────────────
    // set_actor_name
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn set_actor_name_stores_untrimmed() {
        let store = set_actor_name(&two_step_store(), &id("plain"), Actor::B, "  Bob ").unwrap();
        assert_eq!(store.get(&id("plain")).unwrap().actor_name(Actor::B), "  Bob ");
        assert_eq!(store.get(&id("plain")).unwrap().actor_name(Actor::A), "");
    }

    // ───────────────────────────────────────────────────────────────
    // toggle_completion
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn toggle_completion_without_name_is_noop() {
        let store = two_step_store();
        let after = toggle_completion(&store, &id("plain"), Actor::A, ts(1)).unwrap();
        assert_eq!(after, store);
    }

    #[test]
    fn toggle_completion_with_blank_name_is_noop() {
        let store = set_actor_name(&two_step_store(), &id("plain"), Actor::A, " \t ").unwrap();
        let after = toggle_completion(&store, &id("plain"), Actor::A, ts(1)).unwrap();
        assert_eq!(after, store);
    }

    #[test]
    fn toggle_completion_stamps_time() {
        let store = named(&two_step_store(), "plain", Actor::A);
        let after = toggle_completion(&store, &id("plain"), Actor::A, ts(42)).unwrap();

        let record = after.get(&id("plain")).unwrap();
        assert!(record.completed(Actor::A));
        assert_eq!(record.completed_at(Actor::A), Some(ts(42)));
        assert!(!record.completed(Actor::B));
    }

    #[test]
    fn toggle_completion_twice_clears_time() {
        let store = named(&two_step_store(), "plain", Actor::A);
        let once = toggle_completion(&store, &id("plain"), Actor::A, ts(1)).unwrap();
        let twice = toggle_completion(&once, &id("plain"), Actor::A, ts(2)).unwrap();

        let record = twice.get(&id("plain")).unwrap();
        assert!(!record.completed(Actor::A));
        assert_eq!(record.completed_at(Actor::A), None);
        assert_eq!(twice, store);
    }

    #[test]
    fn clearing_completion_cascades_to_confirmation() {
        let store = named(&two_step_store(), "locked", Actor::B);
        let store = toggle_completion(&store, &id("locked"), Actor::B, ts(1)).unwrap();
        let store = toggle_secondary_confirmation(&store, &id("locked"), Actor::B, ts(2)).unwrap();
        assert!(store.get(&id("locked")).unwrap().secondary_confirmed(Actor::B));

        let store = toggle_completion(&store, &id("locked"), Actor::B, ts(3)).unwrap();
        let record = store.get(&id("locked")).unwrap();
        assert!(!record.completed(Actor::B));
        assert!(!record.secondary_confirmed(Actor::B));
        assert_eq!(record.secondary_confirmed_at(Actor::B), None);
    }

    #[test]
    fn completed_actor_can_uncomplete_only_while_named() {
        let store = named(&two_step_store(), "plain", Actor::A);
        let store = toggle_completion(&store, &id("plain"), Actor::A, ts(1)).unwrap();
        let store = set_actor_name(&store, &id("plain"), Actor::A, "").unwrap();

        let after = toggle_completion(&store, &id("plain"), Actor::A, ts(2)).unwrap();
        assert!(after.get(&id("plain")).unwrap().completed(Actor::A));
    }

    // ───────────────────────────────────────────────────────────────
    // toggle_secondary_confirmation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn confirmation_before_completion_is_noop() {
        let store = named(&two_step_store(), "locked", Actor::A);
        let after = toggle_secondary_confirmation(&store, &id("locked"), Actor::A, ts(1)).unwrap();

        assert_eq!(after, store);
        assert_eq!(
            after.get(&id("locked")).unwrap().secondary_confirmed_at(Actor::A),
            None
        );
    }

    #[test]
    fn confirmation_toggles_with_timestamps() {
        let store = named(&two_step_store(), "locked", Actor::A);
        let store = toggle_completion(&store, &id("locked"), Actor::A, ts(1)).unwrap();

        let confirmed = toggle_secondary_confirmation(&store, &id("locked"), Actor::A, ts(5)).unwrap();
        let record = confirmed.get(&id("locked")).unwrap();
        assert!(record.secondary_confirmed(Actor::A));
        assert_eq!(record.secondary_confirmed_at(Actor::A), Some(ts(5)));
        assert_eq!(record.completed_at(Actor::A), Some(ts(1)));

        let unconfirmed =
            toggle_secondary_confirmation(&confirmed, &id("locked"), Actor::A, ts(6)).unwrap();
        assert_eq!(unconfirmed, store);
    }

    #[test]
    fn confirmation_on_step_without_requirement_is_noop() {
        let store = named(&two_step_store(), "plain", Actor::A);
        let store = toggle_completion(&store, &id("plain"), Actor::A, ts(1)).unwrap();

        let after = toggle_secondary_confirmation(&store, &id("plain"), Actor::A, ts(2)).unwrap();
        assert_eq!(after, store);
    }

    // ───────────────────────────────────────────────────────────────
    // set_note and unknown ids
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn set_note_is_unconditional() {
        let store = set_note(&two_step_store(), &id("locked"), "Padlock 7 used").unwrap();
        assert_eq!(store.get(&id("locked")).unwrap().note(), "Padlock 7 used");
    }

    #[test]
    fn unknown_step_is_not_found_for_every_action() {
        let store = two_step_store();
        let missing = id("nope");
        let expected = VerificationError::StepNotFound(missing.clone());

        assert_eq!(set_note(&store, &missing, "x").unwrap_err(), expected);
        assert_eq!(set_actor_name(&store, &missing, Actor::A, "x").unwrap_err(), expected);
        assert_eq!(toggle_completion(&store, &missing, Actor::A, ts(0)).unwrap_err(), expected);
        assert_eq!(
            toggle_secondary_confirmation(&store, &missing, Actor::B, ts(0)).unwrap_err(),
            expected
        );
    }

    #[test]
    fn actions_do_not_touch_other_steps() {
        let store = named(&two_step_store(), "plain", Actor::A);
        let store = toggle_completion(&store, &id("plain"), Actor::A, ts(1)).unwrap();
        let store = set_note(&store, &id("plain"), "done").unwrap();

        assert_eq!(
            store.get(&id("locked")).unwrap(),
            two_step_store().get(&id("locked")).unwrap()
        );
    }

    // ───────────────────────────────────────────────────────────────
    // Properties
    // ───────────────────────────────────────────────────────────────

    #[derive(Debug, Clone)]
    enum Op {
        Name(bool, Actor, String),
        Complete(bool, Actor),
        Confirm(bool, Actor),
        Note(bool, String),
    }

    fn actor_strategy() -> impl Strategy<Value = Actor> {
        prop_oneof![Just(Actor::A), Just(Actor::B)]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<bool>(), actor_strategy(), prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-z]{1,6}"])
                .prop_map(|(s, a, n)| Op::Name(s, a, n)),
            (any::<bool>(), actor_strategy()).prop_map(|(s, a)| Op::Complete(s, a)),
            (any::<bool>(), actor_strategy()).prop_map(|(s, a)| Op::Confirm(s, a)),
            (any::<bool>(), "[a-z ]{0,8}").prop_map(|(s, n)| Op::Note(s, n)),
        ]
    }

    fn step_for(locked: bool) -> StepId {
        if locked {
            id("locked")
        } else {
            id("plain")
        }
    }

    fn apply(store: &VerificationStore, op: &Op, now: Timestamp) -> VerificationStore {
        match op {
            Op::Name(s, a, n) => set_actor_name(store, &step_for(*s), *a, n.clone()),
            Op::Complete(s, a) => toggle_completion(store, &step_for(*s), *a, now),
            Op::Confirm(s, a) => toggle_secondary_confirmation(store, &step_for(*s), *a, now),
            Op::Note(s, n) => set_note(store, &step_for(*s), n.clone()),
        }
        .unwrap()
    }

    proptest! {
        #[test]
        fn double_completion_toggle_round_trips(
            ops in prop::collection::vec(op_strategy(), 0..20),
            locked in any::<bool>(),
            actor in actor_strategy(),
        ) {
            let mut store = two_step_store();
            for (i, op) in ops.iter().enumerate() {
                store = apply(&store, op, ts(i as i64));
            }
            let step = step_for(locked);
            let before = store.get(&step).unwrap().clone();

            let once = toggle_completion(&store, &step, actor, ts(100)).unwrap();
            let twice = toggle_completion(&once, &step, actor, ts(101)).unwrap();
            let after = twice.get(&step).unwrap();

            prop_assert_eq!(after.completed(actor), before.completed(actor));
            if !before.completed(actor) {
                prop_assert_eq!(after.completed_at(actor), None);
            }
        }

        #[test]
        fn confirmation_never_outlives_completion(
            ops in prop::collection::vec(op_strategy(), 0..40),
        ) {
            let mut store = two_step_store();
            for (i, op) in ops.iter().enumerate() {
                store = apply(&store, op, ts(i as i64));
                for step in [id("plain"), id("locked")] {
                    let record = store.get(&step).unwrap();
                    for actor in Actor::BOTH {
                        if record.secondary_confirmed(actor) {
                            prop_assert!(record.completed(actor));
                            prop_assert!(record.requires_secondary_confirmation());
                        }
                        prop_assert_eq!(record.completed(actor), record.completed_at(actor).is_some());
                        prop_assert_eq!(
                            record.secondary_confirmed(actor),
                            record.secondary_confirmed_at(actor).is_some()
                        );
                    }
                }
            }
        }

        #[test]
        fn every_transition_is_allowed_by_phase_machine(
            ops in prop::collection::vec(op_strategy(), 0..40),
        ) {
            let mut store = two_step_store();
            for (i, op) in ops.iter().enumerate() {
                let next = apply(&store, op, ts(i as i64));
                for step in [id("plain"), id("locked")] {
                    for actor in Actor::BOTH {
                        let from = store.get(&step).unwrap().actor(actor).phase();
                        let to = next.get(&step).unwrap().actor(actor).phase();
                        if from != to {
                            prop_assert!(
                                from.can_transition_to(&to),
                                "illegal {:?} -> {:?} via {:?}", from, to, op
                            );
                        }
                    }
                }
                store = next;
            }
        }

        #[test]
        fn completion_toggle_without_name_never_mutates(
            ops in prop::collection::vec(op_strategy(), 0..20),
            locked in any::<bool>(),
            actor in actor_strategy(),
        ) {
            let mut store = two_step_store();
            for (i, op) in ops.iter().enumerate() {
                store = apply(&store, op, ts(i as i64));
            }
            let step = step_for(locked);
            let store = set_actor_name(&store, &step, actor, "   ").unwrap();

            let after = toggle_completion(&store, &step, actor, ts(500)).unwrap();
            prop_assert_eq!(after, store);
        }
    }
}
