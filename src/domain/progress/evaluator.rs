//! Derived read-only computations over a catalog and its verification store.

use crate::domain::catalog::{Step, StepCatalog};
use crate::domain::foundation::Percentage;
use crate::domain::verification::{Actor, FormMetadata, VerificationRecord, VerificationStore};

/// Units of `step` that `record` satisfies.
///
/// Each actor's completion is one unit; each actor's secondary confirmation
/// is one more, counted only when the step requires it.
pub fn satisfied_units(step: &Step, record: &VerificationRecord) -> usize {
    Actor::BOTH
        .into_iter()
        .map(|actor| {
            let completed = usize::from(record.completed(actor));
            let confirmed = if step.requires_secondary_confirmation() {
                usize::from(record.secondary_confirmed(actor))
            } else {
                0
            };
            completed + confirmed
        })
        .sum()
}

/// Per-step condition: both actors completed and, where required, both
/// confirmed.
pub fn is_step_verified(step: &Step, record: &VerificationRecord) -> bool {
    Actor::BOTH.into_iter().all(|actor| {
        record.completed(actor)
            && (!step.requires_secondary_confirmation() || record.secondary_confirmed(actor))
    })
}

/// Every actor who completed the step still has a name on it.
///
/// A name can be cleared after completion; such a step counts toward
/// progress but cannot be exported.
pub fn is_step_attributed(record: &VerificationRecord) -> bool {
    Actor::BOTH.into_iter().all(|actor| {
        let slot = record.actor(actor);
        !slot.is_completed() || slot.has_name()
    })
}

/// Verified and attributed. Missing records never are.
pub(crate) fn is_step_certifiable(step: &Step, store: &VerificationStore) -> bool {
    store
        .get(step.id())
        .map(|record| is_step_verified(step, record) && is_step_attributed(record))
        .unwrap_or(false)
}

/// Share of satisfied units across the whole catalog.
///
/// A step missing from the store contributes its units to the total but
/// none to the numerator.
pub fn completion_percentage(catalog: &StepCatalog, store: &VerificationStore) -> Percentage {
    let satisfied: usize = catalog
        .steps()
        .iter()
        .filter_map(|step| store.get(step.id()).ok().map(|r| satisfied_units(step, r)))
        .sum();
    Percentage::from_ratio(satisfied, catalog.total_units())
}

/// Whether every step is verified and attributed and both signatures are
/// present.
///
/// This is the single gate in front of export.
pub fn is_fully_verified(
    catalog: &StepCatalog,
    store: &VerificationStore,
    metadata: &FormMetadata,
) -> bool {
    catalog
        .steps()
        .iter()
        .all(|step| is_step_certifiable(step, store))
        && metadata.signatures_complete()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Sequence;
    use crate::domain::foundation::{StepId, Timestamp};
    use crate::domain::verification::transitions;
    use proptest::prelude::*;

    fn id(s: &str) -> StepId {
        StepId::new(s).unwrap()
    }

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs).unwrap()
    }

    fn single_step_catalog(locked: bool) -> StepCatalog {
        let step = Step::new(id("s1"), Sequence::DeEnergise, 1).with_device("Q1");
        let step = if locked {
            step.requiring_secondary_confirmation()
        } else {
            step
        };
        StepCatalog::new(vec![step]).unwrap()
    }

    fn complete(store: &VerificationStore, step: &str, actor: Actor) -> VerificationStore {
        let store = transitions::set_actor_name(store, &id(step), actor, "Tech").unwrap();
        transitions::toggle_completion(&store, &id(step), actor, ts(1)).unwrap()
    }

    fn confirm(store: &VerificationStore, step: &str, actor: Actor) -> VerificationStore {
        transitions::toggle_secondary_confirmation(store, &id(step), actor, ts(2)).unwrap()
    }

    fn all_steps_verified(catalog: &StepCatalog, store: &VerificationStore) -> bool {
        catalog.steps().iter().all(|step| {
            store
                .get(step.id())
                .map(|record| is_step_verified(step, record))
                .unwrap_or(false)
        })
    }

    fn signed() -> FormMetadata {
        let mut metadata = FormMetadata::default();
        metadata.set_signature(Actor::A, "Alice Smith");
        metadata.set_signature(Actor::B, "Bob Jones");
        metadata
    }

    #[test]
    fn empty_catalog_is_zero_percent() {
        let catalog = StepCatalog::new(Vec::new()).unwrap();
        let store = VerificationStore::initialize(&catalog);
        assert_eq!(completion_percentage(&catalog, &store), Percentage::ZERO);
    }

    #[test]
    fn one_of_two_units_is_fifty_percent() {
        let catalog = single_step_catalog(false);
        let store = VerificationStore::initialize(&catalog);
        let store = complete(&store, "s1", Actor::A);
        assert_eq!(completion_percentage(&catalog, &store).value(), 50);
    }

    #[test]
    fn locked_step_counts_four_units() {
        let catalog = single_step_catalog(true);
        let store = VerificationStore::initialize(&catalog);
        let store = complete(&store, "s1", Actor::A);
        assert_eq!(completion_percentage(&catalog, &store).value(), 25);

        let store = confirm(&store, "s1", Actor::A);
        assert_eq!(completion_percentage(&catalog, &store).value(), 50);
    }

    #[test]
    fn step_verified_needs_both_actors() {
        let catalog = single_step_catalog(false);
        let step = &catalog.steps()[0];
        let store = complete(&VerificationStore::initialize(&catalog), "s1", Actor::A);
        assert!(!is_step_verified(step, store.get(&id("s1")).unwrap()));

        let store = complete(&store, "s1", Actor::B);
        assert!(is_step_verified(step, store.get(&id("s1")).unwrap()));
    }

    #[test]
    fn locked_step_verified_needs_confirmations() {
        let catalog = single_step_catalog(true);
        let step = &catalog.steps()[0];
        let store = VerificationStore::initialize(&catalog);
        let store = complete(&complete(&store, "s1", Actor::A), "s1", Actor::B);
        assert!(!is_step_verified(step, store.get(&id("s1")).unwrap()));

        let store = confirm(&confirm(&store, "s1", Actor::A), "s1", Actor::B);
        assert!(is_step_verified(step, store.get(&id("s1")).unwrap()));
    }

    #[test]
    fn fully_verified_requires_signatures() {
        let catalog = single_step_catalog(false);
        let store = VerificationStore::initialize(&catalog);
        let store = complete(&complete(&store, "s1", Actor::A), "s1", Actor::B);

        assert!(completion_percentage(&catalog, &store).is_complete());
        assert!(!is_fully_verified(&catalog, &store, &FormMetadata::default()));
        assert!(is_fully_verified(&catalog, &store, &signed()));
    }

    #[test]
    fn whitespace_signature_does_not_count() {
        let catalog = single_step_catalog(false);
        let store = VerificationStore::initialize(&catalog);
        let store = complete(&complete(&store, "s1", Actor::A), "s1", Actor::B);
        let mut metadata = signed();
        metadata.set_signature(Actor::B, "   ");
        assert!(!is_fully_verified(&catalog, &store, &metadata));
    }

    #[test]
    fn clearing_a_completed_name_blocks_full_verification() {
        let catalog = single_step_catalog(false);
        let store = VerificationStore::initialize(&catalog);
        let store = complete(&complete(&store, "s1", Actor::A), "s1", Actor::B);
        let store = transitions::set_actor_name(&store, &id("s1"), Actor::B, "  ").unwrap();

        let record = store.get(&id("s1")).unwrap();
        assert!(is_step_verified(&catalog.steps()[0], record));
        assert!(!is_step_attributed(record));
        assert!(completion_percentage(&catalog, &store).is_complete());
        assert!(!is_fully_verified(&catalog, &store, &signed()));
    }

    #[test]
    fn store_from_another_catalog_is_not_verified() {
        let catalog = single_step_catalog(false);
        let other = StepCatalog::new(vec![Step::new(id("x1"), Sequence::Energise, 1)]).unwrap();
        let store = VerificationStore::initialize(&other);
        assert_eq!(completion_percentage(&catalog, &store), Percentage::ZERO);
        assert!(!is_fully_verified(&catalog, &store, &signed()));
    }

    #[derive(Debug, Clone)]
    enum Unit {
        Complete(usize, Actor),
        Confirm(usize, Actor),
    }

    fn unit_strategy(len: usize) -> impl Strategy<Value = Unit> {
        let actor = prop_oneof![Just(Actor::A), Just(Actor::B)];
        (0..len, actor, any::<bool>()).prop_map(|(i, actor, confirm)| {
            if confirm {
                Unit::Confirm(i, actor)
            } else {
                Unit::Complete(i, actor)
            }
        })
    }

    /// Satisfies one more unit if it is not already satisfied.
    fn satisfy(catalog: &StepCatalog, store: &VerificationStore, unit: &Unit) -> VerificationStore {
        match unit {
            Unit::Complete(i, actor) => {
                let step = catalog.steps()[*i].id().as_str();
                if store.get(&id(step)).unwrap().completed(*actor) {
                    store.clone()
                } else {
                    complete(store, step, *actor)
                }
            }
            Unit::Confirm(i, actor) => {
                let step = catalog.steps()[*i].id().as_str();
                let record = store.get(&id(step)).unwrap();
                if record.completed(*actor) && !record.secondary_confirmed(*actor) {
                    confirm(store, step, *actor)
                } else {
                    store.clone()
                }
            }
        }
    }

    proptest! {
        #[test]
        fn percentage_never_decreases_as_units_are_satisfied(
            units in proptest::collection::vec(unit_strategy(16), 0..80)
        ) {
            let catalog = StepCatalog::css092_hv_switching();
            let mut store = VerificationStore::initialize(&catalog);
            let mut last = completion_percentage(&catalog, &store);

            for unit in &units {
                store = satisfy(&catalog, &store, unit);
                let now = completion_percentage(&catalog, &store);
                prop_assert!(now >= last, "{} dropped to {}", last, now);
                last = now;
            }
        }

        #[test]
        fn hundred_percent_iff_every_step_verified(
            units in proptest::collection::vec(unit_strategy(16), 0..200)
        ) {
            let catalog = StepCatalog::css092_hv_switching();
            let mut store = VerificationStore::initialize(&catalog);
            for unit in &units {
                store = satisfy(&catalog, &store, unit);
            }

            prop_assert_eq!(
                completion_percentage(&catalog, &store).is_complete(),
                all_steps_verified(&catalog, &store)
            );
        }
    }
}
