//! Saved sessions read back from JSON, as the CLI does before export.

use serde_json::{json, Value};

use switching_checklist::adapters::FixedClock;
use switching_checklist::domain::catalog::StepCatalog;
use switching_checklist::domain::foundation::StepId;
use switching_checklist::domain::progress::certify;
use switching_checklist::domain::verification::{
    Actor, ChecklistSession, SessionDocument, VerificationError,
};
use switching_checklist::ports::Clock;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn restore(catalog: &StepCatalog, json: &Value) -> Result<ChecklistSession, VerificationError> {
    let document: SessionDocument = serde_json::from_value(json.clone()).unwrap();
    ChecklistSession::restore(catalog, document)
}

fn signed_json(session: &ChecklistSession) -> Value {
    let mut json = serde_json::to_value(session).unwrap();
    json["metadata"]["signature_a"] = "Alice Smith".into();
    json["metadata"]["signature_b"] = "Bob Jones".into();
    json
}

fn verified_session(catalog: &StepCatalog, clock: &FixedClock) -> ChecklistSession {
    let mut session = ChecklistSession::initialize(catalog, clock);
    for step in catalog.steps() {
        for (actor, who) in [(Actor::A, "Alice"), (Actor::B, "Bob")] {
            session = session.set_actor_name(step.id(), actor, who).unwrap();
            session = session.toggle_completion(step.id(), actor, clock.now()).unwrap();
            if step.requires_secondary_confirmation() {
                session = session
                    .toggle_secondary_confirmation(step.id(), actor, clock.now())
                    .unwrap();
            }
        }
    }
    session
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn hand_edited_confirmations_without_names_are_rejected() {
    let catalog = StepCatalog::css092_hv_switching();
    let clock = FixedClock::at_unix_secs(1_705_314_600);
    let mut json = signed_json(&ChecklistSession::initialize(&catalog, &clock));

    let confirmed = json!({
        "name": "",
        "verification": {
            "state": "confirmed",
            "completed_at": "2024-01-15T10:30:00Z",
            "confirmed_at": "2024-01-15T10:30:00Z"
        }
    });
    let records = json["store"]["records"].as_object_mut().unwrap();
    for record in records.values_mut() {
        record["actor_a"] = confirmed.clone();
        record["actor_b"] = confirmed.clone();
        record["requires_secondary_confirmation"] = false.into();
    }

    let err = restore(&catalog, &json).unwrap_err();
    assert!(matches!(err, VerificationError::CompletedWithoutName { .. }));
}

#[test]
fn confirmation_on_step_without_locks_is_rejected() {
    let catalog = StepCatalog::css092_hv_switching();
    let clock = FixedClock::at_unix_secs(1_705_314_600);
    let mut json = signed_json(&verified_session(&catalog, &clock));

    json["store"]["records"]["de3"]["actor_b"]["verification"] = json!({
        "state": "confirmed",
        "completed_at": "2024-01-15T10:30:00Z",
        "confirmed_at": "2024-01-15T10:30:00Z"
    });

    assert_eq!(
        restore(&catalog, &json).unwrap_err(),
        VerificationError::ConfirmationNotRequired {
            step_id: StepId::new("de3").unwrap(),
            actor: Actor::B,
        }
    );
}

#[test]
fn dropped_record_is_rejected() {
    let catalog = StepCatalog::css092_hv_switching();
    let clock = FixedClock::at_unix_secs(1_705_314_600);
    let mut json = signed_json(&verified_session(&catalog, &clock));
    json["store"]["records"].as_object_mut().unwrap().remove("en4");

    assert_eq!(
        restore(&catalog, &json).unwrap_err(),
        VerificationError::MissingRecord(StepId::new("en4").unwrap())
    );
}

#[test]
fn saved_verified_session_restores_and_certifies() {
    let catalog = StepCatalog::css092_hv_switching();
    let clock = FixedClock::at_unix_secs(1_705_314_600);
    let json = signed_json(&verified_session(&catalog, &clock));

    let session = restore(&catalog, &json).unwrap();

    assert!(session.is_fully_verified(&catalog));
    assert!(certify(&catalog, &session).is_ok());
}

#[test]
fn unlocking_a_step_in_the_file_cannot_skip_confirmations() {
    let catalog = StepCatalog::css092_hv_switching();
    let clock = FixedClock::at_unix_secs(1_705_314_600);
    let mut session = ChecklistSession::initialize(&catalog, &clock);
    for step in catalog.steps() {
        for actor in Actor::BOTH {
            session = session.set_actor_name(step.id(), actor, actor.label()).unwrap();
            session = session.toggle_completion(step.id(), actor, clock.now()).unwrap();
        }
    }
    let mut json = signed_json(&session);
    json["store"]["records"]["de1"]["requires_secondary_confirmation"] = false.into();

    let session = restore(&catalog, &json).unwrap();
    let err = certify(&catalog, &session).unwrap_err();

    assert!(err.unverified_steps().contains(&StepId::new("de1").unwrap()));
    let de1 = session.store().get(&StepId::new("de1").unwrap()).unwrap();
    assert!(de1.requires_secondary_confirmation());
}
