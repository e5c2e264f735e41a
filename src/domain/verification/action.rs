//! ChecklistAction - user actions the presentation layer dispatches.

use serde::{Deserialize, Serialize};

use super::Actor;
use crate::domain::foundation::StepId;

/// A discrete user action against a checklist session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChecklistAction {
    SetActorName {
        step_id: StepId,
        actor: Actor,
        name: String,
    },
    ToggleCompletion {
        step_id: StepId,
        actor: Actor,
    },
    ToggleSecondaryConfirmation {
        step_id: StepId,
        actor: Actor,
    },
    SetNote {
        step_id: StepId,
        text: String,
    },
    SetSiteName {
        value: String,
    },
    SetWorkOrder {
        value: String,
    },
    SetDateTime {
        value: String,
    },
    SetSignature {
        actor: Actor,
        value: String,
    },
}

impl ChecklistAction {
    /// The step this action targets, if it is a step action.
    pub fn step_id(&self) -> Option<&StepId> {
        match self {
            ChecklistAction::SetActorName { step_id, .. }
            | ChecklistAction::ToggleCompletion { step_id, .. }
            | ChecklistAction::ToggleSecondaryConfirmation { step_id, .. }
            | ChecklistAction::SetNote { step_id, .. } => Some(step_id),
            ChecklistAction::SetSiteName { .. }
            | ChecklistAction::SetWorkOrder { .. }
            | ChecklistAction::SetDateTime { .. }
            | ChecklistAction::SetSignature { .. } => None,
        }
    }

    /// Whether applying this action reads the clock.
    pub fn is_timestamped(&self) -> bool {
        matches!(
            self,
            ChecklistAction::ToggleCompletion { .. }
                | ChecklistAction::ToggleSecondaryConfirmation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_actions_expose_step_id() {
        let action = ChecklistAction::ToggleCompletion {
            step_id: StepId::new("de1").unwrap(),
            actor: Actor::A,
        };
        assert_eq!(action.step_id().map(StepId::as_str), Some("de1"));
        assert!(action.is_timestamped());
    }

    #[test]
    fn metadata_actions_have_no_step() {
        let action = ChecklistAction::SetSignature {
            actor: Actor::B,
            value: "Bob Jones".to_string(),
        };
        assert!(action.step_id().is_none());
        assert!(!action.is_timestamped());
    }

    #[test]
    fn action_deserializes_from_tagged_json() {
        let json = r#"{"type":"set_note","step_id":"en3","text":"VPIS lit"}"#;
        let action: ChecklistAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            ChecklistAction::SetNote {
                step_id: StepId::new("en3").unwrap(),
                text: "VPIS lit".to_string(),
            }
        );
    }
}
