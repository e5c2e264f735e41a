//! Step - one discrete action of a procedure requiring dual verification.

use serde::{Deserialize, Serialize};

use super::Sequence;
use crate::domain::foundation::StepId;

/// Immutable definition of a single checklist step.
///
/// Steps are built with [`Step::new`] and the `with_*` methods:
///
/// ```
/// use switching_checklist::domain::catalog::{Sequence, Step};
/// use switching_checklist::domain::foundation::StepId;
///
/// let step = Step::new(StepId::new("de2").unwrap(), Sequence::DeEnergise, 2)
///     .with_location("CSS092 RMU")
///     .with_device("Q11-1 Incomer")
///     .with_action("Open incomer; verify VPIS dark and apply lock.")
///     .requiring_secondary_confirmation();
///
/// assert!(step.requires_secondary_confirmation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    id: StepId,
    sequence: Sequence,
    sequence_order: u32,
    location: String,
    device: String,
    action: String,
    items: String,
    safety_person: String,
    requires_secondary_confirmation: bool,
}

impl Step {
    /// Creates a step with empty descriptive fields.
    pub fn new(id: StepId, sequence: Sequence, sequence_order: u32) -> Self {
        Self {
            id,
            sequence,
            sequence_order,
            location: String::new(),
            device: String::new(),
            action: String::new(),
            items: String::new(),
            safety_person: String::new(),
            requires_secondary_confirmation: false,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_items(mut self, items: impl Into<String>) -> Self {
        self.items = items.into();
        self
    }

    pub fn with_safety_person(mut self, safety_person: impl Into<String>) -> Self {
        self.safety_person = safety_person.into();
        self
    }

    /// Marks the step as needing a per-actor lock/tag confirmation.
    pub fn requiring_secondary_confirmation(mut self) -> Self {
        self.requires_secondary_confirmation = true;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &StepId {
        &self.id
    }

    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// 1-based position within the step's sequence.
    pub fn sequence_order(&self) -> u32 {
        self.sequence_order
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn items(&self) -> &str {
        &self.items
    }

    pub fn safety_person(&self) -> &str {
        &self.safety_person
    }

    pub fn requires_secondary_confirmation(&self) -> bool {
        self.requires_secondary_confirmation
    }

    /// Number of verification units this step contributes to progress.
    ///
    /// One per actor, plus one more per actor when secondary confirmation
    /// is required.
    pub fn unit_count(&self) -> usize {
        if self.requires_secondary_confirmation {
            4
        } else {
            2
        }
    }

    /// Display heading, e.g. `3. Q11-1E Earth Switch`.
    pub fn heading(&self) -> String {
        format!("{}. {}", self.sequence_order, self.device)
    }
}
