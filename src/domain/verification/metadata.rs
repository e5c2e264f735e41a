//! FormMetadata - header fields and typed signatures of the checklist.

use serde::{Deserialize, Serialize};

use super::Actor;
use crate::domain::catalog::StepCatalog;
use crate::domain::foundation::Timestamp;

/// Free-text header of the form.
///
/// Every field is independently editable and none is cross-validated; the
/// only rule that reads them is the export gate, which needs both
/// signatures to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormMetadata {
    site_name: String,
    work_order: String,
    date_time: String,
    signature_a: String,
    signature_b: String,
}

impl FormMetadata {
    /// Metadata pre-filled the way a fresh form opens: site from the catalog,
    /// date/time from the session start.
    pub fn for_catalog(catalog: &StepCatalog, started_at: Timestamp) -> Self {
        Self {
            site_name: catalog.site_label().to_string(),
            date_time: started_at.to_string(),
            ..Self::default()
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn work_order(&self) -> &str {
        &self.work_order
    }

    pub fn date_time(&self) -> &str {
        &self.date_time
    }

    /// Full-name signature typed by an actor.
    pub fn signature(&self, actor: Actor) -> &str {
        match actor {
            Actor::A => &self.signature_a,
            Actor::B => &self.signature_b,
        }
    }

    pub fn has_signature(&self, actor: Actor) -> bool {
        !self.signature(actor).trim().is_empty()
    }

    /// Actors whose signature is still blank.
    pub fn missing_signatures(&self) -> Vec<Actor> {
        Actor::BOTH
            .into_iter()
            .filter(|actor| !self.has_signature(*actor))
            .collect()
    }

    pub fn signatures_complete(&self) -> bool {
        Actor::BOTH.iter().all(|actor| self.has_signature(*actor))
    }

    pub fn set_site_name(&mut self, value: impl Into<String>) {
        self.site_name = value.into();
    }

    pub fn set_work_order(&mut self, value: impl Into<String>) {
        self.work_order = value.into();
    }

    pub fn set_date_time(&mut self, value: impl Into<String>) {
        self.date_time = value.into();
    }

    pub fn set_signature(&mut self, actor: Actor, value: impl Into<String>) {
        match actor {
            Actor::A => self.signature_a = value.into(),
            Actor::B => self.signature_b = value.into(),
        }
    }
}
