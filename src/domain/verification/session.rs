//! ChecklistSession - the complete, serializable state of one filled form.
//!
//! The presentation layer owns the single mutable reference to the current
//! session and replaces it with whatever `apply` returns. The session itself
//! is never mutated in place.
//!
//! Saved sessions are read back as a `SessionDocument` and only become a
//! `ChecklistSession` through `ChecklistSession::restore`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::transitions;
use super::{
    Actor, ChecklistAction, FormMetadata, VerificationError, VerificationRecord, VerificationStore,
};
use crate::domain::catalog::StepCatalog;
use crate::domain::foundation::{Percentage, StepId, Timestamp};
use crate::domain::progress;
use crate::ports::Clock;

/// Verification store plus form metadata for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistSession {
    store: VerificationStore,
    metadata: FormMetadata,
    started_at: Timestamp,
}

/// A serialized session, not yet checked against any catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDocument {
    store: StoreDocument,
    metadata: FormMetadata,
    started_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
struct StoreDocument {
    records: HashMap<StepId, VerificationRecord>,
}

impl ChecklistSession {
    /// Fresh session: one empty record per step, metadata pre-filled.
    pub fn initialize(catalog: &StepCatalog, clock: &dyn Clock) -> Self {
        let started_at = clock.now();
        Self {
            store: VerificationStore::initialize(catalog),
            metadata: FormMetadata::for_catalog(catalog, started_at),
            started_at,
        }
    }

    /// Rebuilds a saved session against `catalog`.
    ///
    /// # Errors
    ///
    /// Any `VerificationStore::restore` error.
    pub fn restore(
        catalog: &StepCatalog,
        document: SessionDocument,
    ) -> Result<Self, VerificationError> {
        Ok(Self {
            store: VerificationStore::restore(catalog, document.store.records)?,
            metadata: document.metadata,
            started_at: document.started_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn store(&self) -> &VerificationStore {
        &self.store
    }

    pub fn metadata(&self) -> &FormMetadata {
        &self.metadata
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies one user action, returning the next session.
    ///
    /// Actions whose precondition does not hold return an equal session.
    ///
    /// # Errors
    ///
    /// - `StepNotFound` if a step action names a step outside the catalog
    pub fn apply(
        &self,
        action: ChecklistAction,
        clock: &dyn Clock,
    ) -> Result<ChecklistSession, VerificationError> {
        match action {
            ChecklistAction::SetActorName {
                step_id,
                actor,
                name,
            } => self.set_actor_name(&step_id, actor, name),
            ChecklistAction::ToggleCompletion { step_id, actor } => {
                self.toggle_completion(&step_id, actor, clock.now())
            }
            ChecklistAction::ToggleSecondaryConfirmation { step_id, actor } => {
                self.toggle_secondary_confirmation(&step_id, actor, clock.now())
            }
            ChecklistAction::SetNote { step_id, text } => self.set_note(&step_id, text),
            ChecklistAction::SetSiteName { value } => {
                Ok(self.with_metadata(|m| m.set_site_name(value)))
            }
            ChecklistAction::SetWorkOrder { value } => {
                Ok(self.with_metadata(|m| m.set_work_order(value)))
            }
            ChecklistAction::SetDateTime { value } => {
                Ok(self.with_metadata(|m| m.set_date_time(value)))
            }
            ChecklistAction::SetSignature { actor, value } => {
                Ok(self.with_metadata(|m| m.set_signature(actor, value)))
            }
        }
    }

    pub fn set_actor_name(
        &self,
        step_id: &StepId,
        actor: Actor,
        name: impl Into<String>,
    ) -> Result<ChecklistSession, VerificationError> {
        let store = transitions::set_actor_name(&self.store, step_id, actor, name)?;
        Ok(self.with_store(store))
    }

    pub fn toggle_completion(
        &self,
        step_id: &StepId,
        actor: Actor,
        now: Timestamp,
    ) -> Result<ChecklistSession, VerificationError> {
        let store = transitions::toggle_completion(&self.store, step_id, actor, now)?;
        Ok(self.with_store(store))
    }

    pub fn toggle_secondary_confirmation(
        &self,
        step_id: &StepId,
        actor: Actor,
        now: Timestamp,
    ) -> Result<ChecklistSession, VerificationError> {
        let store = transitions::toggle_secondary_confirmation(&self.store, step_id, actor, now)?;
        Ok(self.with_store(store))
    }

    pub fn set_note(
        &self,
        step_id: &StepId,
        text: impl Into<String>,
    ) -> Result<ChecklistSession, VerificationError> {
        let store = transitions::set_note(&self.store, step_id, text)?;
        Ok(self.with_store(store))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived views
    // ─────────────────────────────────────────────────────────────────────────

    pub fn completion_percentage(&self, catalog: &StepCatalog) -> Percentage {
        progress::completion_percentage(catalog, &self.store)
    }

    pub fn is_fully_verified(&self, catalog: &StepCatalog) -> bool {
        progress::is_fully_verified(catalog, &self.store, &self.metadata)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn with_store(&self, store: VerificationStore) -> ChecklistSession {
        ChecklistSession {
            store,
            metadata: self.metadata.clone(),
            started_at: self.started_at,
        }
    }

    fn with_metadata(&self, edit: impl FnOnce(&mut FormMetadata)) -> ChecklistSession {
        let mut metadata = self.metadata.clone();
        edit(&mut metadata);
        ChecklistSession {
            store: self.store.clone(),
            metadata,
            started_at: self.started_at,
        }
    }
}
