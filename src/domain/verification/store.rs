//! VerificationStore - one verification record per catalog step.

use std::collections::HashMap;

use serde::Serialize;

use super::{VerificationError, VerificationRecord};
use crate::domain::catalog::StepCatalog;
use crate::domain::foundation::StepId;

/// Mapping from step id to its verification record.
///
/// # Invariants
///
/// - A record exists for every step of the catalog it was initialized from
/// - Records are never added or removed after initialization
/// - Records are only ever replaced whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationStore {
    records: HashMap<StepId, VerificationRecord>,
}

impl VerificationStore {
    /// Creates one zero-valued record per catalog step.
    pub fn initialize(catalog: &StepCatalog) -> Self {
        let records = catalog
            .steps()
            .iter()
            .map(|step| (step.id().clone(), VerificationRecord::for_step(step)))
            .collect();
        Self { records }
    }

    /// Rebuilds a store from saved records, checked against `catalog`.
    ///
    /// # Errors
    ///
    /// - `MissingRecord` if a catalog step has no saved record
    /// - `UnexpectedRecord` if a saved record names a step outside the catalog
    /// - `CompletedWithoutName` / `ConfirmationNotRequired` for records the
    ///   transitions could not have produced
    pub fn restore(
        catalog: &StepCatalog,
        mut saved: HashMap<StepId, VerificationRecord>,
    ) -> Result<Self, VerificationError> {
        let mut records = HashMap::with_capacity(catalog.len());
        for step in catalog.steps() {
            let record = saved
                .remove(step.id())
                .ok_or_else(|| VerificationError::MissingRecord(step.id().clone()))?;
            records.insert(step.id().clone(), record.restored_for(step)?);
        }

        if let Some(unknown) = saved.into_keys().min() {
            return Err(VerificationError::UnexpectedRecord(unknown));
        }
        Ok(Self { records })
    }

    /// Returns the record for a step.
    ///
    /// # Errors
    ///
    /// - `StepNotFound` if the id is not part of the catalog
    pub fn get(&self, step_id: &StepId) -> Result<&VerificationRecord, VerificationError> {
        self.records
            .get(step_id)
            .ok_or_else(|| VerificationError::step_not_found(step_id))
    }

    /// Atomically swaps in a whole record.
    ///
    /// # Errors
    ///
    /// - `StepNotFound` if the id is not part of the catalog; the store is
    ///   left unchanged
    pub fn replace(
        &mut self,
        step_id: &StepId,
        record: VerificationRecord,
    ) -> Result<(), VerificationError> {
        match self.records.get_mut(step_id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(VerificationError::step_not_found(step_id)),
        }
    }

    pub fn contains(&self, step_id: &StepId) -> bool {
        self.records.contains_key(step_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
