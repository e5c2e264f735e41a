//! StepCatalog - read-only ordered step definitions for both sequences.

use std::collections::HashMap;

use thiserror::Error;

use super::{Sequence, Step};
use crate::domain::foundation::{DomainError, ErrorCode, StepId};

/// Errors raised while assembling a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Step id '{0}' appears more than once")]
    DuplicateStepId(StepId),

    #[error("Step '{step_id}' in {sequence} has order {found}, expected {expected}")]
    OutOfOrder {
        step_id: StepId,
        sequence: Sequence,
        expected: u32,
        found: u32,
    },
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        let code = match &err {
            CatalogError::DuplicateStepId(_) => ErrorCode::DuplicateStep,
            CatalogError::OutOfOrder { .. } => ErrorCode::StepOutOfOrder,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Ordered, immutable set of steps for both sequences.
///
/// # Invariants
///
/// - Step ids are unique across every sequence
/// - Within a sequence, `sequence_order` runs 1, 2, 3, ... in the order given
/// - Iteration yields Sequence A steps before Sequence B steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    site_label: String,
    steps: Vec<Step>,
    index: HashMap<StepId, usize>,
}

impl StepCatalog {
    /// Builds a catalog from steps listed in procedure order.
    ///
    /// Steps may be given interleaved; they are grouped by sequence while
    /// keeping their relative order.
    ///
    /// # Errors
    ///
    /// - `DuplicateStepId` if two steps share an id
    /// - `OutOfOrder` if a sequence's orders are not 1..=n in listing order
    pub fn new(steps: Vec<Step>) -> Result<Self, CatalogError> {
        let mut ordered: Vec<Step> = Vec::with_capacity(steps.len());
        for sequence in Sequence::ALL {
            let mut expected = 1;
            for step in steps.iter().filter(|s| s.sequence() == sequence) {
                if step.sequence_order() != expected {
                    return Err(CatalogError::OutOfOrder {
                        step_id: step.id().clone(),
                        sequence,
                        expected,
                        found: step.sequence_order(),
                    });
                }
                expected += 1;
                ordered.push(step.clone());
            }
        }

        let mut index = HashMap::with_capacity(ordered.len());
        for (position, step) in ordered.iter().enumerate() {
            if index.insert(step.id().clone(), position).is_some() {
                return Err(CatalogError::DuplicateStepId(step.id().clone()));
            }
        }

        Ok(Self {
            site_label: String::new(),
            steps: ordered,
            index,
        })
    }

    /// Sets the site label used to pre-fill form metadata.
    pub fn with_site_label(mut self, label: impl Into<String>) -> Self {
        self.site_label = label.into();
        self
    }

    pub fn site_label(&self) -> &str {
        &self.site_label
    }

    /// Looks up a step by id.
    pub fn get(&self, step_id: &StepId) -> Option<&Step> {
        self.index.get(step_id).map(|&i| &self.steps[i])
    }

    pub fn contains(&self, step_id: &StepId) -> bool {
        self.index.contains_key(step_id)
    }

    /// All steps, Sequence A first, each sequence in defined order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps of one sequence in defined order.
    pub fn sequence(&self, sequence: Sequence) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.sequence() == sequence)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total verification units across all steps.
    pub fn total_units(&self) -> usize {
        self.steps.iter().map(Step::unit_count).sum()
    }
}
