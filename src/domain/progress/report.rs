//! ProgressReport value object - a snapshot of checklist progress.

use serde::Serialize;

use super::evaluator::{is_step_verified, satisfied_units};
use crate::domain::catalog::{Sequence, StepCatalog};
use crate::domain::foundation::{Percentage, StepId};
use crate::domain::verification::VerificationStore;

/// Progress of one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceProgress {
    pub sequence: Sequence,
    pub satisfied_units: usize,
    pub total_units: usize,
    pub verified_steps: usize,
    pub total_steps: usize,
}

impl SequenceProgress {
    pub fn percentage(&self) -> Percentage {
        Percentage::from_ratio(self.satisfied_units, self.total_units)
    }
}

/// A read-only snapshot of progress across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressReport {
    satisfied_units: usize,
    total_units: usize,
    sequences: Vec<SequenceProgress>,
    unverified: Vec<StepId>,
}

impl ProgressReport {
    /// Evaluates `store` against `catalog`.
    pub fn evaluate(catalog: &StepCatalog, store: &VerificationStore) -> Self {
        let mut sequences = Vec::with_capacity(Sequence::ALL.len());
        let mut unverified = Vec::new();

        for sequence in Sequence::ALL {
            let mut progress = SequenceProgress {
                sequence,
                satisfied_units: 0,
                total_units: 0,
                verified_steps: 0,
                total_steps: 0,
            };
            for step in catalog.sequence(sequence) {
                progress.total_units += step.unit_count();
                progress.total_steps += 1;
                match store.get(step.id()) {
                    Ok(record) if is_step_verified(step, record) => {
                        progress.satisfied_units += satisfied_units(step, record);
                        progress.verified_steps += 1;
                    }
                    Ok(record) => {
                        progress.satisfied_units += satisfied_units(step, record);
                        unverified.push(step.id().clone());
                    }
                    Err(_) => unverified.push(step.id().clone()),
                }
            }
            sequences.push(progress);
        }

        Self {
            satisfied_units: sequences.iter().map(|s| s.satisfied_units).sum(),
            total_units: sequences.iter().map(|s| s.total_units).sum(),
            sequences,
            unverified,
        }
    }

    pub fn satisfied_units(&self) -> usize {
        self.satisfied_units
    }

    pub fn total_units(&self) -> usize {
        self.total_units
    }

    pub fn overall(&self) -> Percentage {
        Percentage::from_ratio(self.satisfied_units, self.total_units)
    }

    /// Per-sequence breakdown in procedure order.
    pub fn sequences(&self) -> &[SequenceProgress] {
        &self.sequences
    }

    pub fn sequence(&self, sequence: Sequence) -> Option<&SequenceProgress> {
        self.sequences.iter().find(|s| s.sequence == sequence)
    }

    pub fn verified_steps(&self) -> usize {
        self.sequences.iter().map(|s| s.verified_steps).sum()
    }

    pub fn total_steps(&self) -> usize {
        self.sequences.iter().map(|s| s.total_steps).sum()
    }

    /// Steps not yet verified, in procedure order.
    pub fn unverified_steps(&self) -> &[StepId] {
        &self.unverified
    }

    pub fn first_unverified(&self) -> Option<&StepId> {
        self.unverified.first()
    }

    pub fn all_steps_verified(&self) -> bool {
        self.unverified.is_empty()
    }
}
