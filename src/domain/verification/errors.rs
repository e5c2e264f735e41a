//! Verification-specific error types.

use thiserror::Error;

use super::Actor;
use crate::domain::foundation::{DomainError, ErrorCode, StepId};

/// Errors raised by the verification store and transition engine.
///
/// Precondition violations (no name, not yet completed) are not errors;
/// they leave state unchanged. Only caller/catalog mismatches surface here,
/// plus saved sessions that the transitions could not have produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("Step not found: {0}")]
    StepNotFound(StepId),

    #[error("Saved session has no record for step {0}")]
    MissingRecord(StepId),

    #[error("Saved session has a record for unknown step {0}")]
    UnexpectedRecord(StepId),

    #[error("Step {step_id}: actor {actor} is completed without a name")]
    CompletedWithoutName { step_id: StepId, actor: Actor },

    #[error("Step {step_id}: actor {actor} confirmed locks on a step that needs none")]
    ConfirmationNotRequired { step_id: StepId, actor: Actor },
}

impl VerificationError {
    pub fn step_not_found(step_id: &StepId) -> Self {
        VerificationError::StepNotFound(step_id.clone())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            VerificationError::StepNotFound(_) => ErrorCode::StepNotFound,
            VerificationError::MissingRecord(_)
            | VerificationError::UnexpectedRecord(_)
            | VerificationError::CompletedWithoutName { .. }
            | VerificationError::ConfirmationNotRequired { .. } => ErrorCode::InvalidSession,
        }
    }

    /// The step the error is about.
    pub fn step_id(&self) -> &StepId {
        match self {
            VerificationError::StepNotFound(id)
            | VerificationError::MissingRecord(id)
            | VerificationError::UnexpectedRecord(id)
            | VerificationError::CompletedWithoutName { step_id: id, .. }
            | VerificationError::ConfirmationNotRequired { step_id: id, .. } => id,
        }
    }
}

impl From<VerificationError> for DomainError {
    fn from(err: VerificationError) -> Self {
        let step_id = err.step_id().as_str().to_string();
        DomainError::new(err.code(), err.to_string()).with_detail("step_id", step_id)
    }
}
