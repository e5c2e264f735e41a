//! Export gate - the only way to obtain a `VerifiedSnapshot`.

use std::fmt;

use thiserror::Error;

use super::evaluator::is_step_certifiable;
use super::ProgressReport;
use crate::domain::catalog::StepCatalog;
use crate::domain::foundation::{DomainError, ErrorCode, StepId};
use crate::domain::verification::{Actor, ChecklistSession};

/// Reasons the gate refused to certify a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Checklist not fully verified: {}", describe(.unverified_steps, .missing_signatures))]
    NotSatisfied {
        unverified_steps: Vec<StepId>,
        missing_signatures: Vec<Actor>,
    },
}

fn describe(unverified: &[StepId], missing: &[Actor]) -> String {
    let mut parts = Vec::new();
    if !unverified.is_empty() {
        let ids: Vec<&str> = unverified.iter().map(StepId::as_str).collect();
        parts.push(format!("unverified steps [{}]", ids.join(", ")));
    }
    if !missing.is_empty() {
        let actors: Vec<String> = missing.iter().map(Actor::to_string).collect();
        parts.push(format!("missing signatures [{}]", actors.join(", ")));
    }
    parts.join("; ")
}

impl GateError {
    pub fn unverified_steps(&self) -> &[StepId] {
        match self {
            GateError::NotSatisfied {
                unverified_steps, ..
            } => unverified_steps,
        }
    }

    pub fn missing_signatures(&self) -> &[Actor] {
        match self {
            GateError::NotSatisfied {
                missing_signatures, ..
            } => missing_signatures,
        }
    }
}

impl From<GateError> for DomainError {
    fn from(err: GateError) -> Self {
        let unverified = err.unverified_steps().len().to_string();
        let missing = err.missing_signatures().len().to_string();
        DomainError::new(ErrorCode::GateNotSatisfied, err.to_string())
            .with_detail("unverified_steps", unverified)
            .with_detail("missing_signatures", missing)
    }
}

/// A session that passed the gate.
///
/// Fields are private and there is no public constructor, so holding one
/// proves `certify` succeeded for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSnapshot {
    session: ChecklistSession,
    report: ProgressReport,
}

impl VerifiedSnapshot {
    pub fn session(&self) -> &ChecklistSession {
        &self.session
    }

    pub fn report(&self) -> &ProgressReport {
        &self.report
    }

    pub fn into_session(self) -> ChecklistSession {
        self.session
    }
}

impl fmt::Display for VerifiedSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "verified checklist ({} steps, started {})",
            self.report.total_steps(),
            self.session.started_at()
        )
    }
}

/// Checks every step and both signatures, returning a snapshot on success.
///
/// A step only passes when every actor who completed it is still named.
///
/// # Errors
///
/// - `GateError::NotSatisfied` listing what is still missing
pub fn certify(
    catalog: &StepCatalog,
    session: &ChecklistSession,
) -> Result<VerifiedSnapshot, GateError> {
    let unverified_steps: Vec<StepId> = catalog
        .steps()
        .iter()
        .filter(|step| !is_step_certifiable(step, session.store()))
        .map(|step| step.id().clone())
        .collect();
    let missing_signatures = session.metadata().missing_signatures();

    if !unverified_steps.is_empty() || !missing_signatures.is_empty() {
        return Err(GateError::NotSatisfied {
            unverified_steps,
            missing_signatures,
        });
    }

    let report = ProgressReport::evaluate(catalog, session.store());

    Ok(VerifiedSnapshot {
        session: session.clone(),
        report,
    })
}
