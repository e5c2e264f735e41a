//! ExportChecklistHandler - gates, renders and exports a checklist session.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::catalog::StepCatalog;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::progress::{certify, GateError, VerifiedSnapshot};
use crate::domain::verification::ChecklistSession;
use crate::ports::{
    ChecklistRenderer, Clock, ExportError, ExportReceipt, FilenameConvention, SnapshotExporter,
};

/// Command to export a filled checklist.
#[derive(Debug, Clone)]
pub struct ExportChecklistCommand {
    pub session: ChecklistSession,
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportChecklistResult {
    pub receipt: ExportReceipt,
    pub snapshot: VerifiedSnapshot,
}

/// Why an export did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportChecklistError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<ExportChecklistError> for DomainError {
    fn from(err: ExportChecklistError) -> Self {
        match err {
            ExportChecklistError::Gate(gate) => gate.into(),
            ExportChecklistError::Export(export) => {
                DomainError::new(ErrorCode::ExportFailed, export.to_string())
            }
        }
    }
}

/// Handler for exporting checklists.
pub struct ExportChecklistHandler {
    catalog: Arc<StepCatalog>,
    renderer: Arc<dyn ChecklistRenderer>,
    exporter: Arc<dyn SnapshotExporter>,
    convention: FilenameConvention,
    clock: Arc<dyn Clock>,
}

impl ExportChecklistHandler {
    pub fn new(
        catalog: Arc<StepCatalog>,
        renderer: Arc<dyn ChecklistRenderer>,
        exporter: Arc<dyn SnapshotExporter>,
        convention: FilenameConvention,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            renderer,
            exporter,
            convention,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: ExportChecklistCommand,
    ) -> Result<ExportChecklistResult, ExportChecklistError> {
        // 1. Gate
        let snapshot = certify(&self.catalog, &cmd.session).map_err(|err| {
            warn!(
                unverified_steps = err.unverified_steps().len(),
                missing_signatures = err.missing_signatures().len(),
                "export refused: {}",
                err
            );
            err
        })?;

        // 2. Render and export
        let receipt = self.export_verified(&snapshot).await?;

        Ok(ExportChecklistResult { receipt, snapshot })
    }

    /// Exports an already certified snapshot.
    pub async fn export_verified(
        &self,
        snapshot: &VerifiedSnapshot,
    ) -> Result<ExportReceipt, ExportError> {
        let rendered = self.renderer.render(&self.catalog, snapshot.session());
        let format = self.exporter.format();
        let filename = self
            .convention
            .filename_for(self.clock.now().date(), format)?;

        info!(%filename, %format, bytes = rendered.len(), "exporting verified checklist");

        let receipt = self
            .exporter
            .export_snapshot(&rendered, &filename)
            .await
            .map_err(|err| {
                warn!(%filename, error = %err, "checklist export failed");
                err
            })?;

        info!(
            location = %receipt.location,
            checksum = %receipt.checksum,
            size_bytes = receipt.size_bytes,
            "checklist exported"
        );
        Ok(receipt)
    }
}
