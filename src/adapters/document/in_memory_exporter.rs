//! In-memory snapshot exporter.
//!
//! Keeps every export in memory. Useful for testing and development.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::local_file_exporter::compute_checksum;
use crate::ports::{
    ensure_bare_filename, ExportError, ExportFormat, ExportReceipt, RenderedChecklist,
    SnapshotExporter,
};

/// One recorded export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredExport {
    pub filename: String,
    pub rendered: RenderedChecklist,
}

/// In-memory exporter with optional error injection.
#[derive(Debug, Clone)]
pub struct InMemorySnapshotExporter {
    format: ExportFormat,
    exports: Arc<RwLock<Vec<StoredExport>>>,
    fail_with: Arc<RwLock<Option<ExportError>>>,
}

impl InMemorySnapshotExporter {
    pub fn new() -> Self {
        Self::with_format(ExportFormat::Markdown)
    }

    pub fn with_format(format: ExportFormat) -> Self {
        Self {
            format,
            exports: Arc::new(RwLock::new(Vec::new())),
            fail_with: Arc::new(RwLock::new(None)),
        }
    }

    /// Every subsequent export fails with `error`.
    pub async fn fail_with(&self, error: ExportError) {
        *self.fail_with.write().await = Some(error);
    }

    pub async fn exports(&self) -> Vec<StoredExport> {
        self.exports.read().await.clone()
    }

    pub async fn export_count(&self) -> usize {
        self.exports.read().await.len()
    }

    pub async fn clear(&self) {
        self.exports.write().await.clear();
    }
}

impl Default for InMemorySnapshotExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotExporter for InMemorySnapshotExporter {
    fn format(&self) -> ExportFormat {
        self.format
    }

    async fn export_snapshot(
        &self,
        rendered: &RenderedChecklist,
        suggested_filename: &str,
    ) -> Result<ExportReceipt, ExportError> {
        if let Some(error) = self.fail_with.read().await.clone() {
            return Err(error);
        }
        ensure_bare_filename(suggested_filename)?;

        let bytes = rendered.markdown.as_bytes();
        let receipt = ExportReceipt {
            filename: suggested_filename.to_string(),
            location: format!("memory://{}", suggested_filename),
            size_bytes: bytes.len() as u64,
            checksum: compute_checksum(bytes),
            format: self.format,
        };

        self.exports.write().await.push(StoredExport {
            filename: suggested_filename.to_string(),
            rendered: rendered.clone(),
        });
        Ok(receipt)
    }

    async fn is_available(&self) -> bool {
        self.fail_with.read().await.is_none()
    }
}
