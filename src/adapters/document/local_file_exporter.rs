//! Local filesystem exporter - writes rendered checklists as markdown files.
//!
//! Uses atomic writes and SHA-256 checksums for data integrity. The PDF
//! exporter reuses `write_document` for its output.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{
    ensure_bare_filename, ExportError, ExportFormat, ExportReceipt, RenderedChecklist,
    SnapshotExporter,
};

/// Maximum document size accepted (10 MB).
const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Writes markdown exports into a single directory.
///
/// # Atomic Writes
///
/// 1. Write content to `{filename}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{filename}`
///
/// An export that fails midway leaves no file under the final name.
#[derive(Debug, Clone)]
pub struct LocalFileExporter {
    output_dir: PathBuf,
}

impl LocalFileExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl SnapshotExporter for LocalFileExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    async fn export_snapshot(
        &self,
        rendered: &RenderedChecklist,
        suggested_filename: &str,
    ) -> Result<ExportReceipt, ExportError> {
        write_document(
            &self.output_dir,
            suggested_filename,
            rendered.markdown.as_bytes(),
            ExportFormat::Markdown,
        )
        .await
    }

    async fn is_available(&self) -> bool {
        fs::create_dir_all(&self.output_dir).await.is_ok()
    }
}

/// Hex-encoded SHA-256 of `content`.
pub(crate) fn compute_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Atomically writes `content` to `dir/filename` and describes the result.
pub(crate) async fn write_document(
    dir: &Path,
    filename: &str,
    content: &[u8],
    format: ExportFormat,
) -> Result<ExportReceipt, ExportError> {
    ensure_bare_filename(filename)?;

    let size = content.len() as u64;
    if size > MAX_DOCUMENT_BYTES {
        return Err(ExportError::io_error(format!(
            "Document of {} bytes exceeds limit of {} bytes",
            size, MAX_DOCUMENT_BYTES
        )));
    }

    fs::create_dir_all(dir).await.map_err(|e| {
        ExportError::io_error(format!(
            "Failed to create export directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let final_path = dir.join(filename);
    let temp_path = dir.join(format!("{}.tmp", filename));

    let result = write_and_rename(&temp_path, &final_path, content).await;
    if result.is_err() {
        // Best effort; the original error is what matters.
        let _ = fs::remove_file(&temp_path).await;
    }
    result?;

    Ok(ExportReceipt {
        filename: filename.to_string(),
        location: final_path.display().to_string(),
        size_bytes: size,
        checksum: compute_checksum(content),
        format,
    })
}

async fn write_and_rename(
    temp_path: &Path,
    final_path: &Path,
    content: &[u8],
) -> Result<(), ExportError> {
    let mut file = fs::File::create(temp_path).await.map_err(|e| {
        ExportError::io_error(format!(
            "Failed to create temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;

    file.write_all(content).await.map_err(|e| {
        ExportError::io_error(format!(
            "Failed to write to temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;

    file.sync_all().await.map_err(|e| {
        ExportError::io_error(format!(
            "Failed to sync temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;

    fs::rename(temp_path, final_path).await.map_err(|e| {
        ExportError::io_error(format!(
            "Failed to rename {} to {}: {}",
            temp_path.display(),
            final_path.display(),
            e
        ))
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
