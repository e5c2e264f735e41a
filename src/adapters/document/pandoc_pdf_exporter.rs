//! Pandoc-based PDF exporter.
//!
//! Converts the rendered markdown to PDF with an external Pandoc process and
//! writes the result atomically into the output directory.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::local_file_exporter::write_document;
use crate::ports::{ExportError, ExportFormat, ExportReceipt, RenderedChecklist, SnapshotExporter};

/// PDF exporter backed by Pandoc.
///
/// Pandoc must be installed. If it is not, exports fail with
/// `ServiceUnavailable` and nothing is written.
#[derive(Debug, Clone)]
pub struct PandocPdfExporter {
    output_dir: PathBuf,

    /// Path to pandoc executable. If None, will search PATH.
    pandoc_path: Option<String>,

    pdf_timeout_secs: u64,

    pdf_engine: String,
}

impl PandocPdfExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pandoc_path: None,
            pdf_timeout_secs: 30,
            pdf_engine: "xelatex".to_string(),
        }
    }

    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    pub fn with_pdf_engine(mut self, engine: impl Into<String>) -> Self {
        self.pdf_engine = engine.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    async fn check_pandoc(&self) -> bool {
        let output = Command::new(self.pandoc_command())
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        output.map(|o| o.status.success()).unwrap_or(false)
    }

    /// Runs Pandoc over `rendered`, returning the PDF bytes.
    async fn convert(&self, rendered: &RenderedChecklist) -> Result<Vec<u8>, ExportError> {
        if !self.check_pandoc().await {
            return Err(ExportError::service_unavailable(format!(
                "Pandoc not found at '{}'. PDF export requires Pandoc.",
                self.pandoc_command()
            )));
        }

        let mut child = Command::new(self.pandoc_command())
            .args(["-f", "markdown", "-t", "pdf", "-o", "-"])
            .arg(format!("--pdf-engine={}", self.pdf_engine))
            .args(["-V", "geometry:margin=1.5cm", "-V", "geometry:landscape"])
            .args(["-V", "fontsize=10pt"])
            .arg("--metadata")
            .arg(format!("title={}", rendered.title))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::pdf_failed(format!("Failed to start Pandoc: {}", e)))?;

        let stdin = child.stdin.take();
        let markdown = rendered.markdown.as_bytes();
        let conversion = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(markdown).await.map_err(|e| {
                    ExportError::pdf_failed(format!("Failed to write to Pandoc: {}", e))
                })?;
            }
            // stdin is closed here so Pandoc sees end of input.
            child
                .wait_with_output()
                .await
                .map_err(|e| ExportError::pdf_failed(format!("Pandoc execution failed: {}", e)))
        };

        let output = tokio::time::timeout(Duration::from_secs(self.pdf_timeout_secs), conversion)
            .await
            .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::pdf_failed(format!(
                "Pandoc returned error: {}",
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(ExportError::pdf_failed("Pandoc produced no output"));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl SnapshotExporter for PandocPdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    async fn export_snapshot(
        &self,
        rendered: &RenderedChecklist,
        suggested_filename: &str,
    ) -> Result<ExportReceipt, ExportError> {
        let pdf = self.convert(rendered).await?;
        write_document(&self.output_dir, suggested_filename, &pdf, ExportFormat::Pdf).await
    }

    async fn is_available(&self) -> bool {
        self.check_pandoc().await
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
