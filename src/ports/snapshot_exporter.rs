//! Snapshot Exporter Port - writes a rendered, verified checklist somewhere.
//!
//! This is the single outbound capability of the checklist. The domain never
//! calls it directly; `ExportChecklistHandler` invokes it only with content
//! rendered from a `VerifiedSnapshot`.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RenderedChecklist;

/// Port for exporting rendered checklists.
///
/// # Contract
///
/// Implementations must:
/// - Treat `suggested_filename` as a bare file name, never a path
/// - Leave no partially written document behind on failure
/// - Report a SHA-256 checksum of the bytes actually exported
#[async_trait]
pub trait SnapshotExporter: Send + Sync {
    /// Format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Exports `rendered` under `suggested_filename`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if conversion or writing fails.
    async fn export_snapshot(
        &self,
        rendered: &RenderedChecklist,
        suggested_filename: &str,
    ) -> Result<ExportReceipt, ExportError>;

    /// Whether external dependencies (like Pandoc) are usable.
    async fn is_available(&self) -> bool;
}

/// Export formats supported by the exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Raw markdown (no conversion needed).
    Markdown,
    /// PDF document.
    #[default]
    Pdf,
}

impl ExportFormat {
    /// MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// `<org-prefix>-<site-code>-<procedure>-<ISO-date>.<ext>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameConvention {
    pub org_prefix: String,
    pub site_code: String,
    pub procedure: String,
}

impl Default for FilenameConvention {
    fn default() -> Self {
        Self {
            org_prefix: "PBE".to_string(),
            site_code: "CSS092".to_string(),
            procedure: "HV-Switching".to_string(),
        }
    }
}

impl FilenameConvention {
    pub fn new(
        org_prefix: impl Into<String>,
        site_code: impl Into<String>,
        procedure: impl Into<String>,
    ) -> Self {
        Self {
            org_prefix: org_prefix.into(),
            site_code: site_code.into(),
            procedure: procedure.into(),
        }
    }

    /// Builds the filename for an export made on `date`.
    ///
    /// # Errors
    ///
    /// `InvalidFilename` if a component is blank or contains a character
    /// that is unsafe in a file name.
    pub fn filename_for(&self, date: NaiveDate, format: ExportFormat) -> Result<String, ExportError> {
        for (field, value) in [
            ("org_prefix", &self.org_prefix),
            ("site_code", &self.site_code),
            ("procedure", &self.procedure),
        ] {
            validate_component(field, value)?;
        }
        Ok(format!(
            "{}-{}-{}-{}.{}",
            self.org_prefix,
            self.site_code,
            self.procedure,
            date.format("%Y-%m-%d"),
            format.extension()
        ))
    }
}

fn validate_component(field: &str, value: &str) -> Result<(), ExportError> {
    if value.trim().is_empty() {
        return Err(ExportError::InvalidFilename(format!("{} is empty", field)));
    }
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
    {
        return Err(ExportError::InvalidFilename(format!(
            "{} contains '{}'",
            field, c
        )));
    }
    Ok(())
}

/// Rejects anything that is not a plain file name.
pub fn ensure_bare_filename(filename: &str) -> Result<(), ExportError> {
    let is_bare = !filename.trim().is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0']);
    if is_bare {
        Ok(())
    } else {
        Err(ExportError::InvalidFilename(filename.to_string()))
    }
}

/// What an exporter wrote and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    pub filename: String,
    /// Filesystem path or adapter-specific URI.
    pub location: String,
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the exported bytes.
    pub checksum: String,
    pub format: ExportFormat,
}

/// Errors that can occur during export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// External converter (e.g., Pandoc) is not available.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("PDF conversion failed: {0}")]
    PdfConversionFailed(String),

    #[error("Invalid export filename: {0}")]
    InvalidFilename(String),

    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),

    #[error("I/O error during export: {0}")]
    IoError(String),
}

impl ExportError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfConversionFailed(reason.into())
    }

    pub fn io_error(reason: impl Into<String>) -> Self {
        Self::IoError(reason.into())
    }

    /// Whether retrying the same export might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExportError::ServiceUnavailable(_) | ExportError::Timeout(_) | ExportError::IoError(_)
        )
    }
}
