//! Export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::ports::{ExportFormat, FilenameConvention};

/// Export configuration: filename convention, format and PDF conversion.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    #[serde(default = "default_org_prefix")]
    pub org_prefix: String,

    #[serde(default = "default_site_code")]
    pub site_code: String,

    #[serde(default = "default_procedure")]
    pub procedure: String,

    /// `pdf` (via Pandoc) or `markdown`
    #[serde(default)]
    pub format: ExportFormat,

    /// Directory exported documents are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Pandoc executable; searched on PATH when unset
    pub pandoc_path: Option<String>,

    /// PDF conversion timeout in seconds
    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,
}

impl ExportConfig {
    pub fn filename_convention(&self) -> FilenameConvention {
        FilenameConvention::new(&self.org_prefix, &self.site_code, &self.procedure)
    }

    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("org_prefix", &self.org_prefix),
            ("site_code", &self.site_code),
            ("procedure", &self.procedure),
        ] {
            let valid = !value.is_empty()
                && value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(ValidationError::InvalidFilenameComponent(field));
            }
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyOutputDir);
        }
        if self.pdf_timeout_secs == 0 || self.pdf_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if matches!(&self.pandoc_path, Some(path) if path.trim().is_empty()) {
            return Err(ValidationError::BlankPandocPath);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            org_prefix: default_org_prefix(),
            site_code: default_site_code(),
            procedure: default_procedure(),
            format: ExportFormat::default(),
            output_dir: default_output_dir(),
            pandoc_path: None,
            pdf_timeout_secs: default_pdf_timeout(),
        }
    }
}

fn default_org_prefix() -> String {
    "PBE".to_string()
}

fn default_site_code() -> String {
    "CSS092".to_string()
}

fn default_procedure() -> String {
    "HV-Switching".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./exports")
}

fn default_pdf_timeout() -> u64 {
    30
}
