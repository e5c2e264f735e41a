//! Application handlers.
//!
//! Command handlers that orchestrate domain operations and ports.

mod export_checklist;

pub use export_checklist::{
    ExportChecklistCommand, ExportChecklistError, ExportChecklistHandler, ExportChecklistResult,
};
