//! Document adapters - rendering and exporting checklists.
//!
//! - `MarkdownChecklistRenderer` - renders a session as a markdown form
//! - `LocalFileExporter` - writes markdown to a local directory
//! - `PandocPdfExporter` - converts markdown to PDF via Pandoc
//! - `InMemorySnapshotExporter` - keeps exports in memory for tests

mod in_memory_exporter;
mod local_file_exporter;
mod markdown_renderer;
mod pandoc_pdf_exporter;

pub use in_memory_exporter::{InMemorySnapshotExporter, StoredExport};
pub use local_file_exporter::LocalFileExporter;
pub use markdown_renderer::MarkdownChecklistRenderer;
pub use pandoc_pdf_exporter::PandocPdfExporter;
