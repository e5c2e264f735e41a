//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Clock` - current time for timestamped transitions
//! - `ChecklistRenderer` - session to portable document content
//! - `SnapshotExporter` - writes a rendered, verified checklist

mod checklist_renderer;
mod clock;
mod snapshot_exporter;

pub use checklist_renderer::{ChecklistRenderer, RenderedChecklist};
pub use clock::Clock;
pub use snapshot_exporter::{
    ensure_bare_filename, ExportError, ExportFormat, ExportReceipt, FilenameConvention,
    SnapshotExporter,
};
