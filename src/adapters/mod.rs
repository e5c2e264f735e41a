//! Adapters - Implementations of port interfaces.
//!
//! - `clock` - system and fixed clocks
//! - `document` - markdown rendering plus file, PDF and in-memory exporters

pub mod clock;
pub mod document;

pub use clock::{FixedClock, SystemClock};
pub use document::{
    InMemorySnapshotExporter, LocalFileExporter, MarkdownChecklistRenderer, PandocPdfExporter,
    StoredExport,
};
