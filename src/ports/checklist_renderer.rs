//! Checklist Renderer Port - turns a session into portable document content.

use serde::Serialize;

use crate::domain::catalog::StepCatalog;
use crate::domain::verification::ChecklistSession;

/// Markdown rendering of a filled (or blank) checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedChecklist {
    /// Document title, also used as the PDF title.
    pub title: String,
    /// Full markdown body.
    pub markdown: String,
}

impl RenderedChecklist {
    pub fn new(title: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.markdown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty()
    }
}

/// Port for rendering a checklist session.
///
/// # Contract
///
/// Implementations must:
/// - Be pure: the same catalog and session render the same content
/// - List every catalog step in procedure order
/// - Never mutate or re-validate the session
///
/// Rendering is not gated; only export is. The export handler renders
/// `VerifiedSnapshot::session()`.
pub trait ChecklistRenderer: Send + Sync {
    fn render(&self, catalog: &StepCatalog, session: &ChecklistSession) -> RenderedChecklist;
}
