//! Markdown checklist renderer adapter.
//!
//! Renders a checklist session into the layout of the paper form: header,
//! metadata block, overall completion, one table per sequence, typed
//! signatures and a footer. The markdown is what `PandocPdfExporter` turns
//! into the PDF record.

use crate::domain::catalog::{Sequence, Step, StepCatalog};
use crate::domain::progress::{is_step_verified, ProgressReport};
use crate::domain::verification::{Actor, ChecklistSession, VerificationRecord};
use crate::ports::{ChecklistRenderer, RenderedChecklist};

const DEFAULT_TITLE: &str = "High Voltage Switching – Technician Verification";
const DEFAULT_FOOTER: &str = "HV Switching • Dual Technician Verification";

/// Fixed-template implementation of `ChecklistRenderer`.
#[derive(Debug, Clone)]
pub struct MarkdownChecklistRenderer {
    title: String,
    footer: String,
}

impl Default for MarkdownChecklistRenderer {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
        }
    }
}

impl MarkdownChecklistRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    fn render_header(&self, session: &ChecklistSession) -> String {
        let metadata = session.metadata();
        let mut header = format!("# {}\n\n", self.title);
        header.push_str(&format!("**Site:** {}  \n", or_dash(metadata.site_name())));
        header.push_str(&format!(
            "**Work Order / Permit Ref:** {}  \n",
            or_dash(metadata.work_order())
        ));
        header.push_str(&format!("**Date/Time:** {}\n\n", or_dash(metadata.date_time())));
        header
    }

    fn render_progress(&self, report: &ProgressReport) -> String {
        let mut section = format!(
            "**Overall Completion:** {} ({} of {} units, {} of {} steps verified)\n\n",
            report.overall(),
            report.satisfied_units(),
            report.total_units(),
            report.verified_steps(),
            report.total_steps()
        );
        for progress in report.sequences() {
            section.push_str(&format!(
                "- {}: {}\n",
                progress.sequence.label(),
                progress.percentage()
            ));
        }
        section.push('\n');
        section
    }

    fn render_sequence(
        &self,
        catalog: &StepCatalog,
        session: &ChecklistSession,
        sequence: Sequence,
    ) -> String {
        let mut section = format!("## {}\n\n", sequence.title());
        let mut steps = catalog.sequence(sequence).peekable();
        if steps.peek().is_none() {
            section.push_str("*No steps*\n\n");
            return section;
        }

        section.push_str(
            "| Step | Location | Action | Items | Safety Person | Technician A | Technician B | Locks | Verified | Notes |\n",
        );
        section.push_str("|---|---|---|---|---|---|---|---|---|---|\n");
        for step in steps {
            section.push_str(&self.render_row(step, session.store().get(step.id()).ok()));
        }
        section.push('\n');
        section
    }

    fn render_row(&self, step: &Step, record: Option<&VerificationRecord>) -> String {
        let (a, b, locks, verified, note) = match record {
            Some(record) => (
                actor_cell(record, Actor::A),
                actor_cell(record, Actor::B),
                locks_cell(step, record),
                if is_step_verified(step, record) { "Yes" } else { "No" },
                cell(record.note()),
            ),
            None => ("-".into(), "-".into(), "-".into(), "No", String::new()),
        };
        format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            cell(&step.heading()),
            cell(step.location()),
            cell(step.action()),
            cell(step.items()),
            cell(step.safety_person()),
            a,
            b,
            locks,
            verified,
            note
        )
    }

    fn render_signatures(&self, session: &ChecklistSession) -> String {
        let mut section = String::from("## Signatures\n\n");
        for actor in Actor::BOTH {
            let signature = session.metadata().signature(actor);
            let value = if signature.trim().is_empty() {
                "*unsigned*".to_string()
            } else {
                signature.to_string()
            };
            section.push_str(&format!("- {} – Signature: {}\n", actor.label(), value));
        }
        section.push('\n');
        section
    }
}

impl ChecklistRenderer for MarkdownChecklistRenderer {
    fn render(&self, catalog: &StepCatalog, session: &ChecklistSession) -> RenderedChecklist {
        let report = ProgressReport::evaluate(catalog, session.store());

        let mut doc = self.render_header(session);
        doc.push_str(&self.render_progress(&report));
        for sequence in Sequence::ALL {
            doc.push_str(&self.render_sequence(catalog, session, sequence));
        }
        doc.push_str(&self.render_signatures(session));
        doc.push_str("---\n\n");
        doc.push_str(&format!("*{}*\n", self.footer));

        RenderedChecklist::new(self.title.clone(), doc)
    }
}

fn actor_cell(record: &VerificationRecord, actor: Actor) -> String {
    let name = record.actor_name(actor).trim();
    match record.completed_at(actor) {
        Some(at) => format!("{} ✓ {}", cell(name), at),
        None if !name.is_empty() => format!("{} (not checked)", cell(name)),
        None => "-".to_string(),
    }
}

fn locks_cell(step: &Step, record: &VerificationRecord) -> String {
    if !step.requires_secondary_confirmation() {
        return "n/a".to_string();
    }
    Actor::BOTH
        .into_iter()
        .map(|actor| match record.secondary_confirmed_at(actor) {
            Some(at) => format!("Locks On ({}) {}", actor, at),
            None => format!("Locks Not Applied ({})", actor),
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Makes free text safe inside a single table cell.
fn cell(text: &str) -> String {
    text.trim()
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
