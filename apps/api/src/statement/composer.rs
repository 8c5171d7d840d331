//! Document Composer: intake record + variant → finished HTML statement.
//!
//! Flow: plan_document (pronouns, categories, labels, dates, optional sections)
//!       → render_html.
//!
//! Pure and deterministic: same record and variant give byte-identical output.
//! The record is trusted to satisfy the intake schema; see `intake::validation`.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::statement::model::{IntakeRecord, OutputFormat};
use crate::statement::render::render_html;
use crate::statement::sections::plan_document;

/// A composed statement ready for the PDF renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub format: OutputFormat,
    pub html: String,
}

impl RenderedDocument {
    /// Attachment filename used when the rendered PDF is delivered.
    pub fn suggested_filename(order_id: Uuid) -> String {
        format!("Reasonable_Adjustment_Statement_{order_id}.pdf")
    }
}

pub fn compose(record: &IntakeRecord, format: OutputFormat) -> RenderedDocument {
    let plan = plan_document(record, format);
    let html = render_html(&plan);
    debug!(
        "Composed {} statement: {} sections, {} bytes",
        format.as_str(),
        plan.sections.len(),
        html.len()
    );
    RenderedDocument { format, html }
}
