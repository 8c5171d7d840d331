//! HTML rendering of a `DocumentPlan`.
//!
//! Output is one self-contained page: inline stylesheet, A4 page rule, no
//! external fonts, images or scripts. Every interpolated string goes through
//! `escape_html`.

use crate::statement::formatting::escape_html;
use crate::statement::sections::{
    DocumentPlan, Inline, LabeledLine, Section, Signatory, Timeline, BLANK_LINE,
};

const STYLESHEET: &str = r#"
  @page { size: A4; margin: 20mm; }
  body { font-family: 'Georgia', serif; color: #1a1a1a; margin: 40px; line-height: 1.7; font-size: 12pt; }
  h1 { font-size: 20pt; color: #1a5c5c; border-bottom: 2px solid #1a5c5c; padding-bottom: 8px; }
  h2 { font-size: 14pt; color: #1a5c5c; margin-top: 24px; }
  h3 { font-size: 12pt; color: #2a7a7a; margin-top: 16px; }
  .subtitle { font-size: 11pt; color: #666; }
  .header-meta { color: #666; font-size: 10pt; margin-bottom: 24px; }
  .legal-ref { background: #f0f7f7; padding: 12px 16px; border-left: 3px solid #2a7a7a; margin: 16px 0; font-size: 10pt; color: #444; }
  ul { padding-left: 20px; }
  li { margin-bottom: 4px; }
  table.timeline { width: 100%; border-collapse: collapse; margin-top: 12px; font-size: 11pt; }
  table.timeline td { padding: 8px; border: 1px solid #ddd; }
  table.timeline tr.timeline-head { background: #f0f7f7; font-weight: bold; }
  .signature-block { margin-top: 40px; border-top: 1px solid #ddd; padding-top: 20px; }
  .signature-block p.signatory { margin-top: 24px; }
  .footer { margin-top: 40px; font-size: 9pt; color: #888; border-top: 1px solid #eee; padding-top: 12px; }
"#;

/// Renders the plan to a complete HTML document.
pub fn render_html(plan: &DocumentPlan) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\" />\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(plan.title)));
    html.push_str(&format!("<style>{STYLESHEET}</style>\n</head>\n<body>\n\n"));

    html.push_str(&format!("<h1>{}</h1>\n", escape_html(plan.title)));
    if let Some(subtitle) = plan.subtitle {
        html.push_str(&format!("<p class=\"subtitle\">{}</p>\n", escape_html(subtitle)));
    }

    for section in &plan.sections {
        html.push('\n');
        render_section(&mut html, section);
    }

    html.push_str("\n</body>\n</html>\n");
    html
}

fn render_section(html: &mut String, section: &Section) {
    match section {
        Section::Header { lines } => {
            html.push_str("<div class=\"header-meta\">\n");
            html.push_str(&labeled_lines(lines));
            html.push_str("\n</div>\n");
        }
        Section::LegalBasis { label, text } => {
            html.push_str(&format!(
                "<div class=\"legal-ref\"><strong>{}:</strong> {}</div>\n",
                escape_html(label),
                escape_html(text)
            ));
        }
        Section::Salutation { addressee, body } => {
            html.push_str(&format!("<h2>Dear {},</h2>\n", escape_html(addressee)));
            paragraph(html, body);
        }
        Section::Background { heading, body } => {
            heading2(html, heading);
            html.push_str(&format!("<p>{}</p>\n", inline_runs(body)));
        }
        Section::Strengths {
            heading,
            strengths,
            closing,
        } => {
            heading2(html, heading);
            paragraph(html, strengths);
            paragraph(html, closing);
        }
        Section::Barriers {
            heading,
            intro,
            areas,
            details,
        } => {
            heading2(html, heading);
            paragraph(html, intro);
            bullet_list(html, areas);
            if let Some(details) = details {
                html.push_str(&format!(
                    "<p><strong>{}:</strong> {}</p>\n",
                    escape_html(details.label),
                    escape_html(&details.value)
                ));
            }
        }
        Section::Adjustments {
            heading,
            intro,
            groups,
            additional,
        } => {
            heading2(html, heading);
            paragraph(html, intro);
            for group in groups {
                html.push_str(&format!("<h3>{}</h3>\n", escape_html(group.category)));
                bullet_list(html, &group.items);
            }
            if let Some(additional) = additional {
                html.push_str(&format!("<h3>{}</h3>\n", escape_html(additional.heading)));
                paragraph(html, &additional.text);
            }
        }
        Section::Implementation { heading, timeline } => {
            heading2(html, heading);
            match timeline {
                Timeline::Prose(paragraphs) => {
                    for text in paragraphs {
                        paragraph(html, text);
                    }
                }
                Timeline::Table(steps) => {
                    html.push_str("<table class=\"timeline\">\n");
                    html.push_str(
                        "  <tr class=\"timeline-head\"><td>Action</td><td>Timeframe</td></tr>\n",
                    );
                    for step in steps {
                        html.push_str(&format!(
                            "  <tr class=\"timeline-step\"><td>{}</td><td>{}</td></tr>\n",
                            escape_html(&step.action),
                            escape_html(step.timeframe)
                        ));
                    }
                    html.push_str("</table>\n");
                }
            }
        }
        Section::Signatures {
            prepared_by,
            signatories,
        } => {
            html.push_str("<div class=\"signature-block\">\n");
            html.push_str(&format!("<p>{}</p>\n", labeled_lines(prepared_by)));
            for signatory in signatories {
                render_signatory(html, signatory);
            }
            html.push_str("</div>\n");
        }
        Section::Footer {
            confidentiality,
            attribution,
        } => {
            html.push_str("<div class=\"footer\">\n");
            html.push_str(&format!(
                "<p><strong>Confidentiality Notice:</strong> {}</p>\n",
                escape_html(confidentiality)
            ));
            paragraph(html, attribution);
            html.push_str("</div>\n");
        }
    }
}

fn render_signatory(html: &mut String, signatory: &Signatory) {
    html.push_str(&format!(
        "<p class=\"signatory\"><strong>Signature ({}):</strong> {BLANK_LINE}<br/>\n\
         <strong>Name:</strong> {}<br/>\n\
         <strong>Date:</strong> {BLANK_LINE}</p>\n",
        escape_html(signatory.party),
        escape_html(&signatory.name)
    ));
}

fn labeled_lines(lines: &[LabeledLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "<strong>{}:</strong> {}",
                escape_html(line.label),
                escape_html(&line.value)
            )
        })
        .collect::<Vec<_>>()
        .join("<br/>\n")
}

fn inline_runs(runs: &[Inline]) -> String {
    runs.iter()
        .map(|run| match run {
            Inline::Text(text) => escape_html(text),
            Inline::Strong(text) => format!("<strong>{}</strong>", escape_html(text)),
        })
        .collect()
}

fn heading2(html: &mut String, text: &str) {
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(text)));
}

fn paragraph(html: &mut String, text: &str) {
    html.push_str(&format!("<p>{}</p>\n", escape_html(text)));
}

fn bullet_list(html: &mut String, items: &[String]) {
    html.push_str("<ul>\n");
    for item in items {
        html.push_str(&format!("  <li>{}</li>\n", escape_html(item)));
    }
    html.push_str("</ul>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::model::fixtures::sample_record;
    use crate::statement::model::OutputFormat;
    use crate::statement::sections::plan_document;

    #[test]
    fn test_document_is_self_contained() {
        let html = render_html(&plan_document(&sample_record(), OutputFormat::FormalReport));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("size: A4"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("src="));
        assert!(!html.contains("http://") && !html.contains("https://"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut record = sample_record();
        record.strengths = "<script>alert(1)</script> & more".to_string();
        let html = render_html(&plan_document(&record, OutputFormat::PersonalLetter));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_strong_run_for_neurodivergence_list() {
        let html = render_html(&plan_document(&sample_record(), OutputFormat::PersonalLetter));
        assert!(html.contains(
            "<strong>ADHD (Attention Deficit Hyperactivity Disorder), Dyslexia</strong>"
        ));
    }

    #[test]
    fn test_timeline_table_rows() {
        let report = render_html(&plan_document(&sample_record(), OutputFormat::FormalReport));
        assert_eq!(report.matches("class=\"timeline-step\"").count(), 4);
        assert_eq!(report.matches("<table").count(), 1);

        let letter = render_html(&plan_document(&sample_record(), OutputFormat::PersonalLetter));
        assert_eq!(letter.matches("<table").count(), 0);
    }

    #[test]
    fn test_adjustment_headings_render_in_group_order() {
        let html = render_html(&plan_document(&sample_record(), OutputFormat::PersonalLetter));
        let communication = html.find("<h3>Communication &amp; Meetings</h3>").unwrap();
        let environmental = html.find("<h3>Environmental</h3>").unwrap();
        let additional = html.find("<h3>Additional Adjustments</h3>").unwrap();
        assert!(communication < environmental);
        assert!(environmental < additional);
    }
}
