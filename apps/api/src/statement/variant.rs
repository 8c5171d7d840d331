//! Per-variant configuration. Both variants share one section planner; everything
//! that differs between them lives in this record.

use crate::statement::model::OutputFormat;

/// Grammatical person the body is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    FirstPerson,
    ThirdPerson,
}

/// How the implementation timeline is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineStyle {
    Prose,
    Table,
}

/// Single = assessor sign-off only. Dual = assessor details plus blank
/// signature lines for the individual and the employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureStyle {
    Single,
    Dual,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionHeadings {
    pub background: &'static str,
    pub strengths: &'static str,
    pub barriers: &'static str,
    pub adjustments: &'static str,
    pub implementation: &'static str,
    pub additional_adjustments: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct VariantConfig {
    pub format: OutputFormat,
    pub voice: Voice,
    pub subtitle: Option<&'static str>,
    pub subject_label: &'static str,
    pub date_label: &'static str,
    pub assessor_in_header: bool,
    pub legal_label: &'static str,
    pub legal_text: &'static str,
    pub headings: SectionHeadings,
    pub adjustments_intro: &'static str,
    pub details_label: &'static str,
    pub signer_label: &'static str,
    pub timeline: TimelineStyle,
    pub signatures: SignatureStyle,
}

pub const DOCUMENT_TITLE: &str = "Reasonable Adjustment Statement";
pub const ATTRIBUTION: &str = "Generated by ClearGuide | Grounded in the UK Equality Act 2010";

/// Action/timeframe rows shared by both timeline styles. `{name}` is replaced
/// with the individual's name.
pub const TIMELINE_STEPS: [(&str, &str); 4] = [
    ("Review of adjustments with {name}", "Within 2 weeks"),
    ("Implementation of agreed adjustments", "Within 4 weeks"),
    ("First review of effectiveness", "6-8 weeks post-implementation"),
    ("Ongoing periodic review", "Every 6 months or as needed"),
];

static PERSONAL_LETTER: VariantConfig = VariantConfig {
    format: OutputFormat::PersonalLetter,
    voice: Voice::FirstPerson,
    subtitle: None,
    subject_label: "Prepared for",
    date_label: "Date",
    assessor_in_header: false,
    legal_label: "Legal Basis",
    legal_text: "This statement is prepared in accordance with the Equality Act 2010 \
        (Sections 6, 20, and 21), which defines neurodivergent conditions as disabilities where they \
        have a substantial and long-term adverse effect on day-to-day activities. Employers and \
        educational institutions have a legal duty to make reasonable adjustments to remove barriers \
        and level the playing field.",
    headings: SectionHeadings {
        background: "1. Neurodivergence Profile",
        strengths: "2. My Strengths",
        barriers: "3. Areas Where I Experience Barriers",
        adjustments: "4. Recommended Reasonable Adjustments",
        implementation: "5. Implementation",
        additional_adjustments: "Additional Adjustments",
    },
    adjustments_intro: "The following adjustments are recommended to remove barriers and enable \
        me to perform to the same standard as my peers. They are proportionate, practical, and \
        aligned with EHRC and ACAS guidance.",
    details_label: "Additional context",
    signer_label: "Prepared by",
    timeline: TimelineStyle::Prose,
    signatures: SignatureStyle::Single,
};

static FORMAL_REPORT: VariantConfig = VariantConfig {
    format: OutputFormat::FormalReport,
    voice: Voice::ThirdPerson,
    subtitle: Some("Formal Assessment Report"),
    subject_label: "Subject",
    date_label: "Assessment Date",
    assessor_in_header: true,
    legal_label: "Legal Framework",
    legal_text: "This report is prepared under the Equality Act 2010 (Sections 6, 20, and 21). \
        Under this legislation, neurodivergent conditions constitute disabilities where they have a \
        substantial and long-term adverse effect on a person's ability to carry out normal \
        day-to-day activities. The duty to make reasonable adjustments is anticipatory and ongoing.",
    headings: SectionHeadings {
        background: "1. Background",
        strengths: "2. Identified Strengths",
        barriers: "3. Functional Impact Assessment",
        adjustments: "4. Recommended Reasonable Adjustments",
        implementation: "5. Implementation Timeline",
        additional_adjustments: "Additional Recommendations",
    },
    adjustments_intro: "The following adjustments are recommended in accordance with EHRC \
        Statutory Code of Practice and ACAS guidance on reasonable adjustments. These are designed \
        to level the playing field, not to confer advantage.",
    details_label: "Assessor notes",
    signer_label: "Assessor",
    timeline: TimelineStyle::Table,
    signatures: SignatureStyle::Dual,
};

impl VariantConfig {
    pub fn for_format(format: OutputFormat) -> &'static VariantConfig {
        match format {
            OutputFormat::PersonalLetter => &PERSONAL_LETTER,
            OutputFormat::FormalReport => &FORMAL_REPORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_differ_only_where_configured() {
        let letter = VariantConfig::for_format(OutputFormat::PersonalLetter);
        let report = VariantConfig::for_format(OutputFormat::FormalReport);

        assert_eq!(letter.format, OutputFormat::PersonalLetter);
        assert_eq!(report.format, OutputFormat::FormalReport);
        assert_eq!(letter.timeline, TimelineStyle::Prose);
        assert_eq!(report.timeline, TimelineStyle::Table);
        assert_eq!(letter.signatures, SignatureStyle::Single);
        assert_eq!(report.signatures, SignatureStyle::Dual);
        assert_eq!(letter.headings.adjustments, report.headings.adjustments);
    }

    #[test]
    fn test_both_cite_the_statute() {
        for format in [OutputFormat::PersonalLetter, OutputFormat::FormalReport] {
            let config = VariantConfig::for_format(format);
            assert!(config.legal_text.contains("Equality Act 2010"));
            assert!(config.legal_text.contains("Sections 6, 20, and 21"));
        }
    }

    #[test]
    fn test_timeline_has_four_steps() {
        assert_eq!(TIMELINE_STEPS.len(), 4);
        assert!(TIMELINE_STEPS[0].0.contains("{name}"));
    }
}
