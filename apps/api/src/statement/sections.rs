//! Section planning: decides which sections and fragments a statement has,
//! with no markup involved.
//!
//! Both variants go through `plan_document`; `VariantConfig` supplies the
//! labels and the two structural switches (timeline style, signature style).
//! Optional intake fields map to `Option` fragments that are `None` when the
//! field is absent or blank, so the renderer never has to decide omission.

use serde::Serialize;

use crate::statement::catalog::ADJUSTMENT_CATALOG;
use crate::statement::categorizer::{categorize, AdjustmentGroup};
use crate::statement::formatting::{format_date, neurodivergence_labels};
use crate::statement::model::{present, IntakeRecord, OutputFormat};
use crate::statement::pronouns::{resolve, PronounSet};
use crate::statement::variant::{
    SignatureStyle, TimelineStyle, VariantConfig, Voice, ATTRIBUTION, DOCUMENT_TITLE,
    TIMELINE_STEPS,
};

/// Blank line printed where a signature, name or date is filled in by hand.
pub const BLANK_LINE: &str = "_________________________";

const DEFAULT_ADDRESSEE: &str = "Line Manager / Disability Support Team";

// ────────────────────────────────────────────────────────────────────────────
// Intermediate representation
// ────────────────────────────────────────────────────────────────────────────

/// Run of inline text; `Strong` runs are emphasised when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Strong(String),
}

pub type Paragraph = Vec<Inline>;

/// "Label: value" line as used in the header and signature blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledLine {
    pub label: &'static str,
    pub value: String,
}

impl LabeledLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub action: String,
    pub timeframe: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "content", rename_all = "snake_case")]
pub enum Timeline {
    Prose(Vec<String>),
    Table(Vec<TimelineStep>),
}

/// Blank sign-off for one party of the formal report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signatory {
    pub party: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdditionalBlock {
    pub heading: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum Section {
    Header {
        lines: Vec<LabeledLine>,
    },
    LegalBasis {
        label: &'static str,
        text: &'static str,
    },
    Salutation {
        addressee: String,
        body: String,
    },
    Background {
        heading: &'static str,
        body: Paragraph,
    },
    Strengths {
        heading: &'static str,
        strengths: String,
        closing: String,
    },
    Barriers {
        heading: &'static str,
        intro: String,
        areas: Vec<String>,
        details: Option<LabeledLine>,
    },
    Adjustments {
        heading: &'static str,
        intro: &'static str,
        groups: Vec<AdjustmentGroup>,
        additional: Option<AdditionalBlock>,
    },
    Implementation {
        heading: &'static str,
        timeline: Timeline,
    },
    Signatures {
        prepared_by: Vec<LabeledLine>,
        signatories: Vec<Signatory>,
    },
    Footer {
        confidentiality: String,
        attribution: &'static str,
    },
}

/// Everything needed to render one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentPlan {
    pub format: OutputFormat,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub sections: Vec<Section>,
}

impl DocumentPlan {
    pub fn section_names(&self) -> Vec<&'static str> {
        self.sections.iter().map(Section::name).collect()
    }
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::Header { .. } => "header",
            Section::LegalBasis { .. } => "legal_basis",
            Section::Salutation { .. } => "salutation",
            Section::Background { .. } => "background",
            Section::Strengths { .. } => "strengths",
            Section::Barriers { .. } => "barriers",
            Section::Adjustments { .. } => "adjustments",
            Section::Implementation { .. } => "implementation",
            Section::Signatures { .. } => "signatures",
            Section::Footer { .. } => "footer",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Planning
// ────────────────────────────────────────────────────────────────────────────

/// Values derived once per statement and shared by every section.
struct Context<'a> {
    record: &'a IntakeRecord,
    config: &'static VariantConfig,
    pronouns: PronounSet,
    labels: String,
    assessment_date: String,
}

/// Builds the ordered section list for `record` in the requested variant.
pub fn plan_document(record: &IntakeRecord, format: OutputFormat) -> DocumentPlan {
    let config = VariantConfig::for_format(format);
    let ctx = Context {
        record,
        config,
        pronouns: resolve(record.pronouns.as_deref()),
        labels: neurodivergence_labels(record),
        assessment_date: format_date(Some(&record.assessment_date)),
    };

    let mut sections = vec![header(&ctx), legal_basis(&ctx)];
    if config.voice == Voice::FirstPerson {
        sections.push(salutation(&ctx));
    }
    sections.extend([
        background(&ctx),
        strengths(&ctx),
        barriers(&ctx),
        adjustments(&ctx),
        implementation(&ctx),
        signatures(&ctx),
        footer(&ctx),
    ]);

    DocumentPlan {
        format,
        title: DOCUMENT_TITLE,
        subtitle: config.subtitle,
        sections,
    }
}

fn header(ctx: &Context) -> Section {
    let r = ctx.record;
    let subject = match present(&r.pronouns) {
        Some(pronouns) => format!("{} ({})", r.individual_name, pronouns),
        None => r.individual_name.clone(),
    };
    let role = match present(&r.department) {
        Some(department) => format!("{}, {}", r.job_title, department),
        None => r.job_title.clone(),
    };

    let mut lines = vec![
        LabeledLine::new(ctx.config.subject_label, subject),
        LabeledLine::new("Role", role),
        LabeledLine::new("Organisation", r.organisation_name.as_str()),
    ];
    if let Some(manager) = present(&r.manager_name) {
        lines.push(LabeledLine::new("Line Manager", manager));
    }
    lines.push(LabeledLine::new(
        ctx.config.date_label,
        ctx.assessment_date.as_str(),
    ));
    if ctx.config.assessor_in_header {
        lines.push(LabeledLine::new("Assessor", assessor_identity(r)));
    }

    Section::Header { lines }
}

fn assessor_identity(r: &IntakeRecord) -> String {
    let mut identity = format!("{}, {}", r.assessor_name, r.assessor_role);
    if let Some(org) = present(&r.assessor_organisation) {
        identity.push_str(", ");
        identity.push_str(org);
    }
    identity
}

fn legal_basis(ctx: &Context) -> Section {
    Section::LegalBasis {
        label: ctx.config.legal_label,
        text: ctx.config.legal_text,
    }
}

fn salutation(ctx: &Context) -> Section {
    let r = ctx.record;
    let team = if ctx.pronouns.possessive == "their" {
        "the"
    } else {
        "our"
    };
    Section::Salutation {
        addressee: present(&r.manager_name)
            .unwrap_or(DEFAULT_ADDRESSEE)
            .to_string(),
        body: format!(
            "I am writing to share my Reasonable Adjustment Statement, which has been prepared \
             following {}. The purpose of this document is not to request special treatment, but \
             to identify practical adjustments that will allow me to perform at my best and \
             contribute fully to {} team.",
            r.diagnosis_status.assessment_kind(),
            team
        ),
    }
}

/// "This was assessed by X on D." fragment; the date only appears alongside a diagnostician.
fn diagnostician_sentence(r: &IntakeRecord, lead: &str) -> Option<String> {
    let diagnostician = present(&r.diagnostician_name)?;
    let mut sentence = format!("{lead} {diagnostician}");
    if present(&r.diagnosis_date).is_some() {
        sentence.push_str(" on ");
        sentence.push_str(&format_date(r.diagnosis_date.as_deref()));
    }
    sentence.push('.');
    Some(sentence)
}

fn background(ctx: &Context) -> Section {
    let r = ctx.record;
    let outcome = r.diagnosis_status.outcome_phrase();
    let mut body = match ctx.config.voice {
        Voice::FirstPerson => vec![
            Inline::Text(format!("I have been {outcome} with: ")),
            Inline::Strong(ctx.labels.clone()),
            Inline::Text(".".to_string()),
        ],
        Voice::ThirdPerson => vec![
            Inline::Text(format!(
                "{} is employed as {} at {} in a {} setting. {} {} been {} with ",
                r.individual_name,
                r.job_title,
                r.organisation_name,
                r.work_environment.to_lowercase(),
                ctx.pronouns.subject_capitalised(),
                ctx.pronouns.has(),
                outcome
            )),
            Inline::Strong(ctx.labels.clone()),
            Inline::Text(".".to_string()),
        ],
    };

    let lead = match ctx.config.voice {
        Voice::FirstPerson => "This was assessed by",
        Voice::ThirdPerson => "The assessment was conducted by",
    };
    if let Some(sentence) = diagnostician_sentence(r, lead) {
        body.push(Inline::Text(format!(" {sentence}")));
    }

    Section::Background {
        heading: ctx.config.headings.background,
        body,
    }
}

fn strengths(ctx: &Context) -> Section {
    let r = ctx.record;
    let closing = match ctx.config.voice {
        Voice::FirstPerson => format!(
            "These strengths are a direct asset to {} and should be recognised alongside the \
             adjustments below.",
            r.organisation_name
        ),
        Voice::ThirdPerson => format!(
            "It is recommended that {}'s line management team recognise and leverage these \
             strengths when assigning responsibilities and considering career development.",
            r.individual_name
        ),
    };
    Section::Strengths {
        heading: ctx.config.headings.strengths,
        strengths: r.strengths.clone(),
        closing,
    }
}

fn barriers(ctx: &Context) -> Section {
    let r = ctx.record;
    let intro = match ctx.config.voice {
        Voice::FirstPerson => format!(
            "In my role as {} ({} environment), I experience challenges in the following areas:",
            r.job_title, r.work_environment
        ),
        Voice::ThirdPerson => format!(
            "The following areas have been identified as presenting barriers to {}'s full and \
             equal participation:",
            r.individual_name
        ),
    };
    Section::Barriers {
        heading: ctx.config.headings.barriers,
        intro,
        areas: r.challenge_areas.clone(),
        details: present(&r.challenge_details)
            .map(|details| LabeledLine::new(ctx.config.details_label, details)),
    }
}

fn adjustments(ctx: &Context) -> Section {
    let r = ctx.record;
    Section::Adjustments {
        heading: ctx.config.headings.adjustments,
        intro: ctx.config.adjustments_intro,
        groups: categorize(&r.selected_adjustments, &ADJUSTMENT_CATALOG).into_groups(),
        additional: present(&r.additional_adjustments).map(|text| AdditionalBlock {
            heading: ctx.config.headings.additional_adjustments,
            text: text.to_string(),
        }),
    }
}

fn implementation(ctx: &Context) -> Section {
    let name = &ctx.record.individual_name;
    let timeline = match ctx.config.timeline {
        TimelineStyle::Prose => Timeline::Prose(vec![
            "I recommend that these adjustments are reviewed within 2 weeks of receipt of this \
             document and implemented within 4 weeks. A follow-up review should be scheduled for \
             6-8 weeks after implementation to assess effectiveness, with ongoing periodic reviews \
             every 6 months or as needed."
                .to_string(),
            "I am happy to discuss any of these adjustments and work collaboratively to find \
             solutions that work for both myself and the team."
                .to_string(),
        ]),
        TimelineStyle::Table => Timeline::Table(
            TIMELINE_STEPS
                .iter()
                .map(|&(action, timeframe)| TimelineStep {
                    action: action.replace("{name}", name),
                    timeframe,
                })
                .collect(),
        ),
    };
    Section::Implementation {
        heading: ctx.config.headings.implementation,
        timeline,
    }
}

fn signatures(ctx: &Context) -> Section {
    let r = ctx.record;
    let mut prepared_by = vec![
        LabeledLine::new(ctx.config.signer_label, r.assessor_name.as_str()),
        LabeledLine::new("Role", r.assessor_role.as_str()),
    ];
    if let Some(org) = present(&r.assessor_organisation) {
        prepared_by.push(LabeledLine::new("Organisation", org));
    }
    prepared_by.push(LabeledLine::new("Date", ctx.assessment_date.as_str()));

    let signatories = match ctx.config.signatures {
        SignatureStyle::Single => Vec::new(),
        SignatureStyle::Dual => vec![
            Signatory {
                party: "individual",
                name: r.individual_name.clone(),
            },
            Signatory {
                party: "employer/institution",
                name: present(&r.manager_name).unwrap_or(BLANK_LINE).to_string(),
            },
        ],
    };

    Section::Signatures {
        prepared_by,
        signatories,
    }
}

fn footer(ctx: &Context) -> Section {
    let confidentiality = match ctx.config.voice {
        Voice::FirstPerson => "This document contains sensitive personal information relating to \
             neurodivergent conditions and is shared in confidence for the sole purpose of \
             implementing reasonable adjustments. It must not be shared without the explicit \
             consent of the individual named above."
            .to_string(),
        Voice::ThirdPerson => format!(
            "This document contains sensitive personal information relating to {}'s \
             neurodivergent conditions. It is shared in confidence for the sole purpose of \
             implementing reasonable adjustments under the Equality Act 2010. Distribution without \
             explicit consent is a breach of data protection obligations under UK GDPR.",
            ctx.record.individual_name
        ),
    };
    Section::Footer {
        confidentiality,
        attribution: ATTRIBUTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::model::fixtures::sample_record;

    fn find<'a>(plan: &'a DocumentPlan, name: &str) -> &'a Section {
        plan.sections
            .iter()
            .find(|s| s.name() == name)
            .unwrap_or_else(|| panic!("missing section {name}"))
    }

    fn header_labels(plan: &DocumentPlan) -> Vec<&'static str> {
        match find(plan, "header") {
            Section::Header { lines } => lines.iter().map(|l| l.label).collect(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_section_order_personal_letter() {
        let plan = plan_document(&sample_record(), OutputFormat::PersonalLetter);
        assert_eq!(
            plan.section_names(),
            vec![
                "header",
                "legal_basis",
                "salutation",
                "background",
                "strengths",
                "barriers",
                "adjustments",
                "implementation",
                "signatures",
                "footer"
            ]
        );
        assert!(plan.subtitle.is_none());
    }

    #[test]
    fn test_section_order_formal_report() {
        let plan = plan_document(&sample_record(), OutputFormat::FormalReport);
        assert_eq!(
            plan.section_names(),
            vec![
                "header",
                "legal_basis",
                "background",
                "strengths",
                "barriers",
                "adjustments",
                "implementation",
                "signatures",
                "footer"
            ]
        );
        assert_eq!(plan.subtitle, Some("Formal Assessment Report"));
    }

    #[test]
    fn test_header_omits_absent_manager() {
        let mut record = sample_record();
        record.manager_name = None;
        let plan = plan_document(&record, OutputFormat::PersonalLetter);
        assert!(!header_labels(&plan).contains(&"Line Manager"));

        record.manager_name = Some("Priya Shah".to_string());
        let plan = plan_document(&record, OutputFormat::PersonalLetter);
        assert!(header_labels(&plan).contains(&"Line Manager"));
    }

    #[test]
    fn test_department_joins_job_title() {
        let mut record = sample_record();
        record.department = Some("Engineering".to_string());
        let plan = plan_document(&record, OutputFormat::FormalReport);
        match find(&plan, "header") {
            Section::Header { lines } => {
                let role = lines.iter().find(|l| l.label == "Role").unwrap();
                assert_eq!(role.value, "Data Analyst, Engineering");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_formal_header_carries_assessor_identity() {
        let plan = plan_document(&sample_record(), OutputFormat::FormalReport);
        match find(&plan, "header") {
            Section::Header { lines } => {
                let assessor = lines.iter().find(|l| l.label == "Assessor").unwrap();
                assert_eq!(
                    assessor.value,
                    "Jordan Blake, Workplace Needs Assessor, Inclusive Work Ltd"
                );
                let date = lines.iter().find(|l| l.label == "Assessment Date").unwrap();
                assert_eq!(date.value, "14 March 2024");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_salutation_defaults_without_manager() {
        let mut record = sample_record();
        record.manager_name = None;
        record.pronouns = None;
        let plan = plan_document(&record, OutputFormat::PersonalLetter);
        match find(&plan, "salutation") {
            Section::Salutation { addressee, body } => {
                assert_eq!(addressee, "Line Manager / Disability Support Team");
                assert!(body.contains("following a formal assessment"));
                assert!(body.contains("contribute fully to the team"));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_salutation_uses_our_team_for_gendered_pronouns() {
        let plan = plan_document(&sample_record(), OutputFormat::PersonalLetter);
        match find(&plan, "salutation") {
            Section::Salutation { body, .. } => assert!(body.contains("contribute fully to our team")),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_formal_background_uses_pronouns() {
        let mut record = sample_record();
        record.pronouns = Some("they/them".to_string());
        record.diagnosis_status = crate::statement::model::DiagnosisStatus::SelfIdentified;
        let plan = plan_document(&record, OutputFormat::FormalReport);
        match find(&plan, "background") {
            Section::Background { body, .. } => {
                let Inline::Text(lead) = &body[0] else {
                    panic!("expected text run");
                };
                assert!(lead.contains("in a hybrid (office + remote) setting"));
                assert!(lead.contains("They have been self-identified with"));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_diagnostician_sentence_requires_name() {
        let mut record = sample_record();
        record.diagnostician_name = None;
        let plan = plan_document(&record, OutputFormat::PersonalLetter);
        match find(&plan, "background") {
            Section::Background { body, .. } => assert_eq!(body.len(), 3),
            _ => unreachable!(),
        }

        let plan = plan_document(&sample_record(), OutputFormat::PersonalLetter);
        match find(&plan, "background") {
            Section::Background { body, .. } => assert_eq!(
                body.last().unwrap(),
                &Inline::Text(" This was assessed by Dr Helen Carter on 2 November 2023.".to_string())
            ),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_optional_fragments_are_omitted() {
        let mut record = sample_record();
        record.challenge_details = Some("  ".to_string());
        record.additional_adjustments = None;
        let plan = plan_document(&record, OutputFormat::FormalReport);

        match find(&plan, "barriers") {
            Section::Barriers { details, areas, .. } => {
                assert!(details.is_none());
                assert_eq!(areas.len(), 2);
            }
            _ => unreachable!(),
        }
        match find(&plan, "adjustments") {
            Section::Adjustments { additional, .. } => assert!(additional.is_none()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_additional_heading_differs_by_variant() {
        let record = sample_record();
        for (format, expected) in [
            (OutputFormat::PersonalLetter, "Additional Adjustments"),
            (OutputFormat::FormalReport, "Additional Recommendations"),
        ] {
            let plan = plan_document(&record, format);
            match find(&plan, "adjustments") {
                Section::Adjustments { additional, .. } => {
                    assert_eq!(additional.as_ref().unwrap().heading, expected)
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_adjustment_groups_follow_selection_order() {
        let plan = plan_document(&sample_record(), OutputFormat::PersonalLetter);
        match find(&plan, "adjustments") {
            Section::Adjustments { groups, .. } => {
                let names: Vec<_> = groups.iter().map(|g| g.category).collect();
                assert_eq!(names, vec!["Communication & Meetings", "Environmental"]);
                assert_eq!(groups[0].items.len(), 2);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_timeline_and_signatures_by_variant() {
        let record = sample_record();

        let letter = plan_document(&record, OutputFormat::PersonalLetter);
        match find(&letter, "implementation") {
            Section::Implementation { timeline, .. } => {
                assert!(matches!(timeline, Timeline::Prose(_)))
            }
            _ => unreachable!(),
        }
        match find(&letter, "signatures") {
            Section::Signatures { signatories, .. } => assert!(signatories.is_empty()),
            _ => unreachable!(),
        }

        let report = plan_document(&record, OutputFormat::FormalReport);
        match find(&report, "implementation") {
            Section::Implementation {
                timeline: Timeline::Table(rows),
                ..
            } => {
                assert_eq!(rows.len(), 4);
                assert_eq!(rows[0].action, "Review of adjustments with Alex Morgan");
                assert_eq!(rows[3].timeframe, "Every 6 months or as needed");
            }
            _ => panic!("formal report must use a table timeline"),
        }
        match find(&report, "signatures") {
            Section::Signatures { signatories, .. } => {
                assert_eq!(signatories.len(), 2);
                assert_eq!(signatories[1].name, "Priya Shah");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_employer_signatory_blank_without_manager() {
        let mut record = sample_record();
        record.manager_name = None;
        let plan = plan_document(&record, OutputFormat::FormalReport);
        match find(&plan, "signatures") {
            Section::Signatures { signatories, .. } => assert_eq!(signatories[1].name, BLANK_LINE),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_formal_footer_names_subject() {
        let plan = plan_document(&sample_record(), OutputFormat::FormalReport);
        match find(&plan, "footer") {
            Section::Footer { confidentiality, .. } => {
                assert!(confidentiality.contains("relating to Alex Morgan's neurodivergent"))
            }
            _ => unreachable!(),
        }
    }
}
