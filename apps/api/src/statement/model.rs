//! Intake record: the questionnaire answers a statement is composed from.
//!
//! Wire names match the intake form (camelCase). Optional text fields treat
//! `""` the same as a missing key, so the composer only ever sees `None` or
//! real content.

use serde::{Deserialize, Deserializer, Serialize};

/// How the neurodivergence was identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosisStatus {
    #[serde(rename = "Formal diagnosis")]
    FormalDiagnosis,
    #[serde(rename = "Awaiting assessment")]
    AwaitingAssessment,
    #[serde(rename = "Self-identified")]
    SelfIdentified,
}

impl DiagnosisStatus {
    /// Past participle used in "has been ___ with".
    pub fn outcome_phrase(&self) -> &'static str {
        match self {
            DiagnosisStatus::FormalDiagnosis => "formally diagnosed",
            DiagnosisStatus::AwaitingAssessment => "referred for formal assessment",
            DiagnosisStatus::SelfIdentified => "self-identified",
        }
    }

    /// The kind of assessment the statement was prepared after.
    pub fn assessment_kind(&self) -> &'static str {
        match self {
            DiagnosisStatus::FormalDiagnosis => "a formal assessment",
            _ => "a needs-based assessment",
        }
    }
}

/// The two document styles a statement can be produced in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// First-person letter from the individual to their manager.
    #[default]
    PersonalLetter,
    /// Third-person assessment report with timeline table and sign-off.
    FormalReport,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::PersonalLetter => "personal_letter",
            OutputFormat::FormalReport => "formal_report",
        }
    }
}

/// Serialized in camelCase. Deserialized through `IntakeForm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "IntakeForm")]
pub struct IntakeRecord {
    // Personal details
    pub individual_name: String,
    pub pronouns: Option<String>,
    pub job_title: String,
    pub department: Option<String>,
    pub organisation_name: String,
    pub manager_name: Option<String>,

    // Neurodivergence profile
    pub neurodivergence_types: Vec<String>,
    pub other_neurodivergence: Option<String>,
    pub diagnosis_status: DiagnosisStatus,
    pub diagnostician_name: Option<String>,
    pub diagnosis_date: Option<String>,

    // Work environment
    pub work_environment: String,
    pub challenge_areas: Vec<String>,
    pub challenge_details: Option<String>,

    pub strengths: String,

    // Adjustments
    pub selected_adjustments: Vec<String>,
    pub additional_adjustments: Option<String>,

    // Assessor
    pub assessor_name: String,
    pub assessor_role: String,
    pub assessor_organisation: Option<String>,
    pub assessment_date: String,

    pub output_format: OutputFormat,
}

/// Deserialization shape of [`IntakeRecord`].
///
/// Orders written by the storefront store the chosen format under both
/// `outputFormat` and `output_format`. The two keys are read separately and
/// `output_format` wins when both are present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntakeForm {
    // Personal details
    #[serde(default)]
    individual_name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pronouns: Option<String>,
    #[serde(default)]
    job_title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    department: Option<String>,
    #[serde(default)]
    organisation_name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    manager_name: Option<String>,

    // Neurodivergence profile
    #[serde(default)]
    neurodivergence_types: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    other_neurodivergence: Option<String>,
    diagnosis_status: DiagnosisStatus,
    #[serde(default, deserialize_with = "blank_as_none")]
    diagnostician_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    diagnosis_date: Option<String>,

    // Work environment
    #[serde(default)]
    work_environment: String,
    #[serde(default)]
    challenge_areas: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    challenge_details: Option<String>,

    #[serde(default)]
    strengths: String,

    // Adjustments
    #[serde(default)]
    selected_adjustments: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    additional_adjustments: Option<String>,

    // Assessor
    #[serde(default)]
    assessor_name: String,
    #[serde(default)]
    assessor_role: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    assessor_organisation: Option<String>,
    #[serde(default)]
    assessment_date: String,

    #[serde(default, rename = "outputFormat")]
    output_format: Option<OutputFormat>,
    #[serde(default, rename = "output_format")]
    stored_output_format: Option<OutputFormat>,
}

impl From<IntakeForm> for IntakeRecord {
    fn from(form: IntakeForm) -> Self {
        IntakeRecord {
            individual_name: form.individual_name,
            pronouns: form.pronouns,
            job_title: form.job_title,
            department: form.department,
            organisation_name: form.organisation_name,
            manager_name: form.manager_name,
            neurodivergence_types: form.neurodivergence_types,
            other_neurodivergence: form.other_neurodivergence,
            diagnosis_status: form.diagnosis_status,
            diagnostician_name: form.diagnostician_name,
            diagnosis_date: form.diagnosis_date,
            work_environment: form.work_environment,
            challenge_areas: form.challenge_areas,
            challenge_details: form.challenge_details,
            strengths: form.strengths,
            selected_adjustments: form.selected_adjustments,
            additional_adjustments: form.additional_adjustments,
            assessor_name: form.assessor_name,
            assessor_role: form.assessor_role,
            assessor_organisation: form.assessor_organisation,
            assessment_date: form.assessment_date,
            output_format: form
                .stored_output_format
                .or(form.output_format)
                .unwrap_or_default(),
        }
    }
}

/// Returns the trimmed value when the optional field has real content.
pub fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A fully populated record. Tests clear fields to exercise omission.
    pub fn sample_record() -> IntakeRecord {
        IntakeRecord {
            individual_name: "Alex Morgan".to_string(),
            pronouns: Some("she/her".to_string()),
            job_title: "Data Analyst".to_string(),
            department: None,
            organisation_name: "Northwind Trading".to_string(),
            manager_name: Some("Priya Shah".to_string()),
            neurodivergence_types: vec![
                "ADHD (Attention Deficit Hyperactivity Disorder)".to_string(),
                "Dyslexia".to_string(),
            ],
            other_neurodivergence: None,
            diagnosis_status: DiagnosisStatus::FormalDiagnosis,
            diagnostician_name: Some("Dr Helen Carter".to_string()),
            diagnosis_date: Some("2023-11-02".to_string()),
            work_environment: "Hybrid (Office + Remote)".to_string(),
            challenge_areas: vec![
                "Working Memory (retaining/recalling information)".to_string(),
                "Focus & Attention (sustained concentration, task switching)".to_string(),
            ],
            challenge_details: Some("Open-plan noise makes long analysis sessions hard".to_string()),
            strengths: "Pattern recognition and creative problem solving".to_string(),
            selected_adjustments: vec![
                "Written summaries / minutes after verbal discussions".to_string(),
                "Quiet workspace or access to noise-cancelling headphones".to_string(),
                "Agendas provided at least 24 hours before meetings".to_string(),
            ],
            additional_adjustments: Some("Standing desk near a window".to_string()),
            assessor_name: "Jordan Blake".to_string(),
            assessor_role: "Workplace Needs Assessor".to_string(),
            assessor_organisation: Some("Inclusive Work Ltd".to_string()),
            assessment_date: "2024-03-14".to_string(),
            output_format: OutputFormat::PersonalLetter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_intake_form_payload() {
        let value = json!({
            "individualName": "Sam Lee",
            "pronouns": "",
            "jobTitle": "Teacher",
            "organisationName": "Hill School",
            "neurodivergenceTypes": ["Dyslexia"],
            "diagnosisStatus": "Awaiting assessment",
            "workEnvironment": "Educational / Academic",
            "challengeAreas": ["Reading / Writing (processing speed, comprehension, spelling)"],
            "strengths": "Big-picture thinking",
            "selectedAdjustments": ["Text-to-speech or speech-to-text software"],
            "assessorName": "Sam Lee",
            "assessorRole": "Self",
            "assessmentDate": "2024-05-01"
        });

        let record: IntakeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.diagnosis_status, DiagnosisStatus::AwaitingAssessment);
        assert!(record.pronouns.is_none(), "blank pronouns must be treated as absent");
        assert!(record.department.is_none());
        assert_eq!(record.output_format, OutputFormat::PersonalLetter);
    }

    #[test]
    fn test_accepts_snake_case_output_format_alias() {
        let mut value = serde_json::to_value(fixtures::sample_record()).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("outputFormat");
        obj.insert("output_format".to_string(), json!("formal_report"));

        let record: IntakeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.output_format, OutputFormat::FormalReport);
    }

    #[test]
    fn test_stored_order_with_both_format_keys() {
        let mut value = serde_json::to_value(fixtures::sample_record()).unwrap();
        value["outputFormat"] = json!("personal_letter");
        value["output_format"] = json!("formal_report");

        let record: IntakeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.output_format, OutputFormat::FormalReport);
    }

    #[test]
    fn test_serializes_single_camel_case_format_key() {
        let value = serde_json::to_value(fixtures::sample_record()).unwrap();
        assert_eq!(value["outputFormat"], json!("personal_letter"));
        assert!(value.get("output_format").is_none());
    }

    #[test]
    fn test_unknown_diagnosis_status_is_rejected() {
        let mut value = serde_json::to_value(fixtures::sample_record()).unwrap();
        value["diagnosisStatus"] = json!("Suspected");
        assert!(serde_json::from_value::<IntakeRecord>(value).is_err());
    }

    #[test]
    fn test_present_trims_and_filters_blank() {
        assert_eq!(present(&Some("  Engineering ".to_string())), Some("Engineering"));
        assert_eq!(present(&Some("   ".to_string())), None);
        assert_eq!(present(&None), None);
    }

    #[test]
    fn test_diagnosis_phrases() {
        assert_eq!(
            DiagnosisStatus::FormalDiagnosis.assessment_kind(),
            "a formal assessment"
        );
        assert_eq!(
            DiagnosisStatus::SelfIdentified.assessment_kind(),
            "a needs-based assessment"
        );
        assert_eq!(
            DiagnosisStatus::AwaitingAssessment.outcome_phrase(),
            "referred for formal assessment"
        );
    }
}
