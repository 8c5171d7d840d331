//! Intake schema validation, run before a record is stored or composed.
//!
//! Collects every failure instead of stopping at the first so the form can
//! highlight all offending fields at once. Warnings never block an order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::statement::catalog::{ADJUSTMENT_CATALOG, OTHER_NEURODIVERGENCE};
use crate::statement::model::{present, IntakeRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeValidationResult {
    pub passed: bool,
    pub errors: Vec<FieldError>,
    pub warnings: Vec<String>,
}

/// Required text fields: (wire name, label used in the message).
const REQUIRED_TEXT: &[(&str, &str)] = &[
    ("individualName", "Name"),
    ("jobTitle", "Job title or role"),
    ("organisationName", "Organisation name"),
    ("workEnvironment", "Work environment"),
    ("strengths", "Strengths"),
    ("assessorName", "Assessor name"),
    ("assessorRole", "Assessor role"),
    ("assessmentDate", "Assessment date"),
];

fn required_text<'a>(record: &'a IntakeRecord, field: &str) -> &'a str {
    match field {
        "individualName" => &record.individual_name,
        "jobTitle" => &record.job_title,
        "organisationName" => &record.organisation_name,
        "workEnvironment" => &record.work_environment,
        "strengths" => &record.strengths,
        "assessorName" => &record.assessor_name,
        "assessorRole" => &record.assessor_role,
        "assessmentDate" => &record.assessment_date,
        _ => "",
    }
}

/// Checks the constraints the composer relies on.
pub fn validate_intake(record: &IntakeRecord) -> IntakeValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for &(field, label) in REQUIRED_TEXT {
        if required_text(record, field).trim().is_empty() {
            errors.push(FieldError::new(field, format!("{label} is required")));
        }
    }

    let lists: [(&str, &[String], &str); 3] = [
        (
            "neurodivergenceTypes",
            &record.neurodivergence_types,
            "Select at least one",
        ),
        (
            "challengeAreas",
            &record.challenge_areas,
            "Select at least one challenge area",
        ),
        (
            "selectedAdjustments",
            &record.selected_adjustments,
            "Select at least one adjustment",
        ),
    ];
    for (field, values, message) in lists {
        if values.iter().all(|v| v.trim().is_empty()) {
            errors.push(FieldError::new(field, message));
        }
    }

    if record
        .neurodivergence_types
        .iter()
        .any(|t| t == OTHER_NEURODIVERGENCE)
        && present(&record.other_neurodivergence).is_none()
    {
        warnings.push(
            "\"Other\" was selected without a description; it will appear as \"Other\"."
                .to_string(),
        );
    }

    for adjustment in &record.selected_adjustments {
        if !adjustment.trim().is_empty() && !ADJUSTMENT_CATALOG.contains(adjustment) {
            warnings.push(format!(
                "Adjustment '{adjustment}' is not in the catalog and will be listed under \"Other\"."
            ));
        }
    }

    for (field, value) in [
        ("assessmentDate", Some(record.assessment_date.as_str())),
        ("diagnosisDate", record.diagnosis_date.as_deref()),
    ] {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                warnings.push(format!(
                    "{field} '{value}' is not a YYYY-MM-DD date and will be printed as written."
                ));
            }
        }
    }

    IntakeValidationResult {
        passed: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Shape check only: one '@', non-empty local part, dotted domain, no spaces.
pub fn validate_email(email: &str) -> Option<FieldError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        None
    } else {
        Some(FieldError::new("email", "A valid email address is required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::model::fixtures::sample_record;

    fn fields(result: &IntakeValidationResult) -> Vec<&str> {
        result.errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_sample_record_passes() {
        let result = validate_intake(&sample_record());
        assert!(result.passed, "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_collects_all_missing_required_fields() {
        let mut record = sample_record();
        record.individual_name = "  ".to_string();
        record.job_title.clear();
        record.assessment_date.clear();
        let result = validate_intake(&record);
        assert!(!result.passed);
        assert_eq!(
            fields(&result),
            vec!["individualName", "jobTitle", "assessmentDate"]
        );
        assert_eq!(result.errors[0].message, "Name is required");
    }

    #[test]
    fn test_empty_lists_fail() {
        let mut record = sample_record();
        record.neurodivergence_types.clear();
        record.challenge_areas = vec!["".to_string()];
        record.selected_adjustments.clear();
        let result = validate_intake(&record);
        assert_eq!(
            fields(&result),
            vec!["neurodivergenceTypes", "challengeAreas", "selectedAdjustments"]
        );
    }

    #[test]
    fn test_unknown_adjustment_is_a_warning() {
        let mut record = sample_record();
        record
            .selected_adjustments
            .push("Quiet workspace or access to noise-cancelling headphones.".to_string());
        let result = validate_intake(&record);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("not in the catalog"));
    }

    #[test]
    fn test_other_without_description_warns() {
        let mut record = sample_record();
        record.neurodivergence_types.push("Other".to_string());
        let result = validate_intake(&record);
        assert!(result.passed);
        assert!(result.warnings.iter().any(|w| w.contains("without a description")));
    }

    #[test]
    fn test_non_iso_dates_warn() {
        let mut record = sample_record();
        record.assessment_date = "14/03/2024".to_string();
        record.diagnosis_date = Some("last year".to_string());
        let result = validate_intake(&record);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("alex@example.co.uk").is_none());
        assert!(validate_email(" alex@example.com ").is_none());
        assert!(validate_email("alex").is_some());
        assert!(validate_email("@example.com").is_some());
        assert!(validate_email("alex@localhost").is_some());
        assert!(validate_email("alex@@example.com").is_some());
        assert!(validate_email("al ex@example.com").is_some());
    }
}
