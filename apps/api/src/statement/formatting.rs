//! Text helpers shared by both statement variants.

use chrono::{DateTime, NaiveDate};

use crate::statement::catalog::OTHER_NEURODIVERGENCE;
use crate::statement::model::{present, IntakeRecord};

/// Placeholder for a date that was never provided.
pub const MISSING_DATE: &str = "N/A";

/// Formats an ISO calendar date as e.g. "14 March 2024".
///
/// Absent or empty input gives "N/A". Any other input that doesn't parse,
/// whitespace included, is returned unchanged rather than rejected.
pub fn format_date(value: Option<&str>) -> String {
    let raw = match value.filter(|v| !v.is_empty()) {
        Some(raw) => raw,
        None => return MISSING_DATE.to_string(),
    };
    match parse_calendar_date(raw.trim()) {
        Some(date) => date.format("%-d %B %Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Comma-separated neurodivergence labels, in form order.
///
/// The literal "Other" entry is replaced by the free-text description when
/// one was given.
pub fn neurodivergence_labels(record: &IntakeRecord) -> String {
    let other = present(&record.other_neurodivergence);
    record
        .neurodivergence_types
        .iter()
        .map(|label| match other {
            Some(description) if label == OTHER_NEURODIVERGENCE => description,
            _ => label.as_str(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escapes text for interpolation into HTML element content or quoted
/// attribute values.
pub fn escape_html(value: &str) -> String {
    html_escape::encode_quoted_attribute(value).into_owned()
}
