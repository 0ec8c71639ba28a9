//! Record validation run before any write.

use chrono::NaiveDate;

use crate::core::record::ProjectRecord;
use crate::core::slug::slugify;
use crate::error::ValidationIssue;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Collect every validation issue for `record`.
///
/// An empty result means the record may be written.
pub fn validate_record(record: &ProjectRecord) -> Vec<ValidationIssue> {
    let required: [(&'static str, bool); 6] = [
        ("title", record.title.trim().is_empty()),
        ("description", record.description.trim().is_empty()),
        ("category", record.category.trim().is_empty()),
        ("date", record.date.trim().is_empty()),
        ("overview", record.overview.trim().is_empty()),
        (
            "takeaways",
            record.takeaways.iter().all(|item| item.trim().is_empty()),
        ),
    ];
    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, empty)| *empty)
        .map(|(name, _)| *name)
        .collect();

    let mut issues = Vec::new();
    if !missing.is_empty() {
        issues.push(ValidationIssue::MissingFields(missing));
    }
    let date = record.date.trim();
    if !date.is_empty() && NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
        issues.push(ValidationIssue::InvalidDate(date.to_string()));
    }
    let multiline = multiline_fields(record);
    if !multiline.is_empty() {
        issues.push(ValidationIssue::MultilineFields(multiline));
    }
    if !record.title.trim().is_empty() && slugify(&record.title).is_empty() {
        issues.push(ValidationIssue::UnsluggableTitle);
    }
    if record.visuals.is_empty() {
        issues.push(ValidationIssue::NoVisuals);
    }
    issues
}

/// Fields written on a single line of the document that contain a line break.
fn multiline_fields(record: &ProjectRecord) -> Vec<&'static str> {
    let has_break = |text: &str| text.contains(['\n', '\r']);
    let single_line: [(&'static str, bool); 6] = [
        ("title", has_break(&record.title)),
        ("description", has_break(&record.description)),
        ("category", has_break(&record.category)),
        ("date", has_break(&record.date)),
        ("tools", record.tools.iter().any(|tool| has_break(tool))),
        (
            "visuals",
            record
                .visuals
                .iter()
                .any(|visual| has_break(&visual.role) || has_break(&visual.caption)),
        ),
    ];
    single_line
        .iter()
        .filter(|(_, broken)| *broken)
        .map(|(name, _)| *name)
        .collect()
}
