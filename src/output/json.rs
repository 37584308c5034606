//! JSON output formatter.
//!
//! Produces a pretty-printed JSON document with the overall verdict, every
//! error, and the summary counts.

use crate::finding::{AnnotationError, Summary, ValidationReport};

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    valid: bool,
    timestamp: &'a str,
    errors: Vec<&'a AnnotationError>,
    summary: &'a Summary,
}

/// Formats a [`ValidationReport`] as pretty-printed JSON.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &ValidationReport) -> String {
    let output = JsonOutput {
        valid: report.valid,
        timestamp: &report.timestamp,
        errors: report.errors().collect(),
        summary: &report.summary,
    };

    let mut json = serde_json::to_string_pretty(&output).expect("JSON serialization failed");
    json.push('\n');
    json
}
