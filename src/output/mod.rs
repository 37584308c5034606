//! Output formatting for validation reports.
//!
//! Three formats are supported:
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Text`](OutputFormat::Text)   | [`pretty`] | Terminal / human review |
//! | [`Json`](OutputFormat::Json)   | [`json`]   | Automation / scripting  |
//! | [`Sarif`](OutputFormat::Sarif) | [`sarif`]  | CI/CD code scanning     |
//!
//! Use [`format_report`] to render a [`ValidationReport`] in any of the above
//! formats.

pub mod json;
pub mod pretty;
pub mod sarif;

use crate::finding::ValidationReport;

/// Supported output formats for validation reports.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text with a summary.
    Text,
    /// Machine-readable JSON.
    Json,
    /// [SARIF 2.1.0](https://sarifweb.azurewebsites.net/) for CI/CD tool integration.
    Sarif,
}

/// Formats a [`ValidationReport`] in the requested [`OutputFormat`].
///
/// # Examples
///
/// ```rust,no_run
/// use oxidized_provenance::output::{format_report, OutputFormat};
/// # use oxidized_provenance::finding::ValidationReport;
/// # fn example(report: &ValidationReport) {
/// let json = format_report(report, &OutputFormat::Json);
/// println!("{json}");
/// # }
/// ```
pub fn format_report(report: &ValidationReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Text => pretty::format(report),
        OutputFormat::Json => json::format(report),
        OutputFormat::Sarif => sarif::format(report),
    }
}
