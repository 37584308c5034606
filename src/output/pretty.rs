//! Human-readable colored text formatter.
//!
//! Produces a terminal-friendly report with ANSI color codes: a verdict
//! banner, the summary counts, and every error with its location.

use crate::finding::ValidationReport;
use colored::Colorize;

/// Formats a [`ValidationReport`] as human-readable, ANSI-colored text.
///
/// Sections rendered (in order):
/// 1. **Verdict**: passed or failed banner.
/// 2. **Summary**: files scanned, files with errors, error and block counts.
/// 3. **Errors**: `file:line`, rule id and message for each error.
pub fn format(report: &ValidationReport) -> String {
    let mut out = String::new();

    if report.valid {
        out.push_str(&format!(
            "{}\n",
            "✅ All AI code annotations are valid!".green().bold()
        ));
    } else {
        out.push_str(&format!(
            "{}\n",
            "❌ AI code annotation validation FAILED".red().bold()
        ));
    }
    out.push('\n');

    let summary = &report.summary;
    out.push_str(&format!("{}\n", "Summary:".bold().underline()));
    out.push_str(&format!("  Total files scanned: {}\n", summary.total_files));
    out.push_str(&format!("  Files with errors: {}\n", summary.files_with_errors));
    out.push_str(&format!("  Total errors: {}\n", summary.total_errors));
    out.push_str(&format!("  Valid blocks: {}\n", summary.valid_blocks));

    let mut errors = report.errors().peekable();
    if errors.peek().is_some() {
        out.push('\n');
        out.push_str(&format!("{}\n", "Errors:".bold().underline()));
        for error in errors {
            out.push_str(&format!(
                "  {}  {}\n",
                format!("{}:{}", error.file.display(), error.line).bold(),
                error.rule_id.dimmed(),
            ));
            out.push_str(&format!("    → {}\n", error.message));
        }
    }

    out
}
