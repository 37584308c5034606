//! # oxidized-provenance
//!
//! Repository hygiene gate for AI-generated code annotations.
//!
//! Source files mark AI-generated code with comment-delimited blocks that
//! open with `START_AI_GENERATED_CODE`, close with `END_AI_GENERATED_CODE`,
//! and carry provenance metadata (`TOOL_NAME`, `TOOL_VERSION`, `DATE`,
//! `AUTHOR_ID`, `ACTION`). `oxidized-provenance` finds every block in a tree
//! and reports the ones that are unterminated, incomplete, or malformed, in
//! human-readable, JSON, or [SARIF] formats.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use oxidized_provenance::{audit, config::Config, output};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let report = audit::run_audit(Path::new("."), &config).expect("scan failed");
//!
//! if report.valid {
//!     println!("All annotations are valid!");
//! } else {
//!     let text = output::format_report(&report, &output::OutputFormat::Text);
//!     print!("{text}");
//! }
//! ```
//!
//! ## Architecture
//!
//! 1. **[`config`]**: include/exclude patterns from TOML and the command line.
//! 2. **[`discovery`]**: walk the tree and read matching files.
//! 3. **[`annotation`]**: locate blocks, extract metadata, validate fields.
//!    Pure: text in, blocks and errors out. [`annotation::render`] writes
//!    new blocks that pass the same validation.
//! 4. **[`audit`]**: validate files in parallel and aggregate.
//! 5. **[`finding`]**: error and report types ([`finding::AnnotationError`],
//!    [`finding::ValidationReport`]).
//! 6. **[`output`]**: format reports as text, JSON, or SARIF.
//!
//! ## Rules
//!
//! | Rule | Description |
//! |------|-------------|
//! | `annotation/unterminated-block` | Start marker without an end marker |
//! | `annotation/missing-field` | Required field absent or blank |
//! | `annotation/invalid-date` | `DATE` is not ISO 8601 |
//! | `annotation/invalid-action` | `ACTION` is not `GENERATED` |
//! | `annotation/empty-author` | `AUTHOR_ID` present but blank |
//!
//! [SARIF]: https://sarifweb.azurewebsites.net/

pub mod annotation;
pub mod audit;
pub mod config;
pub mod discovery;
pub mod finding;
pub mod output;
pub mod rules;
