use crate::annotation::{AnnotationBlock, Field, ValidationOutcome};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// The ways an annotation block can be malformed.
///
/// The `Display` output is the human-readable message stored on every
/// [`AnnotationError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("START_AI_GENERATED_CODE marker found but no matching END_AI_GENERATED_CODE")]
    UnterminatedBlock,
    #[error("Missing or empty required field: {field}")]
    MissingField { field: Field },
    #[error("Invalid DATE format: {value} (expected ISO 8601)")]
    InvalidDateFormat { value: String },
    #[error("Invalid ACTION value: {value} (expected GENERATED)")]
    InvalidAction { value: String },
    #[error("AUTHOR_ID cannot be empty")]
    EmptyAuthor,
}

impl ErrorKind {
    /// Stable rule identifier used by every output format.
    pub fn rule_id(&self) -> &'static str {
        match self {
            ErrorKind::UnterminatedBlock => "annotation/unterminated-block",
            ErrorKind::MissingField { .. } => "annotation/missing-field",
            ErrorKind::InvalidDateFormat { .. } => "annotation/invalid-date",
            ErrorKind::InvalidAction { .. } => "annotation/invalid-action",
            ErrorKind::EmptyAuthor => "annotation/empty-author",
        }
    }
}

/// A malformed block, positioned at the block's start line.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnnotationError {
    pub rule_id: &'static str,
    pub file: PathBuf,
    pub line: usize,
    pub message: String,
    #[serde(skip)]
    pub kind: ErrorKind,
}

impl AnnotationError {
    pub fn new(file: &Path, line: usize, kind: ErrorKind) -> Self {
        AnnotationError {
            rule_id: kind.rule_id(),
            file: file.to_path_buf(),
            line,
            message: kind.to_string(),
            kind,
        }
    }
}

/// Validation result for one scanned file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub blocks: Vec<AnnotationBlock>,
    pub errors: Vec<AnnotationError>,
}

impl FileReport {
    pub fn new(file: PathBuf, outcome: ValidationOutcome) -> Self {
        FileReport {
            file,
            blocks: outcome.blocks,
            errors: outcome.errors,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub total_files: usize,
    pub files_with_errors: usize,
    pub total_errors: usize,
    pub valid_blocks: usize,
}

/// Aggregated result across every scanned file.
#[derive(Debug, serde::Serialize)]
pub struct ValidationReport {
    pub root: PathBuf,
    pub timestamp: String,
    pub valid: bool,
    pub summary: Summary,
    /// Files that contained at least one block or error, in scan order.
    pub files: Vec<FileReport>,
}

impl ValidationReport {
    /// Aggregates per-file reports.
    ///
    /// `total_files` counts every file that was read, including files with
    /// no annotation blocks; those are not retained in [`files`](Self::files).
    pub fn from_files(root: &Path, reports: Vec<FileReport>) -> Self {
        let total_files = reports.len();

        let files: Vec<FileReport> = reports
            .into_iter()
            .filter(|r| !r.blocks.is_empty() || !r.errors.is_empty())
            .collect();

        let total_errors: usize = files.iter().map(|r| r.errors.len()).sum();
        let valid_blocks: usize = files.iter().map(|r| r.blocks.len()).sum();
        let files_with_errors = files
            .iter()
            .flat_map(|r| r.errors.iter().map(|e| e.file.as_path()))
            .collect::<HashSet<_>>()
            .len();

        ValidationReport {
            root: root.to_path_buf(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            valid: total_errors == 0,
            summary: Summary {
                total_files,
                files_with_errors,
                total_errors,
                valid_blocks,
            },
            files,
        }
    }

    /// Every error across all files, in scan order.
    pub fn errors(&self) -> impl Iterator<Item = &AnnotationError> {
        self.files.iter().flat_map(|r| r.errors.iter())
    }

    /// Every valid block across all files, in scan order.
    pub fn blocks(&self) -> impl Iterator<Item = &AnnotationBlock> {
        self.files.iter().flat_map(|r| r.blocks.iter())
    }
}
