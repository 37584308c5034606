//! Block locator.
//!
//! A two-state machine over a file's lines:
//!
//! | State | Line | Next |
//! |-------|------|------|
//! | `Searching` | contains [`START_MARKER`] | `InBlock` (start line recorded) |
//! | `Searching` | anything else | `Searching` |
//! | `InBlock` | contains [`END_MARKER`] | `Searching` (block handed to the validator) |
//! | `InBlock` | `KEY: value` | `InBlock` (entry inserted, last write wins) |
//! | `InBlock` | anything else | `InBlock` |
//!
//! Reaching end of input while `InBlock` yields one
//! [`ErrorKind::UnterminatedBlock`] at the start line. Because the open block
//! has consumed every remaining line, nothing after it is discovered.
//!
//! A start marker seen while already `InBlock` is treated like any other
//! non-metadata line; blocks do not nest.

use super::{extract, validate, Metadata, ValidationOutcome, END_MARKER, START_MARKER};
use crate::finding::{AnnotationError, ErrorKind};
use std::path::Path;

/// Locator state between lines.
#[derive(Debug)]
enum ScanState {
    Searching,
    InBlock { start_line: usize, metadata: Metadata },
}

/// Scans `content` top to bottom, validating each completed block.
pub fn scan(file: &Path, content: &str) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    let mut state = ScanState::Searching;

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;

        state = match state {
            ScanState::Searching if line.contains(START_MARKER) => ScanState::InBlock {
                start_line: line_num,
                metadata: Metadata::new(),
            },
            ScanState::Searching => ScanState::Searching,
            ScanState::InBlock { start_line, metadata } if line.contains(END_MARKER) => {
                match validate::validate(file, start_line, line_num, &metadata) {
                    Ok(block) => outcome.blocks.push(block),
                    Err(errors) => outcome.errors.extend(errors),
                }
                ScanState::Searching
            }
            ScanState::InBlock {
                start_line,
                mut metadata,
            } => {
                if let Some((key, value)) = extract::extract(line) {
                    metadata.insert(key, value);
                }
                ScanState::InBlock { start_line, metadata }
            }
        };
    }

    if let ScanState::InBlock { start_line, .. } = state {
        outcome.errors.push(AnnotationError::new(
            file,
            start_line,
            ErrorKind::UnterminatedBlock,
        ));
    }

    outcome
}
