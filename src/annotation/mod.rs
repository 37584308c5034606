//! AI-generated code annotation blocks.
//!
//! An annotation block is a span of source text delimited by two marker
//! tokens, carrying provenance metadata on `KEY: value` lines:
//!
//! ```text
//! # START_AI_GENERATED_CODE
//! # TOOL_NAME: GitHub Copilot
//! # TOOL_VERSION: 1.0
//! # DATE: 2025-02-15T10:30:00Z
//! # AUTHOR_ID: dev-001
//! # ACTION: GENERATED
//! def example():
//!     pass
//! # END_AI_GENERATED_CODE
//! ```
//!
//! The markers are matched anywhere within a line, regardless of the comment
//! syntax around them. Scanning is split into three stages:
//!
//! 1. **[`extract`]**: parse one line as a `KEY: value` metadata entry.
//! 2. **[`locator`]**: walk a file's lines, pair start/end markers and
//!    accumulate each block's [`Metadata`].
//! 3. **[`validate`]**: apply the field rules to a finished block.
//!
//! [`validate_file`] runs the whole pipeline over one file. [`render`] goes
//! the other way and writes new blocks.

pub mod extract;
pub mod locator;
pub mod render;
pub mod validate;

use crate::finding::AnnotationError;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Token that opens an annotation block.
pub const START_MARKER: &str = "START_AI_GENERATED_CODE";

/// Token that closes an annotation block.
pub const END_MARKER: &str = "END_AI_GENERATED_CODE";

/// The only accepted value of the `ACTION` field.
pub const GENERATED_ACTION: &str = "GENERATED";

/// Key/value entries collected from the interior of one block.
///
/// Keys are case-sensitive. A key seen twice in the same block keeps the
/// last value.
pub type Metadata = HashMap<String, String>;

/// Recognized metadata keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Field {
    #[serde(rename = "TOOL_NAME")]
    ToolName,
    #[serde(rename = "TOOL_VERSION")]
    ToolVersion,
    #[serde(rename = "DATE")]
    Date,
    #[serde(rename = "AUTHOR_ID")]
    AuthorId,
    #[serde(rename = "ACTION")]
    Action,
}

impl Field {
    /// Fields that must be present with a non-blank value.
    pub const REQUIRED: [Field; 4] = [Field::ToolName, Field::Date, Field::AuthorId, Field::Action];

    /// The key as written in source files.
    pub fn key(self) -> &'static str {
        match self {
            Field::ToolName => "TOOL_NAME",
            Field::ToolVersion => "TOOL_VERSION",
            Field::Date => "DATE",
            Field::AuthorId => "AUTHOR_ID",
            Field::Action => "ACTION",
        }
    }

    /// Looks up this field's value in a block's metadata.
    pub fn get(self, metadata: &Metadata) -> Option<&str> {
        metadata.get(self.key()).map(String::as_str)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A block that passed every validation rule.
///
/// Only [`validate::validate`] constructs these, so holding one means the
/// metadata was complete and well-formed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnnotationBlock {
    pub file: PathBuf,
    /// 1-indexed line of the start marker.
    pub start_line: usize,
    /// 1-indexed line of the end marker; always greater than `start_line`.
    pub end_line: usize,
    pub tool_name: String,
    pub tool_version: Option<String>,
    /// Raw `DATE` value, already checked to be ISO 8601.
    pub date: String,
    pub author_id: String,
    pub action: String,
}

/// Everything found in one file, in top-to-bottom order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ValidationOutcome {
    pub blocks: Vec<AnnotationBlock>,
    pub errors: Vec<AnnotationError>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Finds and validates every annotation block in `content`.
///
/// `file` only labels the resulting blocks and errors; nothing is read from
/// disk. The result depends solely on the two arguments.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use oxidized_provenance::annotation::validate_file;
///
/// let source = "\
/// // START_AI_GENERATED_CODE
/// // TOOL_NAME: Copilot
/// // DATE: 2025-02-15
/// // AUTHOR_ID: dev-001
/// // ACTION: GENERATED
/// fn answer() -> u32 { 42 }
/// // END_AI_GENERATED_CODE
/// ";
///
/// let outcome = validate_file(Path::new("lib.rs"), source);
/// assert!(outcome.is_valid());
/// assert_eq!(outcome.blocks[0].tool_name, "Copilot");
/// assert_eq!(outcome.blocks[0].end_line, 7);
/// ```
pub fn validate_file(file: &Path, content: &str) -> ValidationOutcome {
    locator::scan(file, content)
}
