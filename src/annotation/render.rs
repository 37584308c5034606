//! Annotation block generation.
//!
//! The inverse of the locator: wraps a span of code in start/end markers and
//! metadata lines written with a single-line comment prefix. Text returned by
//! [`annotate_range`] always passes [`validate_file`](super::validate_file)
//! for the new block.
//!
//! ```text
//!     # START_AI_GENERATED_CODE
//!     # TOOL_NAME: GitHub Copilot
//!     # TOOL_VERSION: 1.0
//!     # DATE: 2025-02-15T10:30:00Z
//!     # AUTHOR_ID: dev-001
//!     # ACTION: GENERATED
//!     def example():
//!         pass
//!     # END_AI_GENERATED_CODE
//! ```
//!
//! The marker lines take the indentation of the first code line.

use super::extract::{self, COMMENT_PREFIXES};
use super::{validate, Field, Metadata, END_MARKER, GENERATED_ACTION, START_MARKER};
use crate::finding::AnnotationError;
use std::path::{Path, PathBuf};

/// Provenance recorded in a generated block. `ACTION` is always
/// [`GENERATED_ACTION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationMetadata {
    pub tool_name: String,
    /// Written only when present.
    pub tool_version: Option<String>,
    pub date: String,
    pub author_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    #[error("Invalid annotation metadata: {}", join_messages(.0))]
    InvalidMetadata(Vec<AnnotationError>),
    #[error("{field} must be a single line without annotation markers")]
    UnsafeValue { field: Field },
    #[error("Selected code already contains an annotation marker")]
    NestedMarker,
    #[error("Selected code line {line} would be read as the {field} field")]
    ShadowedField { line: usize, field: Field },
    #[error("No code selected")]
    EmptySelection,
    #[error("Invalid line range: {0} (expected N or START-END, 1-indexed)")]
    InvalidRange(String),
    #[error("Line range {start}-{end} is outside the file ({lines} lines)")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        lines: usize,
    },
    #[error("Unsupported comment prefix: {0} (expected one of //, --, #, *)")]
    UnsupportedPrefix(String),
    #[error("No comment prefix known for {0}; pass --comment-prefix")]
    UnknownLanguage(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {0}: not UTF-8 text")]
    NotUtf8(PathBuf),
}

fn join_messages(errors: &[AnnotationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AnnotationMetadata {
    /// The entries a locator would collect from the rendered block.
    pub fn to_metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(Field::ToolName.key().to_string(), self.tool_name.clone());
        if let Some(version) = &self.tool_version {
            metadata.insert(Field::ToolVersion.key().to_string(), version.clone());
        }
        metadata.insert(Field::Date.key().to_string(), self.date.clone());
        metadata.insert(Field::AuthorId.key().to_string(), self.author_id.clone());
        metadata.insert(Field::Action.key().to_string(), GENERATED_ACTION.to_string());
        metadata
    }

    /// Applies the same rules `validate` enforces on scanned blocks, plus
    /// the constraint that every value fits on one metadata line.
    ///
    /// # Errors
    ///
    /// [`AnnotateError::UnsafeValue`] for a value containing a line break or
    /// marker token, otherwise [`AnnotateError::InvalidMetadata`] carrying
    /// every rule violation.
    pub fn check(&self) -> Result<(), AnnotateError> {
        let values = [
            (Field::ToolName, Some(self.tool_name.as_str())),
            (Field::ToolVersion, self.tool_version.as_deref()),
            (Field::Date, Some(self.date.as_str())),
            (Field::AuthorId, Some(self.author_id.as_str())),
        ];
        for (field, value) in values {
            if value.is_some_and(is_unsafe_value) {
                return Err(AnnotateError::UnsafeValue { field });
            }
        }

        validate::validate(Path::new(""), 1, 2, &self.to_metadata())
            .map(|_| ())
            .map_err(AnnotateError::InvalidMetadata)
    }
}

fn is_unsafe_value(value: &str) -> bool {
    value.contains(['\n', '\r']) || contains_marker(value)
}

fn contains_marker(text: &str) -> bool {
    text.contains(START_MARKER) || text.contains(END_MARKER)
}

/// Wraps `code` in an annotation block commented with `prefix`.
///
/// One trailing newline on `code` is dropped so the end marker follows the
/// last code line directly. The result has no trailing newline. Metadata is
/// written as given; call [`AnnotationMetadata::check`] first.
///
/// # Examples
///
/// ```
/// use oxidized_provenance::annotation::render::{render_block, AnnotationMetadata};
///
/// let meta = AnnotationMetadata {
///     tool_name: "Copilot".to_string(),
///     tool_version: None,
///     date: "2025-02-15".to_string(),
///     author_id: "dev-001".to_string(),
/// };
/// let block = render_block("//", &meta, "    let x = 1;\n");
/// assert_eq!(
///     block,
///     "    // START_AI_GENERATED_CODE
///     // TOOL_NAME: Copilot
///     // DATE: 2025-02-15
///     // AUTHOR_ID: dev-001
///     // ACTION: GENERATED
///     let x = 1;
///     // END_AI_GENERATED_CODE"
/// );
/// ```
pub fn render_block(prefix: &str, meta: &AnnotationMetadata, code: &str) -> String {
    let code = code.strip_suffix('\n').unwrap_or(code);
    let first = code.lines().next().unwrap_or_default();
    let indent = &first[..first.len() - first.trim_start().len()];
    let comment = |text: &str| format!("{indent}{prefix} {text}");

    let mut lines = vec![
        comment(START_MARKER),
        comment(&format!("{}: {}", Field::ToolName, meta.tool_name)),
    ];
    if let Some(version) = &meta.tool_version {
        lines.push(comment(&format!("{}: {version}", Field::ToolVersion)));
    }
    lines.push(comment(&format!("{}: {}", Field::Date, meta.date)));
    lines.push(comment(&format!("{}: {}", Field::AuthorId, meta.author_id)));
    lines.push(comment(&format!("{}: {GENERATED_ACTION}", Field::Action)));
    lines.push(code.to_string());
    lines.push(comment(END_MARKER));

    lines.join("\n")
}

/// Comment prefix for a file extension (without the dot), case-insensitive.
///
/// Covers languages whose line comment is one of [`COMMENT_PREFIXES`];
/// languages such as MATLAB (`%`) are left out because blocks written in
/// their comment syntax could not be validated.
pub fn comment_prefix_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "py" | "rb" | "sh" | "bash" | "zsh" => Some("#"),
        "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "java" | "c" | "h" | "cpp" | "cc"
        | "cxx" | "hpp" | "cs" | "go" | "php" | "swift" | "kt" | "kts" | "rs" => Some("//"),
        "sql" | "hs" => Some("--"),
        _ => None,
    }
}

/// Parses `N` or `START-END` (1-indexed, inclusive).
///
/// # Examples
///
/// ```
/// use oxidized_provenance::annotation::render::parse_line_range;
///
/// assert_eq!(parse_line_range("3-7").unwrap(), (3, 7));
/// assert_eq!(parse_line_range("4").unwrap(), (4, 4));
/// assert!(parse_line_range("7-3").is_err());
/// ```
pub fn parse_line_range(lines: &str) -> Result<(usize, usize), AnnotateError> {
    let invalid = || AnnotateError::InvalidRange(lines.to_string());
    let parts: Vec<&str> = lines.trim().split('-').collect();
    let (start, end) = match parts.as_slice() {
        [line] => {
            let line = line.parse::<usize>().map_err(|_| invalid())?;
            (line, line)
        }
        [start, end] => (
            start.parse::<usize>().map_err(|_| invalid())?,
            end.parse::<usize>().map_err(|_| invalid())?,
        ),
        _ => return Err(invalid()),
    };
    if start == 0 || start > end {
        return Err(invalid());
    }
    Ok((start, end))
}

/// Wraps lines `range` of `content` (the whole text when `None`) in a block
/// and returns the new text. Line endings and a final newline are kept.
///
/// # Errors
///
/// Fails when the metadata does not pass [`AnnotationMetadata::check`], the
/// prefix is not one of [`COMMENT_PREFIXES`], the range falls outside the
/// text, or the selection is blank, holds a marker, or has a line that
/// would be read back as metadata.
pub fn annotate_range(
    content: &str,
    prefix: &str,
    meta: &AnnotationMetadata,
    range: Option<(usize, usize)>,
) -> Result<String, AnnotateError> {
    if !COMMENT_PREFIXES.contains(&prefix) {
        return Err(AnnotateError::UnsupportedPrefix(prefix.to_string()));
    }
    meta.check()?;

    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(AnnotateError::EmptySelection);
    }
    let (start, end) = range.unwrap_or((1, lines.len()));
    if start == 0 || start > end || end > lines.len() {
        return Err(AnnotateError::RangeOutOfBounds {
            start,
            end,
            lines: lines.len(),
        });
    }

    let selected = lines[start - 1..end].join("\n");
    if selected.trim().is_empty() {
        return Err(AnnotateError::EmptySelection);
    }
    if contains_marker(&selected) {
        return Err(AnnotateError::NestedMarker);
    }
    if let Some(err) = shadowed_field(&lines, start, end) {
        return Err(err);
    }

    let block = render_block(prefix, meta, &selected);
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out: Vec<&str> = lines[..start - 1].to_vec();
    out.extend(block.lines());
    out.extend(&lines[end..]);

    let mut text = out.join(newline);
    if content.ends_with('\n') {
        text.push_str(newline);
    }
    Ok(text)
}

/// A code line parsing as a known metadata key would override the value
/// written above it once the block is scanned.
fn shadowed_field(lines: &[&str], start: usize, end: usize) -> Option<AnnotateError> {
    const KEYS: [Field; 5] = [
        Field::ToolName,
        Field::ToolVersion,
        Field::Date,
        Field::AuthorId,
        Field::Action,
    ];
    (start..=end).find_map(|line| {
        let (key, _) = extract::extract(lines[line - 1])?;
        let field = KEYS.into_iter().find(|f| f.key() == key)?;
        Some(AnnotateError::ShadowedField { line, field })
    })
}

/// Reads `path` and annotates it, choosing the comment prefix from the
/// file extension unless `prefix` is given.
///
/// # Errors
///
/// Everything [`annotate_range`] reports, plus read failures and
/// [`AnnotateError::UnknownLanguage`] for an unmapped extension.
pub fn annotate_file(
    path: &Path,
    prefix: Option<&str>,
    meta: &AnnotationMetadata,
    range: Option<(usize, usize)>,
) -> Result<String, AnnotateError> {
    let prefix = match prefix {
        Some(p) => p,
        None => path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(comment_prefix_for_extension)
            .ok_or_else(|| AnnotateError::UnknownLanguage(path.to_path_buf()))?,
    };

    let bytes = std::fs::read(path).map_err(|source| AnnotateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| AnnotateError::NotUtf8(path.to_path_buf()))?;

    tracing::debug!(file = %path.display(), prefix, ?range, "annotating");
    annotate_range(&content, prefix, meta, range)
}
