//! Metadata line extraction.
//!
//! A metadata line is optional indentation, at most one comment prefix from
//! [`COMMENT_PREFIXES`], optional whitespace, then `IDENT: value`:
//!
//! ```text
//! # TOOL_NAME: GitHub Copilot
//!     // DATE: 2025-02-15
//!  * AUTHOR_ID: dev-001
//! -- ACTION: GENERATED
//! TOOL_VERSION: 1.0
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Comment prefixes tolerated in front of a metadata key.
pub const COMMENT_PREFIXES: &[&str] = &["//", "--", "#", "*"];

/// Identifier immediately followed by a colon; the rest is the value.
static RE_KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+):(.*)$").unwrap());

/// Parses `line` as a `KEY: value` entry.
///
/// Returns `None` for anything else. Ordinary code inside a block is
/// expected and is not an error. The value is trimmed and may be empty;
/// whether an empty value is acceptable is decided by the validator.
///
/// # Examples
///
/// ```
/// use oxidized_provenance::annotation::extract::extract;
///
/// assert_eq!(
///     extract("  # TOOL_NAME:  GitHub Copilot "),
///     Some(("TOOL_NAME".to_string(), "GitHub Copilot".to_string()))
/// );
/// assert_eq!(extract("def example():"), None);
/// assert_eq!(extract("#"), None);
/// ```
pub fn extract(line: &str) -> Option<(String, String)> {
    let rest = strip_comment_prefix(line.trim_start()).trim_start();
    let caps = RE_KEY_VALUE.captures(rest)?;
    let key = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str().trim();
    Some((key.to_string(), value.to_string()))
}

fn strip_comment_prefix(line: &str) -> &str {
    COMMENT_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .unwrap_or(line)
}
