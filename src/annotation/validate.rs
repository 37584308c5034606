//! Field validation for a completed block.
//!
//! # Rules
//!
//! | Rule | Error kind |
//! |------|------------|
//! | `TOOL_NAME`, `DATE`, `AUTHOR_ID`, `ACTION` present and non-blank | [`ErrorKind::MissingField`] (one per field) |
//! | `DATE` is ISO 8601 | [`ErrorKind::InvalidDateFormat`] |
//! | `ACTION` is exactly `GENERATED` | [`ErrorKind::InvalidAction`] |
//! | `AUTHOR_ID`, when the key exists, is non-blank | [`ErrorKind::EmptyAuthor`] |
//!
//! Every rule runs; a block with three problems yields three errors, all
//! positioned at the block's start line. `TOOL_VERSION` is optional and
//! copied through untouched.

use super::{AnnotationBlock, Field, Metadata, GENERATED_ACTION};
use crate::finding::{AnnotationError, ErrorKind};
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Calendar date, optional time (`T` or space separated) with optional
/// fraction, optional `Z` or numeric offset after the time. ASCII digits only.
static RE_ISO_8601: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})(?:[T ]([0-9]{2})(?::([0-9]{2})(?::([0-9]{2})(?:[.,]([0-9]{1,9}))?)?)?(Z|[+-][0-9]{2}:?[0-9]{2})?)?$",
    )
    .unwrap()
});

/// Validates a block's metadata.
///
/// Returns the [`AnnotationBlock`] when every rule passes, or every error
/// found otherwise. The two outcomes are exclusive.
pub fn validate(
    file: &Path,
    start_line: usize,
    end_line: usize,
    metadata: &Metadata,
) -> Result<AnnotationBlock, Vec<AnnotationError>> {
    let mut errors = Vec::new();
    let mut emit = |kind: ErrorKind| errors.push(AnnotationError::new(file, start_line, kind));

    for field in Field::REQUIRED {
        if non_blank(field, metadata).is_none() {
            emit(ErrorKind::MissingField { field });
        }
    }

    if let Some(date) = non_blank(Field::Date, metadata) {
        if !is_valid_iso_date(date) {
            emit(ErrorKind::InvalidDateFormat {
                value: date.to_string(),
            });
        }
    }

    if let Some(action) = non_blank(Field::Action, metadata) {
        if action != GENERATED_ACTION {
            emit(ErrorKind::InvalidAction {
                value: action.to_string(),
            });
        }
    }

    if let Some(author) = Field::AuthorId.get(metadata) {
        if author.trim().is_empty() {
            emit(ErrorKind::EmptyAuthor);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let owned = |field: Field| field.get(metadata).unwrap_or_default().to_string();
    Ok(AnnotationBlock {
        file: file.to_path_buf(),
        start_line,
        end_line,
        tool_name: owned(Field::ToolName),
        tool_version: Field::ToolVersion.get(metadata).map(str::to_string),
        date: owned(Field::Date),
        author_id: owned(Field::AuthorId),
        action: owned(Field::Action),
    })
}

/// Returns the trimmed value of `field` if it is present and non-blank.
fn non_blank(field: Field, metadata: &Metadata) -> Option<&str> {
    field
        .get(metadata)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Returns `true` if `value` is an ISO 8601 date or date-time.
///
/// Accepts `YYYY-MM-DD`, optionally followed by `T` (or a space) and
/// `HH`, `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`, optionally followed by `Z`
/// or a `±HH:MM` / `±HHMM` offset. Components must form a real calendar
/// date and clock time.
///
/// # Examples
///
/// ```
/// use oxidized_provenance::annotation::validate::is_valid_iso_date;
///
/// assert!(is_valid_iso_date("2025-02-15"));
/// assert!(is_valid_iso_date("2025-02-15T10:30:00Z"));
/// assert!(is_valid_iso_date("2025-02-15T10:30:00.123+05:30"));
/// assert!(!is_valid_iso_date("2025/02/15"));
/// assert!(!is_valid_iso_date("2025-02-30"));
/// ```
pub fn is_valid_iso_date(value: &str) -> bool {
    let Some(caps) = RE_ISO_8601.captures(value.trim()) else {
        return false;
    };
    // A present group that fails to parse is malformed, never "absent".
    let num = |i: usize| -> Result<Option<u32>, ()> {
        caps.get(i)
            .map(|m| m.as_str().parse::<u32>().map_err(|_| ()))
            .transpose()
    };

    let (Ok(Some(year)), Ok(Some(month)), Ok(Some(day))) = (num(1), num(2), num(3)) else {
        return false;
    };
    if NaiveDate::from_ymd_opt(year as i32, month, day).is_none() {
        return false;
    }

    if caps.get(4).is_none() {
        // Date only: the pattern cannot carry an offset without a time.
        return true;
    }
    let (Ok(Some(hour)), Ok(minute), Ok(second)) = (num(4), num(5), num(6)) else {
        return false;
    };
    let nanos = match caps.get(7) {
        Some(m) => match fraction_to_nanos(m.as_str()) {
            Some(n) => n,
            None => return false,
        },
        None => 0,
    };
    if NaiveTime::from_hms_nano_opt(hour, minute.unwrap_or(0), second.unwrap_or(0), nanos)
        .is_none()
    {
        return false;
    }

    match caps.get(8).map(|m| m.as_str()) {
        None | Some("Z") => true,
        Some(offset) => parse_offset(offset).is_some(),
    }
}

/// Scales a 1–9 digit fraction to nanoseconds (`"5"` → 500_000_000).
fn fraction_to_nanos(digits: &str) -> Option<u32> {
    format!("{digits:0<9}").parse().ok()
}

fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let digits: String = offset[1..].chars().filter(|c| *c != ':').collect();
    let hours: i32 = digits.get(..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..4)?.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
