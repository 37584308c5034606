//! Built-in rule catalogue.
//!
//! Every [`ErrorKind`](crate::finding::ErrorKind) maps to one rule here.
//! Used by the `list-rules` and `explain` commands and for SARIF rule
//! metadata.

/// Metadata for a single validation rule.
pub struct RuleInfo {
    /// Unique rule identifier (e.g., `"annotation/missing-field"`).
    pub id: &'static str,
    /// Short description of what the rule checks.
    pub message: &'static str,
    /// Guidance on how to fix a violation.
    pub remediation: &'static str,
}

static RULES: &[RuleInfo] = &[
    RuleInfo {
        id: "annotation/unterminated-block",
        message: "START_AI_GENERATED_CODE marker has no matching END_AI_GENERATED_CODE",
        remediation: "Close the block with an END_AI_GENERATED_CODE comment after the generated code",
    },
    RuleInfo {
        id: "annotation/missing-field",
        message: "Required field (TOOL_NAME, DATE, AUTHOR_ID, ACTION) is missing or empty",
        remediation: "Add the field inside the block as a `KEY: value` comment line",
    },
    RuleInfo {
        id: "annotation/invalid-date",
        message: "DATE is not an ISO 8601 date or date-time",
        remediation: "Use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SSZ (e.g. 2025-02-15T10:30:00Z)",
    },
    RuleInfo {
        id: "annotation/invalid-action",
        message: "ACTION is not GENERATED",
        remediation: "Set `ACTION: GENERATED` (exact, upper case)",
    },
    RuleInfo {
        id: "annotation/empty-author",
        message: "AUTHOR_ID is present but blank",
        remediation: "Fill in AUTHOR_ID with the id of the developer who accepted the code",
    },
];

/// Returns every built-in rule in catalogue order.
pub fn all_rules() -> &'static [RuleInfo] {
    RULES
}

/// Looks up a rule by id.
///
/// # Examples
///
/// ```
/// use oxidized_provenance::rules::find_rule;
///
/// assert!(find_rule("annotation/invalid-date").is_some());
/// assert!(find_rule("unknown/rule").is_none());
/// ```
pub fn find_rule(id: &str) -> Option<&'static RuleInfo> {
    RULES.iter().find(|r| r.id == id)
}
