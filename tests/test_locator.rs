use std::path::Path;

use oxidized_provenance::annotation::{validate_file, ValidationOutcome};
use oxidized_provenance::finding::ErrorKind;

fn validate(content: &str) -> ValidationOutcome {
    validate_file(Path::new("test.py"), content)
}

const VALID_BLOCK: &str = "
# START_AI_GENERATED_CODE
# TOOL_NAME: GitHub Copilot
# TOOL_VERSION: 1.0
# DATE: 2025-02-15T10:30:00Z
# AUTHOR_ID: dev-001
# ACTION: GENERATED
def example():
    pass
# END_AI_GENERATED_CODE
";

// ── files without blocks ─────────────────────────────────────────────────────

#[test]
fn empty_file_yields_nothing() {
    let outcome = validate("");
    assert!(outcome.blocks.is_empty());
    assert!(outcome.errors.is_empty());
}

#[test]
fn plain_source_yields_nothing() {
    let outcome = validate("import os\n\ndef main():\n    # TOOL_NAME: not in a block\n    pass\n");
    assert!(outcome.blocks.is_empty());
    assert!(outcome.errors.is_empty());
}

#[test]
fn orphan_end_marker_is_ignored() {
    let outcome = validate("x = 1\n# END_AI_GENERATED_CODE\ny = 2\n");
    assert!(outcome.blocks.is_empty());
    assert!(outcome.errors.is_empty());
}

// ── single block ─────────────────────────────────────────────────────────────

#[test]
fn valid_block_is_reported_with_fields() {
    let outcome = validate(VALID_BLOCK);
    assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
    assert_eq!(outcome.blocks.len(), 1);

    let block = &outcome.blocks[0];
    assert_eq!(block.file, Path::new("test.py"));
    assert_eq!(block.start_line, 2);
    assert_eq!(block.end_line, 10);
    assert_eq!(block.tool_name, "GitHub Copilot");
    assert_eq!(block.tool_version.as_deref(), Some("1.0"));
    assert_eq!(block.date, "2025-02-15T10:30:00Z");
    assert_eq!(block.author_id, "dev-001");
    assert_eq!(block.action, "GENERATED");
}

#[test]
fn validation_is_deterministic() {
    assert_eq!(validate(VALID_BLOCK), validate(VALID_BLOCK));
}

#[test]
fn tool_version_is_optional() {
    let outcome = validate(
        "// START_AI_GENERATED_CODE\n// TOOL_NAME: Cursor\n// DATE: 2025-02-15\n// AUTHOR_ID: a\n// ACTION: GENERATED\n// END_AI_GENERATED_CODE\n",
    );
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.blocks[0].tool_version, None);
}

#[test]
fn markers_match_inside_any_comment_syntax() {
    let content = "/* START_AI_GENERATED_CODE */\n * TOOL_NAME: Copilot\n * DATE: 2025-02-15\n * AUTHOR_ID: u1\n * ACTION: GENERATED\nint f(void);\n/* END_AI_GENERATED_CODE */\n";
    let outcome = validate_file(Path::new("f.c"), content);
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    assert_eq!(outcome.blocks.len(), 1);
    assert_eq!((outcome.blocks[0].start_line, outcome.blocks[0].end_line), (1, 7));
}

#[test]
fn crlf_line_endings() {
    let content = VALID_BLOCK.replace('\n', "\r\n");
    let outcome = validate(&content);
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    assert_eq!(outcome.blocks[0].action, "GENERATED");
}

#[test]
fn duplicate_key_last_value_wins() {
    let outcome = validate(
        "# START_AI_GENERATED_CODE\n# TOOL_NAME: A\n# DATE: 2025-02-15\n# AUTHOR_ID: u\n# ACTION: GENERATED\n# TOOL_NAME: B\n# END_AI_GENERATED_CODE\n",
    );
    assert_eq!(outcome.blocks.len(), 1);
    assert_eq!(outcome.blocks[0].tool_name, "B");
}

#[test]
fn later_duplicate_can_invalidate_block() {
    let outcome = validate(
        "# START_AI_GENERATED_CODE\n# TOOL_NAME: A\n# DATE: 2025-02-15\n# AUTHOR_ID: u\n# ACTION: GENERATED\n# ACTION: MODIFIED\n# END_AI_GENERATED_CODE\n",
    );
    assert!(outcome.blocks.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert!(matches!(outcome.errors[0].kind, ErrorKind::InvalidAction { .. }));
}

#[test]
fn metadata_on_marker_lines_is_not_collected() {
    // The start marker line is consumed by the transition, so its own
    // `KEY: value` shape is never extracted.
    let outcome = validate(
        "# TOOL_NAME: X START_AI_GENERATED_CODE\n# DATE: 2025-02-15\n# AUTHOR_ID: u\n# ACTION: GENERATED\n# END_AI_GENERATED_CODE\n",
    );
    assert!(outcome.blocks.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].message, "Missing or empty required field: TOOL_NAME");
}

// ── multiple blocks ──────────────────────────────────────────────────────────

#[test]
fn sequential_blocks_in_source_order() {
    let content = "
# START_AI_GENERATED_CODE
# TOOL_NAME: Copilot
# DATE: 2025-02-15T10:30:00Z
# AUTHOR_ID: user-1
# ACTION: GENERATED
def func1():
    pass
# END_AI_GENERATED_CODE

# Some manual code

# START_AI_GENERATED_CODE
# TOOL_NAME: GPT-4
# DATE: 2025-02-16T10:30:00Z
# AUTHOR_ID: user-2
# ACTION: GENERATED
def func2():
    pass
# END_AI_GENERATED_CODE
";
    let outcome = validate(content);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.blocks.len(), 2);
    assert_eq!(outcome.blocks[0].tool_name, "Copilot");
    assert_eq!(outcome.blocks[0].author_id, "user-1");
    assert_eq!(outcome.blocks[1].tool_name, "GPT-4");
    assert_eq!(outcome.blocks[1].author_id, "user-2");
    assert!(outcome.blocks[0].end_line < outcome.blocks[1].start_line);
}

#[test]
fn metadata_does_not_leak_between_blocks() {
    let content = "
# START_AI_GENERATED_CODE
# TOOL_NAME: Copilot
# DATE: 2025-02-15
# AUTHOR_ID: user-1
# ACTION: GENERATED
# END_AI_GENERATED_CODE
# START_AI_GENERATED_CODE
# DATE: 2025-02-15
# AUTHOR_ID: user-1
# ACTION: GENERATED
# END_AI_GENERATED_CODE
";
    let outcome = validate(content);
    assert_eq!(outcome.blocks.len(), 1);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].line, 8);
    assert_eq!(
        outcome.errors[0].kind,
        ErrorKind::MissingField {
            field: oxidized_provenance::annotation::Field::ToolName
        }
    );
}

#[test]
fn invalid_block_does_not_stop_scanning() {
    let content = "
# START_AI_GENERATED_CODE
# TOOL_NAME: Copilot
# END_AI_GENERATED_CODE
# START_AI_GENERATED_CODE
# TOOL_NAME: GPT-4
# DATE: 2025-02-16
# AUTHOR_ID: user-2
# ACTION: GENERATED
# END_AI_GENERATED_CODE
";
    let outcome = validate(content);
    assert_eq!(outcome.blocks.len(), 1);
    assert_eq!(outcome.blocks[0].tool_name, "GPT-4");
    assert!(outcome.errors.iter().all(|e| e.line == 2));
    assert_eq!(outcome.errors.len(), 3);
}

// ── unterminated blocks ──────────────────────────────────────────────────────

#[test]
fn missing_end_marker_yields_one_error_at_start() {
    let content = "
# START_AI_GENERATED_CODE
# TOOL_NAME: GPT-4
# DATE: 2025-02-15T10:30:00Z
# AUTHOR_ID: user-123
# ACTION: GENERATED
def incomplete():
    pass
";
    let outcome = validate(content);
    assert!(outcome.blocks.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].kind, ErrorKind::UnterminatedBlock);
    assert_eq!(outcome.errors[0].line, 2);
    assert!(outcome.errors[0]
        .message
        .contains("no matching END_AI_GENERATED_CODE"));
}

#[test]
fn unterminated_block_after_valid_block() {
    let content = format!("{VALID_BLOCK}# START_AI_GENERATED_CODE\n# TOOL_NAME: X\n");
    let outcome = validate(&content);
    assert_eq!(outcome.blocks.len(), 1);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].line, 11);
}

#[test]
fn start_marker_inside_block_is_not_a_new_block() {
    let content = "
# START_AI_GENERATED_CODE
# TOOL_NAME: Outer
# START_AI_GENERATED_CODE
# DATE: 2025-02-15
# AUTHOR_ID: u
# ACTION: GENERATED
# END_AI_GENERATED_CODE
";
    let outcome = validate(content);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.blocks.len(), 1);
    assert_eq!(outcome.blocks[0].start_line, 2);
    assert_eq!(outcome.blocks[0].tool_name, "Outer");
}

#[test]
fn nested_start_without_second_end_leaves_nothing_dangling() {
    let content = "
# START_AI_GENERATED_CODE
# START_AI_GENERATED_CODE
# TOOL_NAME: T
# DATE: 2025-02-15
# AUTHOR_ID: u
# ACTION: GENERATED
# END_AI_GENERATED_CODE
# END_AI_GENERATED_CODE
";
    let outcome = validate(content);
    assert_eq!(outcome.blocks.len(), 1);
    assert!(outcome.errors.is_empty());
}
