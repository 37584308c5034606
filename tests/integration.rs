use assert_cmd::Command;
use predicates::prelude::*;

fn oxidized_provenance() -> Command {
    assert_cmd::cargo::cargo_bin_cmd!("oxidized-provenance")
}

const VALID: &str = "
# START_AI_GENERATED_CODE
# TOOL_NAME: GPT-4
# DATE: 2025-02-15T10:30:00Z
# AUTHOR_ID: user-1
# ACTION: GENERATED
def example():
    pass
# END_AI_GENERATED_CODE
";

const MISSING_TOOL: &str = "
# START_AI_GENERATED_CODE
# DATE: 2025-02-15T10:30:00Z
# AUTHOR_ID: user-1
# ACTION: GENERATED
# END_AI_GENERATED_CODE
";

fn repo_with(file: &str, content: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(file), content).unwrap();
    dir
}

#[test]
fn validate_valid_annotations_passes() {
    let dir = repo_with("test.py", VALID);
    oxidized_provenance()
        .args(["validate", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn validate_invalid_annotations_fails() {
    let dir = repo_with("test.py", MISSING_TOOL);
    oxidized_provenance()
        .args(["validate", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("TOOL_NAME"));
}

#[test]
fn validate_json_format() {
    let dir = repo_with("test.py", VALID);
    oxidized_provenance()
        .args(["validate", dir.path().to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"))
        .stdout(predicate::str::contains("\"errors\""))
        .stdout(predicate::str::contains("\"summary\""));
}

#[test]
fn validate_sarif_format() {
    let dir = repo_with("test.py", MISSING_TOOL);
    oxidized_provenance()
        .args(["validate", dir.path().to_str().unwrap(), "--format", "sarif"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"version\": \"2.1.0\""))
        .stdout(predicate::str::contains("annotation/missing-field"));
}

#[test]
fn custom_file_patterns_skip_other_files() {
    let dir = repo_with("test.py", MISSING_TOOL);
    std::fs::write(dir.path().join("test.js"), "// JavaScript\n").unwrap();

    oxidized_provenance()
        .args([
            "validate",
            dir.path().to_str().unwrap(),
            "--file-patterns",
            "*.js",
        ])
        .assert()
        .success();
}

#[test]
fn exclude_patterns_skip_directories() {
    let dir = tempfile::tempdir().unwrap();
    let vendored = dir.path().join("third_party");
    std::fs::create_dir_all(&vendored).unwrap();
    std::fs::write(vendored.join("lib.py"), MISSING_TOOL).unwrap();

    oxidized_provenance()
        .args(["validate", dir.path().to_str().unwrap()])
        .assert()
        .code(1);

    oxidized_provenance()
        .args([
            "validate",
            dir.path().to_str().unwrap(),
            "--exclude-patterns",
            ".git,third_party",
        ])
        .assert()
        .success();
}

#[test]
fn config_file_sets_patterns() {
    let dir = repo_with("test.py", MISSING_TOOL);
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[scan]\nfile_patterns = [\"*.rs\"]\n").unwrap();

    oxidized_provenance()
        .args([
            "validate",
            dir.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success();
}

#[test]
fn missing_config_file_exits_2() {
    let dir = repo_with("test.py", VALID);
    oxidized_provenance()
        .args([
            "validate",
            dir.path().to_str().unwrap(),
            "--config",
            "no-such-config.toml",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn nonexistent_path_exits_2() {
    oxidized_provenance()
        .args(["validate", "tests/does-not-exist"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn output_to_file() {
    let dir = repo_with("test.py", VALID);
    let output_file = dir.path().join("report.json");

    oxidized_provenance()
        .args([
            "validate",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
            "--output",
            output_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Output written to"));

    let content = std::fs::read_to_string(&output_file).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["summary"]["total_files"], 1);
}

#[test]
fn verbose_logs_to_stderr_only() {
    let dir = repo_with("test.py", MISSING_TOOL);
    oxidized_provenance()
        .env_remove("RUST_LOG")
        .args([
            "validate",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
            "--verbose",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("annotation errors found"))
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn annotate_in_place_then_validate_passes() {
    let dir = repo_with("util.ts", "export const one = 1;\nexport const two = 2;\n");
    let file = dir.path().join("util.ts");

    oxidized_provenance()
        .args([
            "annotate",
            file.to_str().unwrap(),
            "--tool-name",
            "Copilot",
            "--author-id",
            "dev-001",
            "--lines",
            "2",
            "--in-place",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Annotated"));

    let content = std::fs::read_to_string(&file).unwrap();
    assert!(content.starts_with("export const one = 1;\n// START_AI_GENERATED_CODE\n"));
    assert!(!content.contains("TOOL_VERSION"));

    oxidized_provenance()
        .args(["validate", dir.path().to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid_blocks\": 1"));
}

#[test]
fn annotate_prints_to_stdout_by_default() {
    let dir = repo_with("job.py", "print('hi')\n");
    let file = dir.path().join("job.py");

    oxidized_provenance()
        .args([
            "annotate",
            file.to_str().unwrap(),
            "--tool-name",
            "GPT-4",
            "--tool-version",
            "2024-08-06",
            "--author-id",
            "user-1",
            "--date",
            "2025-02-15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# TOOL_VERSION: 2024-08-06"))
        .stdout(predicate::str::contains("# DATE: 2025-02-15"));

    assert_eq!(std::fs::read_to_string(&file).unwrap(), "print('hi')\n");
}

#[test]
fn annotate_bad_date_exits_2() {
    let dir = repo_with("job.py", "print('hi')\n");
    oxidized_provenance()
        .args([
            "annotate",
            dir.path().join("job.py").to_str().unwrap(),
            "--tool-name",
            "GPT-4",
            "--author-id",
            "user-1",
            "--date",
            "02/15/2025",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid DATE format"));
}

#[test]
fn annotate_unknown_extension_exits_2() {
    let dir = repo_with("notes.m", "x = 1;\n");
    oxidized_provenance()
        .args([
            "annotate",
            dir.path().join("notes.m").to_str().unwrap(),
            "--tool-name",
            "GPT-4",
            "--author-id",
            "user-1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--comment-prefix"));
}

#[test]
fn list_rules_shows_rules() {
    oxidized_provenance()
        .args(["list-rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("annotation/unterminated-block"))
        .stdout(predicate::str::contains("annotation/invalid-date"))
        .stdout(predicate::str::contains("Total: 5 rules"));
}

#[test]
fn explain_known_rule() {
    oxidized_provenance()
        .args(["explain", "annotation/invalid-action"])
        .assert()
        .success()
        .stdout(predicate::str::contains("annotation/invalid-action"))
        .stdout(predicate::str::contains("Remediation"));
}

#[test]
fn explain_unknown_rule_exits_2() {
    oxidized_provenance()
        .args(["explain", "nonexistent/rule"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown rule"));
}
