//! End-to-end tests for the script-args binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

const SCHEMA: &str = r#"
[name]
type = "str"
description = "Who to greet"
cli_arg = "--name"
env_var = "SCRIPT_ARGS_CLI_TEST_NAME"
default_value = "world"

[count]
type = "int"
cli_arg = "--count"

[pair]
type = "tuple[int,str]"
cli_arg = "--pair"

[points]
type = "list[tuple[int,int]]"
cli_arg = "--points"
env_var = "SCRIPT_ARGS_CLI_TEST_POINTS"

[tags]
type = "list[str]"
cli_arg = "--tag"
default_value = "a;;b"

[dry_run]
type = "switch"
cli_arg = "--dry-run"
"#;

/// Get a Command for the script-args binary
fn script_args_cmd() -> Command {
    let mut cmd = Command::cargo_bin("script-args").expect("Failed to find script-args binary");
    cmd.env_remove("SCRIPT_ARGS_CLI_TEST_NAME")
        .env_remove("SCRIPT_ARGS_CLI_TEST_POINTS")
        .env_remove("SCRIPT_ARGS_SCHEMA");
    cmd
}

fn write_schema(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("args.toml");
    fs::write(&path, content).unwrap();
    path
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("Failed to run script-args");
    assert!(
        output.status.success(),
        "script-args failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_defaults_only() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, SCHEMA);

    let json = stdout_json(script_args_cmd().arg("--schema").arg(&schema));
    assert_eq!(
        json,
        json!({
            "name": "world",
            "count": null,
            "pair": null,
            "points": null,
            "tags": ["a", "b"],
            "dry_run": null,
        })
    );
}

#[test]
fn test_cli_env_and_default_precedence() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, SCHEMA);

    let json = stdout_json(
        script_args_cmd()
            .env("SCRIPT_ARGS_CLI_TEST_NAME", "env-name")
            .env("SCRIPT_ARGS_CLI_TEST_POINTS", "1 2;3 4")
            .arg("--schema")
            .arg(&schema)
            .args(["--", "--count", "3", "--pair", "5", "hello", "--dry-run"]),
    );
    assert_eq!(json["name"], "env-name");
    assert_eq!(json["count"], 3);
    assert_eq!(json["pair"], json!([5, "hello"]));
    assert_eq!(json["points"], json!([[1, 2], [3, 4]]));
    assert_eq!(json["dry_run"], true);
}

#[test]
fn test_schema_path_from_environment() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, SCHEMA);

    let json = stdout_json(
        script_args_cmd()
            .env("SCRIPT_ARGS_SCHEMA", &schema)
            .args(["--compact", "--", "--name", ""]),
    );
    assert_eq!(json["name"], "");
}

#[test]
fn test_arity_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, SCHEMA);

    script_args_cmd()
        .env("SCRIPT_ARGS_CLI_TEST_POINTS", "1 2;3")
        .arg("--schema")
        .arg(&schema)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("points"))
        .stderr(predicate::str::contains("expected 2 values and got 1"));
}

#[test]
fn test_type_error_fails() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, SCHEMA);

    script_args_cmd()
        .arg("--schema")
        .arg(&schema)
        .args(["--", "--count", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot convert 'many' to int"));
}

#[test]
fn test_invalid_schema_fails() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "[x]\ntype = \"tuple[]\"\ncli_arg = \"--x\"\n");

    script_args_cmd()
        .arg("--schema")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid schema for argument 'x'"));
}

#[test]
fn test_unknown_script_option_shows_usage() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, SCHEMA);

    script_args_cmd()
        .arg("--schema")
        .arg(&schema)
        .args(["--", "--bogus"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn test_missing_schema_file() {
    let dir = TempDir::new().unwrap();

    script_args_cmd()
        .arg("--schema")
        .arg(dir.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema not found"));
}

#[test]
fn test_help() {
    script_args_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--schema"));
}
