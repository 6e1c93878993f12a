//! Integration tests for the `kilnflow` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const CANDIDATE: &str =
    r#"{"kiln_id":"kiln-1","recurrence":"once","start_date":"2024-01-01","load_after":"18:00:00"}"#;

fn kilnflow() -> Command {
    Command::cargo_bin("kilnflow").unwrap()
}

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("kilnflow-cli-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_check_reports_collision_with_exit_code_one() {
    let existing = write_fixture("colliding.json", &format!("[{CANDIDATE}]"));

    kilnflow()
        .args(["check", "--existing"])
        .arg(&existing)
        .write_stdin(CANDIDATE)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("start_proximity"))
        .stdout(predicate::str::contains("kiln-1"));
}

#[test]
fn test_check_clean_rules_exit_zero() {
    let existing = write_fixture(
        "clean.json",
        r#"[{"kiln_id":"kiln-1","recurrence":"once","start_date":"2024-05-06","load_after":"18:00:00"}]"#,
    );

    kilnflow()
        .args(["check", "--existing"])
        .arg(&existing)
        .write_stdin(CANDIDATE)
        .assert()
        .success()
        .stdout(predicate::str::contains("no collisions"));
}

#[test]
fn test_check_json_report() {
    let existing = write_fixture("json-report.json", &format!("[{CANDIDATE}]"));

    kilnflow()
        .args(["check", "--json", "--existing"])
        .arg(&existing)
        .write_stdin(CANDIDATE)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""warnings""#))
        .stdout(predicate::str::contains(r#""start_proximity""#));
}

#[test]
fn test_check_kiln_filter_scopes_existing_rules() {
    // Same date, but stored against a different kiln: filtered out.
    let existing = write_fixture(
        "other-kiln.json",
        r#"[{"kiln_id":"kiln-2","recurrence":"once","start_date":"2024-01-01","load_after":"18:00:00"}]"#,
    );

    kilnflow()
        .args(["check", "--kiln", "kiln-1", "--existing"])
        .arg(&existing)
        .write_stdin(CANDIDATE)
        .assert()
        .success()
        .stdout(predicate::str::contains("no collisions"));
}

#[test]
fn test_check_rejects_invalid_rule_with_exit_code_two() {
    // Bounded weekly rule without an end date.
    let existing = write_fixture("invalid-rule.json", "[]");

    kilnflow()
        .args(["check", "--existing"])
        .arg(&existing)
        .write_stdin(
            r#"{"kiln_id":"kiln-1","recurrence":"weekly_until","start_date":"2024-01-01","weekdays":["Monday"],"load_after":"18:00:00"}"#,
        )
        .assert()
        .code(2)
        .stderr(predicate::str::contains("end date"));
}

#[test]
fn test_check_rejects_malformed_json() {
    let existing = write_fixture("malformed.json", "[");

    kilnflow()
        .args(["check", "--existing"])
        .arg(&existing)
        .write_stdin(CANDIDATE)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("existing rules"));
}

#[test]
fn test_validate_accepts_well_formed_rule() {
    kilnflow()
        .arg("validate")
        .write_stdin(
            r#"{"kiln_id":"kiln-1","recurrence":"weekly_forever","start_date":"2024-01-01","weekdays":["Monday"],"load_after":"08:00:00"}"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn test_validate_reports_pattern_violation() {
    // 2024-01-02 is a Tuesday, not in the selected weekdays.
    kilnflow()
        .arg("validate")
        .write_stdin(
            r#"{"kiln_id":"kiln-1","recurrence":"weekly_forever","start_date":"2024-01-02","weekdays":["Monday"],"load_after":"08:00:00"}"#,
        )
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Tuesday"));
}
