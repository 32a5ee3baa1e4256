//! E2E tests for the one-shot subcommands.
//!
//! Covers `cplan list`, `cplan show`, `cplan order`, and `cplan check-store`
//! in human and JSON modes, plus config-file defaults and failure exits.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE: &str = "CSCI100,Intro to CS\n\
                      CSCI101,Intro to Programming,CSCI100\n\
                      CSCI200,Data Structures,CSCI101,MATH201\n";

fn cplan_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cplan"));
    cmd.current_dir(dir);
    cmd.env("COURSEPLAN_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env_remove("FORMAT");
    cmd
}

fn project_with(catalog: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("courses.csv"), catalog).expect("write catalog");
    dir
}

fn json_stdout(dir: &Path, args: &[&str]) -> Value {
    let output = cplan_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("cplan should not crash");
    assert!(
        output.status.success(),
        "cplan {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn list_human_is_sorted() {
    let dir = project_with(SAMPLE);
    cplan_cmd(dir.path())
        .args(["list", "--file", "courses.csv"])
        .assert()
        .success()
        .stdout(
            "Course List:\n\
             CSCI100, Intro to CS\n\
             CSCI101, Intro to Programming\n\
             CSCI200, Data Structures\n",
        );
}

#[test]
fn list_json_has_codes_and_titles() {
    let dir = project_with(SAMPLE);
    let json = json_stdout(dir.path(), &["list", "--file", "courses.csv"]);
    let courses = json["courses"].as_array().expect("courses array");
    assert_eq!(courses.len(), 3);
    assert_eq!(courses[0]["code"], "CSCI100");
    assert_eq!(courses[2]["title"], "Data Structures");
}

#[test]
fn show_resolves_titles_and_marks_dangling() {
    let dir = project_with(SAMPLE);
    cplan_cmd(dir.path())
        .args(["show", "csci 200", "--file", "courses.csv"])
        .assert()
        .success()
        .stdout(
            "CSCI200, Data Structures\n\
             Prerequisites: CSCI101, Intro to Programming; MATH201 (title unavailable)\n",
        );

    let json = json_stdout(dir.path(), &["show", "CSCI200", "--file", "courses.csv"]);
    assert_eq!(json["prerequisites"][0]["status"], "resolved");
    assert_eq!(json["prerequisites"][1]["status"], "dangling");
    assert_eq!(json["prerequisites"][1]["code"], "MATH201");
}

#[test]
fn show_without_prerequisites_says_none() {
    let dir = project_with(SAMPLE);
    cplan_cmd(dir.path())
        .args(["show", "CSCI100", "-f", "courses.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prerequisites: None"));
}

#[test]
fn show_unknown_course_fails() {
    let dir = project_with(SAMPLE);
    cplan_cmd(dir.path())
        .args(["show", "MATH201", "--file", "courses.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Course MATH201 was not found."));

    let output = cplan_cmd(dir.path())
        .args(["show", "MATH201", "--file", "courses.csv", "--json"])
        .output()
        .expect("cplan should not crash");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("JSON error");
    assert_eq!(json["error"]["error_code"], "course_not_found");
    assert_eq!(json["error"]["code"], "E3001");
}

#[test]
fn order_respects_prerequisites() {
    let dir = project_with(SAMPLE);
    cplan_cmd(dir.path())
        .args(["order", "--file", "courses.csv"])
        .assert()
        .success()
        .stdout(
            "Recommended Course Order:\n\
             1. CSCI100 - Intro to CS\n\
             2. CSCI101 - Intro to Programming\n\
             3. CSCI200 - Data Structures\n",
        );

    let json = json_stdout(dir.path(), &["order", "--file", "courses.csv"]);
    assert_eq!(json["complete"], true);
    assert!(json.get("warning").is_none());
}

#[test]
fn order_with_cycle_warns_but_succeeds() {
    let dir = project_with("A,Alpha,B\nB,Beta,A\nC,Gamma\nD,Delta,A\n");
    cplan_cmd(dir.path())
        .args(["order", "--file", "courses.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. C - Gamma"))
        .stdout(predicate::str::contains("Warning: Circular dependency detected."))
        .stdout(predicate::str::contains("cycle: A, B"))
        .stdout(predicate::str::contains("blocked by a cycle: D"))
        .stdout(predicate::str::contains("hint: Remove one prerequisite link"));

    let json = json_stdout(dir.path(), &["order", "--file", "courses.csv"]);
    assert_eq!(json["complete"], false);
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["cycles"][0][0], "A");
    assert_eq!(json["blocked"][0], "D");
    assert_eq!(json["warning"]["error_code"], "cycle_detected");
    assert_eq!(json["warning"]["code"], "E3002");
}

#[test]
fn missing_catalog_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    cplan_cmd(dir.path())
        .args(["list", "--file", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.csv"));
}

#[test]
fn no_catalog_anywhere_fails_with_hint() {
    let dir = tempfile::tempdir().expect("tempdir");
    cplan_cmd(dir.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no catalog file given"));
}

#[test]
fn empty_catalog_is_reported() {
    let dir = project_with("# only a comment\n");
    cplan_cmd(dir.path())
        .args(["order", "--file", "courses.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No data loaded. Please load the data structure first.",
        ));
}

#[test]
fn skipped_records_warn_on_stderr() {
    let dir = project_with("A,Alpha\nlonely\n");
    cplan_cmd(dir.path())
        .args(["list", "--file", "courses.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A, Alpha"))
        .stderr(predicate::str::contains(
            "Warning: line 2: expected at least 2 fields, found 1; skipping",
        ));
}

#[test]
fn project_config_supplies_catalog_path() {
    let dir = project_with(SAMPLE);
    fs::write(
        dir.path().join("courseplan.toml"),
        "[catalog]\npath = \"courses.csv\"\n",
    )
    .expect("write config");

    cplan_cmd(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CSCI200, Data Structures"));
}

#[test]
fn malformed_project_config_fails() {
    let dir = project_with(SAMPLE);
    fs::write(dir.path().join("courseplan.toml"), "[catalog\n").expect("write config");

    cplan_cmd(dir.path())
        .args(["list", "--file", "courses.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn format_env_selects_json() {
    let dir = project_with(SAMPLE);
    let output = cplan_cmd(dir.path())
        .env("FORMAT", "json")
        .args(["list", "--file", "courses.csv"])
        .output()
        .expect("cplan should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert!(json["courses"].is_array());
}

#[test]
fn check_store_creates_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    cplan_cmd(dir.path())
        .args(["check-store"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Connected to SQLite database successfully!"));
    assert!(dir.path().join("courses.db").exists());

    let json = json_stdout(dir.path(), &["check-store", "--path", "other.db"]);
    assert_eq!(json["existed"], false);
    assert!(json["sqlite_version"].as_str().is_some_and(|v| !v.is_empty()));
}

#[test]
fn check_store_in_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    cplan_cmd(dir.path())
        .args(["check-store", "--path", "missing/dir/courses.db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open store"));
}

#[test]
fn completions_mention_subcommands() {
    let dir = tempfile::tempdir().expect("tempdir");
    cplan_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("check-store"));
}
