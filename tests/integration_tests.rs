//! Integration tests for the apiprobe CLI
//!
//! The external collection runner is simulated with small shell scripts so
//! no network access or real runner installation is needed.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const VALID_COLLECTION: &str = r#"{
    "info": {"name": "weather-api", "schema": "collection/v2.1.0"},
    "item": [{"name": "current weather", "request": {"method": "GET"}}]
}"#;

const VALID_ENVIRONMENT: &str = r#"{
    "name": "staging",
    "values": [{"key": "base_url", "value": "https://api.example.com"}]
}"#;

/// Write an executable shell script standing in for the external runner.
fn fake_runner(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-runner");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A command wired to a temp workspace with valid inputs and the given
/// fake runner script.
fn apiprobe_in(dir: &TempDir, runner_body: &str) -> Command {
    let collection = dir.path().join("collection.json");
    let environment = dir.path().join("environment.json");
    fs::write(&collection, VALID_COLLECTION).unwrap();
    fs::write(&environment, VALID_ENVIRONMENT).unwrap();
    fs::set_permissions(&environment, fs::Permissions::from_mode(0o600)).unwrap();
    fs::set_permissions(&collection, fs::Permissions::from_mode(0o600)).unwrap();
    let runner = fake_runner(dir.path(), runner_body);

    let mut cmd = Command::cargo_bin("apiprobe").unwrap();
    cmd.env("COLLECTION_FILE", &collection)
        .env("ENVIRONMENT_FILE", &environment)
        .env("REPORTS_DIR", dir.path().join("reports"))
        .env("RUNNER_BIN", &runner)
        .env_remove("API_KEY");
    cmd
}

fn reports_with_prefix(dir: &TempDir, prefix: &str) -> Vec<String> {
    let reports = dir.path().join("reports");
    if !reports.is_dir() {
        return Vec::new();
    }
    fs::read_dir(reports)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with(prefix))
        .collect()
}

#[test]
fn no_subcommand_shows_usage_and_succeeds() {
    let mut cmd = Command::cargo_bin("apiprobe").unwrap();
    cmd.assert().success().stdout(predicate::str::contains("Usage"));
}

#[test]
fn unknown_subcommand_is_treated_as_help() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("apiprobe").unwrap();
    cmd.current_dir(dir.path())
        .arg("frobnicate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
    // Display-only: no side effects on the filesystem
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn version_flag_works() {
    let mut cmd = Command::cargo_bin("apiprobe").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("apiprobe"));
}

#[test]
fn basic_run_succeeds_with_passing_runner() {
    let dir = TempDir::new().unwrap();
    apiprobe_in(&dir, "echo all assertions passed; exit 0")
        .arg("basic")
        .assert()
        .success()
        .stdout(predicate::str::contains("all assertions passed"));
}

#[test]
fn basic_run_propagates_runner_exit_code() {
    let dir = TempDir::new().unwrap();
    apiprobe_in(&dir, "exit 3").arg("basic").assert().code(3);
}

#[test]
fn missing_collection_file_fails_preflight() {
    let dir = TempDir::new().unwrap();
    let mut cmd = apiprobe_in(&dir, "exit 0");
    fs::remove_file(dir.path().join("collection.json")).unwrap();

    cmd.arg("basic")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("required file missing"));
}

#[test]
fn missing_api_key_is_only_a_warning() {
    let dir = TempDir::new().unwrap();
    apiprobe_in(&dir, "exit 0")
        .arg("basic")
        .assert()
        .success()
        .stdout(predicate::str::contains("API_KEY"));
}

#[test]
fn validate_rejects_malformed_json_without_invoking_runner() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("runner-invoked");
    let mut cmd = apiprobe_in(&dir, &format!("touch {}; exit 0", marker.display()));
    fs::write(dir.path().join("collection.json"), "{ not json").unwrap();

    cmd.arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed input"));
    assert!(!marker.exists(), "runner must not be invoked for malformed input");
}

#[test]
fn validate_passes_well_formed_pairing() {
    let dir = TempDir::new().unwrap();
    apiprobe_in(&dir, "exit 0")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("pairing is valid"));
}

#[test]
fn validate_surfaces_dry_run_rejection() {
    let dir = TempDir::new().unwrap();
    apiprobe_in(&dir, "exit 2")
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dry-run"));
}

#[test]
fn security_scan_flags_leaked_appid_key() {
    let dir = TempDir::new().unwrap();
    let mut cmd = apiprobe_in(&dir, "exit 0");
    fs::write(
        dir.path().join("environment.json"),
        r#"{"values": [{"key": "appid", "value": "1234567890abcdef1234567890abcdef"}]}"#,
    )
    .unwrap();

    // Advisory: findings are warnings, the command still exits 0
    cmd.arg("security")
        .assert()
        .success()
        .stdout(predicate::str::contains("appid-hex-key"));
}

#[test]
fn security_scan_passes_clean_files() {
    let dir = TempDir::new().unwrap();
    apiprobe_in(&dir, "exit 0")
        .arg("security")
        .assert()
        .success()
        .stdout(predicate::str::contains("No secrets detected"));
}

#[test]
fn full_pipeline_with_failing_run_still_writes_summary_and_prunes() {
    let dir = TempDir::new().unwrap();
    // Dry-run passes so the pipeline reaches the run phase; every real run
    // fails with exit code 4.
    let script = r#"case "$*" in *--dry-run*) exit 0;; esac
exit 4"#;

    // Seed the reports dir past html retention so pruning is observable.
    let reports = dir.path().join("reports");
    fs::create_dir_all(&reports).unwrap();
    for i in 0..12 {
        fs::write(
            reports.join(format!("api-test-report_202401{:02}_120000.html", i + 1)),
            "old",
        )
        .unwrap();
    }

    apiprobe_in(&dir, script).arg("full").assert().code(4);

    let summaries = reports_with_prefix(&dir, "test_summary_");
    assert_eq!(summaries.len(), 1, "summary must be written despite run failure");
    let body = fs::read_to_string(reports.join(&summaries[0])).unwrap();
    assert!(body.contains("FAILED"));

    let html = reports_with_prefix(&dir, "api-test-report_");
    assert_eq!(html.len(), 10, "pruning must run despite run failure");
}

#[test]
fn full_pipeline_succeeds_end_to_end() {
    let dir = TempDir::new().unwrap();
    apiprobe_in(&dir, "exit 0")
        .arg("full")
        .assert()
        .success()
        .stdout(predicate::str::contains("all runs passed"));

    let summaries = reports_with_prefix(&dir, "test_summary_");
    assert_eq!(summaries.len(), 1);
    assert!(fs::read_to_string(dir.path().join("reports").join(&summaries[0]))
        .unwrap()
        .contains("PASSED"));
}

#[test]
fn full_pipeline_aborts_before_runs_when_validation_fails() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("runner-invoked");
    let mut cmd = apiprobe_in(&dir, &format!("touch {}; exit 0", marker.display()));
    fs::write(dir.path().join("collection.json"), r#"{"info": {}}"#).unwrap();

    cmd.arg("full")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("item"));
    assert!(!marker.exists(), "no run step may execute after validation failure");
    assert!(reports_with_prefix(&dir, "test_summary_").is_empty());
}

#[test]
fn clean_applies_retention_policy() {
    let dir = TempDir::new().unwrap();
    let reports = dir.path().join("reports");
    fs::create_dir_all(&reports).unwrap();
    for i in 0..7 {
        fs::write(reports.join(format!("test_summary_202401{:02}_090000.md", i + 1)), "s")
            .unwrap();
    }

    apiprobe_in(&dir, "exit 0").arg("clean").assert().success();
    assert_eq!(reports_with_prefix(&dir, "test_summary_").len(), 5);
}

#[test]
fn clean_all_removes_every_artifact() {
    let dir = TempDir::new().unwrap();
    let reports = dir.path().join("reports");
    fs::create_dir_all(&reports).unwrap();
    fs::write(reports.join("api-test-report_20240101_120000.html"), "h").unwrap();
    fs::write(reports.join("performance_report_20240101_120000.json"), "p").unwrap();
    fs::write(reports.join("test_summary_20240101_120000.md"), "s").unwrap();

    apiprobe_in(&dir, "exit 0").args(["clean", "--all"]).assert().success();
    assert!(reports_with_prefix(&dir, "api-test-report_").is_empty());
    assert!(reports_with_prefix(&dir, "performance_report_").is_empty());
    assert!(reports_with_prefix(&dir, "test_summary_").is_empty());
}
