//! Integration tests for the issuedash one-shot subcommands

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Isolated config file so the user's own configuration never leaks in
struct TestEnv {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        Self::with_config("")
    }

    fn with_config(contents: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, contents).unwrap();
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    fn issuedash(&self) -> AssertCommand {
        let mut cmd = AssertCommand::cargo_bin("issuedash").unwrap();
        cmd.env_remove("RUST_LOG");
        cmd.args(["--config", self.config_path.to_str().unwrap()]);
        cmd
    }
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

// =============================================================================
// summary
// =============================================================================

#[test]
fn summary_prints_seed_values() {
    let env = TestEnv::new();
    env.issuedash()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total issues (MTD):      10"))
        .stdout(predicate::str::contains("Resolution rate:         100%"))
        .stdout(predicate::str::contains("Avg response time (MTD): 2.10"));
}

#[test]
fn summary_json() {
    let env = TestEnv::new();
    let output = env.issuedash().args(["summary", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output.stdout);
    assert_eq!(json["total_issues"], 10.0);
    assert_eq!(json["resolution_rate"], "100%");
    assert_eq!(json["average_response_mtd"], "2.10");
}

// =============================================================================
// dump
// =============================================================================

#[test]
fn dump_all_datasets() {
    let env = TestEnv::new();
    let output = env.issuedash().arg("dump").output().unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output.stdout);
    assert_eq!(json["channel"].as_array().unwrap().len(), 4);
    assert_eq!(json["category"].as_array().unwrap().len(), 3);
    assert_eq!(json["bugs"].as_array().unwrap().len(), 3);
    assert_eq!(json["time"].as_array().unwrap().len(), 2);
    assert!(json.get("revision").is_none());
}

#[test]
fn dump_single_dataset() {
    let env = TestEnv::new();
    let output = env
        .issuedash()
        .args(["dump", "--dataset", "category"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output.stdout);
    assert_eq!(json[0]["name"], "Client Data Issue");
    assert_eq!(json[0]["value"], 6.0);
    assert_eq!(json[0]["fill"], "#8884d8");
}

#[test]
fn dump_unknown_dataset_fails() {
    let env = TestEnv::new();
    env.issuedash()
        .args(["dump", "--dataset", "tickets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown dataset `tickets`"));
}

// =============================================================================
// set
// =============================================================================

#[test]
fn set_channel_mtd_updates_total() {
    let env = TestEnv::new();
    env.issuedash()
        .args(["set", "channel", "1", "mtd", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total issues (MTD):      15"));
}

#[test]
fn set_mtd_response_changes_average() {
    let env = TestEnv::new();
    let output = env
        .issuedash()
        .args(["set", "time", "1", "response", "3.456", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output.stdout)["average_response_mtd"], "3.46");
}

#[test]
fn set_out_of_range_index_fails() {
    let env = TestEnv::new();
    env.issuedash()
        .args(["set", "bugs", "9", "value", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index 9 is out of range"));
}

#[test]
fn set_immutable_field_fails() {
    let env = TestEnv::new();
    env.issuedash()
        .args(["set", "category", "0", "fill", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not editable"));
}

#[test]
fn set_non_numeric_value_fails() {
    let env = TestEnv::new();
    env.issuedash()
        .args(["set", "channel", "0", "weekly", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("`lots` is not a number"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn missing_explicit_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    AssertCommand::cargo_bin("issuedash")
        .unwrap()
        .args(["--config", missing.to_str().unwrap(), "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn key_collision_is_rejected() {
    let env = TestEnv::with_config("[keys.navigation]\nedit = \"q\"\n");
    env.issuedash()
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("key binding collision"));
}

#[test]
fn unknown_config_keys_warn_on_stderr() {
    let env = TestEnv::with_config("bogus = 1\n");
    env.issuedash()
        .arg("summary")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown configuration key `bogus`"));
}
