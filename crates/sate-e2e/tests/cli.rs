//! Command-line behaviour that needs no browser.

use assert_cmd::Command;
use predicates::prelude::*;
use sate_e2e::scenarios::SLUGS;
use std::fs;
use tempfile::TempDir;

/// `sate-e2e` run from an empty directory with no `SATE_*` variables.
fn sate(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sate-e2e").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SATE_TARGET")
        .env_remove("SATE_EXIT_POLICY")
        .env_remove("SATE_ONLY")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_the_main_options() {
    let dir = TempDir::new().unwrap();
    sate(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--target"))
        .stdout(predicate::str::contains("--exit-policy"))
        .stdout(predicate::str::contains("--only"));
}

#[test]
fn list_prints_every_scenario_in_order() {
    let dir = TempDir::new().unwrap();
    let assert = sate(&dir).arg("--list").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let listed: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(listed, SLUGS);
}

#[test]
fn missing_target_fails_with_hint() {
    let dir = TempDir::new().unwrap();
    sate(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required field: target"))
        .stderr(predicate::str::contains("SATE_TARGET"));
}

#[test]
fn nonexistent_target_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    sate(&dir)
        .args(["--target", "no-such-exam/index.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn unknown_scenario_is_rejected() {
    let dir = TempDir::new().unwrap();
    sate(&dir)
        .args(["--target", "about:blank", "--only", "logout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logout"))
        .stderr(predicate::str::contains("Known scenarios"));
}

#[test]
fn single_slug_from_env_is_read_as_a_filter() {
    let dir = TempDir::new().unwrap();
    sate(&dir)
        .env("SATE_ONLY", "logout")
        .args(["--target", "about:blank"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logout"))
        .stderr(predicate::str::contains("Known scenarios"))
        .stderr(predicate::str::contains("invalid type").not());
}

#[test]
fn short_wait_timeout_is_not_rejected_for_poll_interval() {
    let dir = TempDir::new().unwrap();
    sate(&dir)
        .args(["--target", "about:blank", "--wait-timeout-ms", "50", "--only", "logout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logout"))
        .stderr(predicate::str::contains("poll_interval").not());
}

#[test]
fn bad_exit_policy_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    sate(&dir)
        .args(["--exit-policy", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fail-on-error"));
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("sate.config.json"),
        r#"{ "target": "about:blank", "wait_timeout_ms": 0 }"#,
    )
    .unwrap();

    // Validation runs on the merged file, so the bad timeout is reported.
    sate(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("wait_timeout_ms"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    sate(&dir)
        .args(["--config", "elsewhere.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
