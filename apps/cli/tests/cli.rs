//! End-to-end runs of the `watchpost` binary.

#![cfg(unix)]

use std::fs;
use std::process::{Child, Stdio};
use std::thread;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn watchpost() -> Command {
    let mut cmd = Command::cargo_bin("watchpost").unwrap();
    cmd.env_remove("WATCHPOST_LOG")
        .env_remove("WATCHPOST_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Start the binary directly so the test can signal it mid-run.
fn spawn_watchpost(args: &[&str]) -> Child {
    std::process::Command::new(assert_cmd::cargo::cargo_bin("watchpost"))
        .args(args)
        .env_remove("WATCHPOST_LOG")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap()
}

/// Send SIGINT to `child` after `delay`, as Ctrl-C in a terminal would.
fn interrupt_after(child: &Child, delay: Duration) {
    thread::sleep(delay);
    let status = std::process::Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
}

/// Shell snippet that prints how many times it has run in `dir`.
fn counter_script(dir: &TempDir) -> String {
    let file = dir.path().join("count");
    format!(
        "n=$(cat '{0}' 2>/dev/null || echo 0); n=$((n+1)); echo $n > '{0}'; echo $n",
        file.display()
    )
}

#[test]
fn succeeds_on_first_attempt() {
    watchpost()
        .args(["-n", "3", "-i", "10ms", "--", "true"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("matched after 1 attempt in"));
}

#[test]
fn exhausts_when_command_keeps_failing() {
    watchpost()
        .args(["-n", "2", "-i", "10ms", "--", "false"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("exhausted after 2 attempts in"));
}

#[test]
fn zero_attempts_never_runs_the_command() {
    let dir = TempDir::new().unwrap();

    watchpost()
        .args(["-n", "0", "--", "sh", "-c", &counter_script(&dir)])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("exhausted after 0 attempts"));

    assert!(!dir.path().join("count").exists());
}

#[test]
fn stops_as_soon_as_stdout_matches() {
    let dir = TempDir::new().unwrap();

    let output = watchpost()
        .args(["-n", "10", "-i", "5ms", "--until-equals", "3", "--json", "--"])
        .args(["sh", "-c", &counter_script(&dir)])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "matched");
    assert_eq!(report["attempts"], 3);
    assert_eq!(report["exit_code"], 0);
    assert_eq!(report["stdout"], "3");
    assert_eq!(fs::read_to_string(dir.path().join("count")).unwrap().trim(), "3");
}

#[test]
fn json_report_keeps_last_rejected_output() {
    let output = watchpost()
        .args(["-n", "2", "-i", "5ms", "--until-contains", "ready", "--json"])
        .args(["sh", "-c", "echo pending; exit 4"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "exhausted");
    assert_eq!(report["attempts"], 2);
    assert_eq!(report["exit_code"], 4);
    assert_eq!(report["stdout"], "pending");
}

#[test]
fn reads_settings_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("watchpost.toml");
    fs::write(
        &config,
        r#"
until = { stdout_equals = "hello" }

[poll]
max_attempts = 1
poll_interval = "5ms"
"#,
    )
    .unwrap();

    watchpost()
        .arg("--config")
        .arg(&config)
        .args(["--", "echo", "hello"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("matched after 1 attempt"));
}

#[test]
fn env_overrides_config_and_flags_override_env() {
    watchpost()
        .env("WATCHPOST_POLL__MAX_ATTEMPTS", "2")
        .env("WATCHPOST_POLL__POLL_INTERVAL", "5ms")
        .args(["--", "false"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("exhausted after 2 attempts"));

    watchpost()
        .env("WATCHPOST_POLL__MAX_ATTEMPTS", "2")
        .env("WATCHPOST_POLL__POLL_INTERVAL", "5ms")
        .args(["-n", "1", "--", "false"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("exhausted after 1 attempt in"));
}

#[test]
fn rejects_interval_above_limit() {
    watchpost()
        .args(["-i", "2h", "--", "true"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exceeds the maximum"));
}

#[test]
fn missing_config_file_is_an_error() {
    watchpost()
        .args(["--config", "/nonexistent/watchpost.toml", "--", "true"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn unspawnable_command_is_an_error() {
    watchpost()
        .args(["-n", "3", "-i", "5ms", "--", "watchpost-no-such-program"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to run `watchpost-no-such-program`"));
}

#[test]
fn missing_command_is_a_usage_error() {
    watchpost().args(["-n", "3"]).assert().code(2).stdout("");
}

#[test]
fn invalid_log_filter_is_an_error() {
    watchpost()
        .args(["--log-level", "watchpost=notalevel", "--", "true"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid log filter"));
}

#[test]
fn ctrl_c_during_wait_cancels_without_running_the_command() {
    let dir = TempDir::new().unwrap();
    let child = spawn_watchpost(&["-n", "5", "-i", "5s", "--json", "--", "sh", "-c", &counter_script(&dir)]);

    interrupt_after(&child, Duration::from_millis(700));
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(130));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "cancelled");
    assert_eq!(report["attempts"], 0);
    assert_eq!(report["stdout"], serde_json::Value::Null);
    assert!(!dir.path().join("count").exists());
}

#[test]
fn ctrl_c_during_command_discards_its_output() {
    let child = spawn_watchpost(&["-n", "5", "-i", "10ms", "--json", "--", "sh", "-c", "sleep 2; echo done"]);

    interrupt_after(&child, Duration::from_millis(700));
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(130));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "cancelled");
    assert_eq!(report["attempts"], 1);
    assert_eq!(report["stdout"], serde_json::Value::Null);
    assert_eq!(report["exit_code"], serde_json::Value::Null);
}

#[test]
fn piped_stderr_has_no_ansi_escapes() {
    watchpost()
        .env_remove("NO_COLOR")
        .args(["-n", "1", "-i", "5ms", "--", "false"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("poll exhausted without a match"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}
