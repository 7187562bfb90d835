//! Focused CLI tests.
//!
//! Covers argument parsing and startup failures; none of these need a
//! running replica.

#![allow(deprecated)] // Command::cargo_bin is deprecated but replacement requires newer assert_cmd

use std::fs;
use std::net::TcpListener;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gavel() -> Command {
    let mut cmd = Command::cargo_bin("gavel").unwrap();
    cmd.env("RUST_LOG", "error");
    cmd
}

/// A project whose single replica points at a port nobody listens on.
fn project_with_dead_cluster() -> TempDir {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("gavel.toml"),
        format!(
            "[cluster]\nbase_port = {port}\nreplicas = 1\n\n[frontend]\nconnect_timeout_ms = 500\n"
        ),
    )
    .unwrap();
    temp
}

// ============================================================================
// Commands That Work Without Replicas
// ============================================================================

#[test]
fn version_command_succeeds() {
    gavel()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gavel"));
}

#[test]
fn version_flag_shows_version() {
    gavel()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gavel"));
}

#[test]
fn help_flag_shows_usage() {
    gavel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replica"))
        .stdout(predicate::str::contains("client"));
}

#[test]
fn config_show_defaults_as_json() {
    let temp = TempDir::new().unwrap();

    gavel()
        .args(["config", "show", "--format", "json", "--project"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"base_port\": 5000"))
        .stdout(predicate::str::contains("\"duration_secs\": 60"));
}

#[test]
fn config_show_reads_project_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("gavel.toml"), "[cluster]\nreplicas = 5\n").unwrap();

    gavel()
        .args(["--no-color", "config", "show", "--project"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:5004"));
}

// ============================================================================
// Argument Errors
// ============================================================================

#[test]
fn replica_requires_id() {
    gavel()
        .arg("replica")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn client_requires_bidder() {
    gavel()
        .arg("client")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bidder"));
}

#[test]
fn unknown_config_format_is_rejected() {
    gavel()
        .args(["config", "show", "--format", "yaml"])
        .assert()
        .failure();
}

// ============================================================================
// Startup Failures
// ============================================================================

#[test]
fn replica_id_outside_cluster_fails() {
    let temp = TempDir::new().unwrap();

    gavel()
        .args(["replica", "--id", "7", "--project"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("replica-7"));
}

#[test]
fn invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("gavel.toml"), "[auction]\nduration_secs = 0\n").unwrap();

    gavel()
        .args(["config", "show", "--project"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duration_secs"));
}

#[test]
fn client_with_empty_bidder_fails() {
    let temp = project_with_dead_cluster();

    gavel()
        .args(["client", "--bidder", "", "--project"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bidder"));
}

#[test]
fn client_fails_when_a_replica_is_unreachable() {
    let temp = project_with_dead_cluster();

    gavel()
        .args(["client", "--bidder", "alice", "--project"])
        .arg(temp.path())
        .write_stdin("result\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect to replicas"));
}
