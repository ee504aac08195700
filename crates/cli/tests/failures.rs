// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for configuration and process failures

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::{herd, TestFleet};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn missing_bundle_exits_nonzero() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("nowhere");

    herd()
        .arg("--config")
        .arg(&missing)
        .arg("start")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no configuration found"))
        .stderr(predicate::str::contains("missing herd.toml"));
}

#[test]
fn bundle_without_settings_file_exits_nonzero() {
    let temp = tempdir().unwrap();

    herd()
        .current_dir(temp.path())
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing herd.toml"));
}

#[test]
fn config_env_var_locates_bundle() {
    let fleet = TestFleet::new();

    herd()
        .env("HERD_CONFIG", fleet.bundle())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("workers:        2"));
}

#[test]
fn invalid_settings_exit_nonzero() {
    let fleet = TestFleet::with_settings("bogus_key = 1\n");

    fleet
        .herd()
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn config_json_reports_resolved_values() {
    let fleet = TestFleet::with_settings("port = 9999\n");

    let output = fleet
        .herd()
        .args(["config", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["worker_count"], 2);
    assert_eq!(json["grace_period"], "3s");
    assert_eq!(json["central_server_url"], "http://localhost:9999");
}

#[test]
fn spawn_failure_attempts_every_slot() {
    let fleet = TestFleet::new();

    fleet
        .herd()
        .env("HERD_WORKER_BINARY", "/nonexistent/herd-worker")
        .args(["start", "3"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("worker 0: failed to start"))
        .stdout(predicate::str::contains("worker 2: failed to start"))
        .stderr(predicate::str::contains("3 worker(s) failed to start"));

    assert!(fleet.recorded_pids().is_empty());
}

#[test]
fn run_reports_worker_exit_status() {
    let fleet = TestFleet::new();

    fleet
        .herd()
        .env("HERD_WORKER_BINARY", "false")
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("worker exited with status 1"));

    fleet
        .herd()
        .env("HERD_WORKER_BINARY", "true")
        .arg("run")
        .assert()
        .success();
    assert!(fleet.recorded_pids().is_empty());
}

#[test]
fn logs_for_unknown_worker() {
    let fleet = TestFleet::new();

    fleet
        .herd()
        .args(["logs", "7"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no log for worker 7"));
}

#[test]
fn completions_generate() {
    herd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("herd"));
}
