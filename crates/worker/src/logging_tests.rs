// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use herd_core::WorkerId;
use std::path::PathBuf;
use tempfile::tempdir;

fn env(id: Option<u32>, log_path: Option<PathBuf>) -> WorkerEnv {
    WorkerEnv {
        config_location: PathBuf::from("/srv/bundle"),
        id: id.map(WorkerId),
        log_path,
    }
}

#[test]
fn marker_names_slot_and_pid() {
    assert_eq!(
        startup_marker(&env(Some(3), None), 12345),
        "--- herd-worker 3: starting (pid: 12345) ---"
    );
    assert_eq!(
        startup_marker(&env(None, None), 7),
        "--- herd-worker: starting (pid: 7) ---"
    );
}

#[test]
fn marker_appends_to_existing_log() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("logs/worker-0.log");
    std::fs::create_dir_all(log.parent().unwrap()).unwrap();
    std::fs::write(&log, "previous run\n").unwrap();
    let env = env(Some(0), Some(log.clone()));

    write_startup_marker(&env).unwrap();

    let content = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "previous run");
    assert_eq!(
        lines[1],
        format!("--- herd-worker 0: starting (pid: {}) ---", std::process::id())
    );
}

#[test]
fn marker_without_log_is_noop() {
    write_startup_marker(&env(None, None)).unwrap();
}

#[test]
fn startup_error_goes_to_log() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("nested/worker-1.log");
    let env = env(Some(1), Some(log.clone()));

    write_startup_error(&env, &WorkerError::InvalidLogPath(PathBuf::from("/")));

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(
        content.starts_with("ERROR herd-worker 1: failed to start"),
        "{}",
        content
    );
}
