// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// An isolated configuration bundle with its own state directory.
///
/// Any worker still recorded when the fleet is dropped is killed.
pub struct TestFleet {
    temp: TempDir,
}

impl TestFleet {
    pub fn new() -> Self {
        Self::with_settings("")
    }

    /// A bundle whose herd.toml holds `extra` after the test defaults
    pub fn with_settings(extra: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let bundle = temp.path().join("bundle");
        fs::create_dir_all(&bundle).expect("Failed to create bundle");
        fs::write(
            bundle.join("herd.toml"),
            format!(
                "num_workers = 2\nstate_dir = \"../state\"\ngrace_period = \"3s\"\n{}",
                extra
            ),
        )
        .expect("Failed to write herd.toml");
        Self { temp }
    }

    pub fn bundle(&self) -> PathBuf {
        self.temp.path().join("bundle")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.temp.path().join("state")
    }

    /// `herd --config <bundle>` with the freshly built worker binary
    pub fn herd(&self) -> Command {
        let mut cmd = herd();
        cmd.arg("--config").arg(self.bundle());
        cmd
    }

    /// `herd status --format json`, as (id, pid, alive) rows
    pub fn status(&self) -> Vec<(u64, u32, bool)> {
        let output = self
            .herd()
            .args(["status", "--format", "json"])
            .output()
            .expect("Failed to run herd status");
        assert!(output.status.success(), "status failed: {:?}", output);
        let rows: Vec<Value> =
            serde_json::from_slice(&output.stdout).expect("status is not JSON");
        rows.iter()
            .map(|row| {
                (
                    row["id"].as_u64().unwrap(),
                    row["pid"].as_u64().unwrap() as u32,
                    row["alive"].as_bool().unwrap(),
                )
            })
            .collect()
    }

    /// Pids named by the record files on disk
    pub fn recorded_pids(&self) -> Vec<u32> {
        let Ok(entries) = fs::read_dir(self.state_dir().join("workers")) else {
            return Vec::new();
        };
        entries
            .flatten()
            .filter(|e| e.path().extension().is_some_and(|x| x == "json"))
            .filter_map(|e| fs::read_to_string(e.path()).ok())
            .filter_map(|s| serde_json::from_str::<Value>(&s).ok())
            .filter_map(|v| v["pid"].as_u64())
            .map(|pid| pid as u32)
            .collect()
    }

    pub fn log(&self, id: u32) -> String {
        fs::read_to_string(self.state_dir().join(format!("logs/worker-{}.log", id)))
            .unwrap_or_default()
    }
}

impl Drop for TestFleet {
    fn drop(&mut self) {
        for pid in self.recorded_pids() {
            let _ = kill(Pid::from_raw(pid as i32), Signal::SIGKILL);
        }
    }
}

/// `herd` with the test worker binary and a clean environment
pub fn herd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("herd").expect("herd binary");
    cmd.env("HERD_WORKER_BINARY", env!("CARGO_BIN_EXE_herd-worker"))
        .env("HERD_POLL_INTERVAL_MS", "20")
        .env_remove("HERD_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Whether `pid` is gone (or a zombie awaiting its reaper)
pub fn process_gone(pid: u32) -> bool {
    let stat = format!("/proc/{}/stat", pid);
    match fs::read_to_string(Path::new(&stat)) {
        Ok(stat) => stat
            .rsplit_once(')')
            .is_some_and(|(_, rest)| rest.trim_start().starts_with('Z')),
        Err(_) => kill(Pid::from_raw(pid as i32), None).is_err(),
    }
}

/// Poll `check` until it holds or `timeout` passes
pub fn wait_for(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    check()
}
