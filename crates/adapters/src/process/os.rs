// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real OS process adapter

use super::{ProcessAdapter, ProcessError, SpawnRequest, StopSignal};
use async_trait::async_trait;
use herd_core::ProcessProbe;
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::Pid;
use std::fs::{File, OpenOptions};
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, Stdio};

/// Spawns workers as real processes and signals them with `kill(2)`
#[derive(Clone, Default)]
pub struct OsProcessAdapter;

impl OsProcessAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn to_pid(pid: u32) -> Option<Pid> {
    i32::try_from(pid)
        .ok()
        .filter(|&p| p > 0)
        .map(Pid::from_raw)
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Whether /proc reports the process as a zombie (exited, not yet reaped)
///
/// A zombie still answers `kill(pid, 0)`, which would keep a dead worker's
/// record looking alive when the reaper is slow.
fn is_zombie(pid: i32) -> bool {
    let Ok(stat) = std::fs::read_to_string(format!("/proc/{}/stat", pid)) else {
        return false;
    };
    // Format: "pid (comm) S ..."; comm may itself contain ')'
    stat.rsplit_once(')')
        .map(|(_, rest)| rest.trim_start().starts_with('Z'))
        .unwrap_or(false)
}

impl ProcessProbe for OsProcessAdapter {
    fn is_alive(&self, pid: u32) -> bool {
        let Some(pid) = to_pid(pid) else {
            return false;
        };

        // Reap the process if it is an exited child of ours; ECHILD otherwise
        let _ = waitpid(pid, Some(WaitPidFlag::WNOHANG));

        match kill(pid, None) {
            Ok(()) => !is_zombie(pid.as_raw()),
            // Workers run as the invoking user; a pid we may not signal was
            // reused by someone else's process
            Err(_) => false,
        }
    }
}

#[async_trait]
impl ProcessAdapter for OsProcessAdapter {
    async fn spawn_detached(&self, request: &SpawnRequest) -> Result<u32, ProcessError> {
        let spawn_failed = |reason: String| ProcessError::SpawnFailed {
            program: request.program.clone(),
            reason,
        };

        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args)
            .current_dir(&request.cwd)
            .envs(request.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            // Own process group: a Ctrl-C aimed at the terminal must not reach workers
            .process_group(0);

        match &request.log_path {
            Some(path) => {
                let stdout = open_log(path).map_err(|e| {
                    spawn_failed(format!("cannot open log {}: {}", path.display(), e))
                })?;
                let stderr = stdout
                    .try_clone()
                    .map_err(|e| spawn_failed(e.to_string()))?;
                cmd.stdout(stdout).stderr(stderr);
            }
            None => {
                cmd.stdout(Stdio::null()).stderr(Stdio::null());
            }
        }

        // The Child handle is dropped without waiting: the worker outlives us
        let child = cmd.spawn().map_err(|e| spawn_failed(e.to_string()))?;
        Ok(child.id())
    }

    async fn run_foreground(&self, request: &SpawnRequest) -> Result<Option<i32>, ProcessError> {
        let status = tokio::process::Command::new(&request.program)
            .args(&request.args)
            .current_dir(&request.cwd)
            .envs(request.env.iter().map(|(k, v)| (k, v)))
            .status()
            .await
            .map_err(|e| ProcessError::SpawnFailed {
                program: request.program.clone(),
                reason: e.to_string(),
            })?;
        Ok(status.code())
    }

    async fn signal(&self, pid: u32, signal: StopSignal) -> Result<(), ProcessError> {
        let target = to_pid(pid).ok_or(ProcessError::NoSuchProcess(pid))?;
        let sig = match signal {
            StopSignal::Terminate => Signal::SIGTERM,
            StopSignal::Kill => Signal::SIGKILL,
        };
        kill(target, sig).map_err(|e| match e {
            Errno::ESRCH => ProcessError::NoSuchProcess(pid),
            e => ProcessError::SignalFailed {
                pid,
                reason: e.to_string(),
            },
        })
    }
}

#[cfg(test)]
#[path = "os_tests.rs"]
mod tests;
