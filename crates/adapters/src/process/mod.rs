// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker process adapters

mod os;

pub use os::OsProcessAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProcess, FakeProcessAdapter, ProcessCall};

use async_trait::async_trait;
use herd_core::ProcessProbe;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from process operations
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn {}: {reason}", program.display())]
    SpawnFailed { program: PathBuf, reason: String },
    #[error("no such process: {0}")]
    NoSuchProcess(u32),
    #[error("failed to signal pid {pid}: {reason}")]
    SignalFailed { pid: u32, reason: String },
}

/// Everything needed to launch one worker process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    /// Human-readable name for logs, e.g. `worker-0`
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
    /// Detached processes append stdout/stderr here; `None` discards them
    pub log_path: Option<PathBuf>,
}

impl SpawnRequest {
    /// Value of an environment variable passed to the process
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Signals used to stop a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    /// SIGTERM: ask the worker to finish and exit
    Terminate,
    /// SIGKILL: forced termination after the grace period
    Kill,
}

impl fmt::Display for StopSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopSignal::Terminate => write!(f, "SIGTERM"),
            StopSignal::Kill => write!(f, "SIGKILL"),
        }
    }
}

/// Adapter for launching, signalling and probing worker processes
#[async_trait]
pub trait ProcessAdapter: ProcessProbe + Clone + Send + Sync + 'static {
    /// Launch a process detached from the caller; returns its pid once created
    async fn spawn_detached(&self, request: &SpawnRequest) -> Result<u32, ProcessError>;

    /// Run a process in the foreground with inherited stdio and wait for it
    ///
    /// Returns the exit code, or `None` when the process died from a signal.
    async fn run_foreground(&self, request: &SpawnRequest) -> Result<Option<i32>, ProcessError>;

    /// Deliver a stop signal
    async fn signal(&self, pid: u32, signal: StopSignal) -> Result<(), ProcessError>;
}
