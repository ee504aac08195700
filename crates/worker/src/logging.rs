// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker log setup

use crate::env::WorkerEnv;
use crate::error::WorkerError;
use std::io::Write;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

/// Startup marker prefix written to the log before anything else.
/// Full format: "--- herd-worker 3: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- ";

/// The marker line for this worker and process
pub fn startup_marker(env: &WorkerEnv, pid: u32) -> String {
    format!("{}{}: starting (pid: {}) ---", STARTUP_MARKER_PREFIX, env.label(), pid)
}

fn append_line(path: &Path, line: &str) -> Result<(), WorkerError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// Append the startup marker to the worker's log file, if it has one
pub fn write_startup_marker(env: &WorkerEnv) -> Result<(), WorkerError> {
    match &env.log_path {
        Some(path) => append_line(path, &startup_marker(env, std::process::id())),
        None => Ok(()),
    }
}

/// Write a fatal startup error synchronously; tracing may not flush in time
pub fn write_startup_error(env: &WorkerEnv, error: &WorkerError) {
    let line = format!("ERROR {}: failed to start: {}", env.label(), error);
    match &env.log_path {
        Some(path) => {
            let _ = append_line(path, &line);
        }
        None => {
            let _ = writeln!(std::io::stderr(), "{}", line);
        }
    }
}

/// Install the global subscriber
///
/// Detached workers log to their file through a non-blocking appender; the
/// returned guard must be held until exit so buffered lines are flushed.
pub fn setup_logging(env: &WorkerEnv) -> Result<Option<WorkerGuard>, WorkerError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_path) = &env.log_path else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    let dir = log_path
        .parent()
        .ok_or_else(|| WorkerError::InvalidLogPath(log_path.clone()))?;
    let file_name = log_path
        .file_name()
        .ok_or_else(|| WorkerError::InvalidLogPath(log_path.clone()))?;
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(Some(guard))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
