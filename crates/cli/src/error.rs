// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use herd_core::{WorkerId, SETTINGS_FILE};
use herd_engine::StartOutcome;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct HerdError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HerdError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for HerdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HerdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl HerdError {
    /// No configuration bundle at the resolved location.
    pub fn config_not_found(location: &Path, missing: &[String]) -> Self {
        let mut err = HerdError::new(format!(
            "no configuration found at {}",
            location.display()
        ));
        for file in missing {
            err = err.with_context(format!("missing {}", file));
        }
        err.with_suggestion(format!(
            "Create {} in the bundle directory",
            SETTINGS_FILE
        ))
        .with_suggestion("Point at an existing bundle: herd --config <dir> <command>")
        .with_suggestion("Or set HERD_CONFIG=<dir>")
    }

    /// Some slots could not be started.
    pub fn spawn_failed(failures: &[&StartOutcome], worker_program: &Path) -> Self {
        let mut err = HerdError::new(format!(
            "{} worker(s) failed to start",
            failures.len()
        ));
        for failure in failures {
            err = err.with_context(failure.to_string());
        }
        err.with_context(format!("worker binary: {}", worker_program.display()))
            .with_suggestion("Check the worker binary exists and is executable")
            .with_suggestion("Override it with HERD_WORKER_BINARY=<path>")
            .with_suggestion("Inspect a worker log: herd logs <id>")
    }

    /// Workers still running after a stop.
    pub fn stop_incomplete(ids: &[WorkerId]) -> Self {
        let ids = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        HerdError::new(format!("workers still running after stop: {}", ids))
            .with_context("They survived SIGKILL and kept their records")
            .with_suggestion("Check for processes stuck in uninterruptible sleep")
            .with_suggestion("Run `herd stop` again once they exit")
    }

    /// A foreground worker exited unsuccessfully.
    pub fn worker_exited(code: Option<i32>) -> Self {
        match code {
            Some(code) => HerdError::new(format!("worker exited with status {}", code)),
            None => HerdError::new("worker was terminated by a signal"),
        }
    }

    /// No log file has been written for a slot.
    pub fn no_log(id: WorkerId, path: &Path) -> Self {
        HerdError::new(format!("no log for worker {}", id))
            .with_context(format!("expected {}", path.display()))
            .with_suggestion("Check which workers exist: herd status")
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
