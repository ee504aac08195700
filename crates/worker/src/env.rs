// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What the supervisor tells a worker through its environment

use crate::error::WorkerError;
use herd_core::{WorkerId, CONFIG_ENV, WORKER_ID_ENV, WORKER_LOG_ENV};
use std::path::PathBuf;

/// Launch parameters of one worker process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerEnv {
    /// Bundle to load; the current directory when unset
    pub config_location: PathBuf,
    /// Fleet slot, absent for a foreground worker
    pub id: Option<WorkerId>,
    /// Log file, absent when logging to stderr
    pub log_path: Option<PathBuf>,
}

impl WorkerEnv {
    /// Read the process environment
    pub fn from_env() -> Result<Self, WorkerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WorkerError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let config_location = match get(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => herd_core::config_location(None)?,
        };

        let id = get(WORKER_ID_ENV)
            .map(|value| {
                value
                    .parse()
                    .map(WorkerId)
                    .map_err(|_| WorkerError::InvalidWorkerId {
                        var: WORKER_ID_ENV,
                        value,
                    })
            })
            .transpose()?;

        Ok(Self {
            config_location,
            id,
            log_path: get(WORKER_LOG_ENV).map(PathBuf::from),
        })
    }

    /// Name used in the startup marker and log lines
    pub fn label(&self) -> String {
        match self.id {
            Some(id) => format!("herd-worker {}", id),
            None => "herd-worker".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
