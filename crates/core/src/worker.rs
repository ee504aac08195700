// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker slots and their durable records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Environment variable carrying a detached worker's slot
pub const WORKER_ID_ENV: &str = "HERD_WORKER_ID";

/// Environment variable naming a detached worker's log file
pub const WORKER_LOG_ENV: &str = "HERD_WORKER_LOG";

/// Ordinal slot of a worker within the fleet (0..N-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub u32);

impl WorkerId {
    /// Slots `0..count`, ascending
    pub fn range(count: u32) -> impl Iterator<Item = WorkerId> {
        (0..count).map(WorkerId)
    }

    /// File stem used for this slot's record, lock and log files
    pub fn file_stem(&self) -> String {
        format!("worker-{}", self.0)
    }

    /// Parse a slot from a `worker-<id>` file stem
    pub fn from_file_stem(stem: &str) -> Option<WorkerId> {
        stem.strip_prefix("worker-")?.parse().ok().map(WorkerId)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable record of one running worker process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: WorkerId,
    pub pid: u32,
    pub started_at: DateTime<Utc>,
    /// Configuration bundle the worker was launched against
    pub config_location: PathBuf,
    /// Where this record lives on disk (derived from the store, not persisted)
    #[serde(skip)]
    pub record_path: PathBuf,
}

/// Probes the operating system for a running process
///
/// A record whose pid fails the probe is stale.
pub trait ProcessProbe {
    fn is_alive(&self, pid: u32) -> bool;
}

impl<P: ProcessProbe + ?Sized> ProcessProbe for &P {
    fn is_alive(&self, pid: u32) -> bool {
        (**self).is_alive(pid)
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
