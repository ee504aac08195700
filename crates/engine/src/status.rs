// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only fleet status

use chrono::{DateTime, Utc};
use herd_core::{ProcessProbe, WorkerId};
use herd_storage::{RecordStore, StoreError};
use serde::Serialize;
use std::fmt;

/// One row of a status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerStatus {
    pub id: WorkerId,
    pub pid: u32,
    pub alive: bool,
    pub started_at: DateTime<Utc>,
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.alive { "alive" } else { "dead" };
        write!(
            f,
            "worker {:<3} pid {:<8} {:<5}  started {}",
            self.id,
            self.pid,
            state,
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Reports every recorded worker with its current liveness
///
/// Never prunes: a stale record shows up as `alive: false` until the next
/// `start` or `stop` corrects it.
pub struct StatusReporter<'a, P> {
    store: &'a RecordStore<P>,
}

impl<'a, P: ProcessProbe> StatusReporter<'a, P> {
    pub fn new(store: &'a RecordStore<P>) -> Self {
        Self { store }
    }

    pub fn report(&self) -> Result<Vec<WorkerStatus>, StoreError> {
        Ok(self
            .store
            .all()?
            .into_iter()
            .map(|record| WorkerStatus {
                alive: self.store.is_alive(&record),
                id: record.id,
                pid: record.pid,
                started_at: record.started_at,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
