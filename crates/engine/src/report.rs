// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-slot outcomes of lifecycle operations

use herd_core::WorkerId;
use serde::Serialize;
use std::fmt;

/// What `start` did with one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StartAction {
    Started { pid: u32 },
    AlreadyRunning { pid: u32 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartOutcome {
    pub id: WorkerId,
    #[serde(flatten)]
    pub action: StartAction,
}

impl fmt::Display for StartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            StartAction::Started { pid } => write!(f, "worker {}: started (pid {})", self.id, pid),
            StartAction::AlreadyRunning { pid } => {
                write!(f, "worker {}: already running (pid {})", self.id, pid)
            }
            StartAction::Failed { reason } => {
                write!(f, "worker {}: failed to start: {}", self.id, reason)
            }
        }
    }
}

/// Result of a `start` across all slots, in ascending id order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StartReport {
    pub outcomes: Vec<StartOutcome>,
}

impl StartReport {
    /// Slots whose spawn failed
    pub fn failures(&self) -> Vec<&StartOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.action, StartAction::Failed { .. }))
            .collect()
    }

    /// Number of slots with a live worker after the start
    pub fn running(&self) -> usize {
        self.outcomes.len() - self.failures().len()
    }
}

impl fmt::Display for StartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        Ok(())
    }
}

/// What `stop` did with one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StopAction {
    /// Exited within the grace period
    Stopped,
    /// Needed SIGKILL after the grace period
    Killed,
    /// The record named a process that was already gone
    Stale,
    /// Still running; the record is kept
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopOutcome {
    pub id: WorkerId,
    pub pid: u32,
    #[serde(flatten)]
    pub action: StopAction,
}

impl fmt::Display for StopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (id, pid) = (self.id, self.pid);
        match &self.action {
            StopAction::Stopped => write!(f, "worker {}: stopped (pid {})", id, pid),
            StopAction::Killed => {
                write!(f, "worker {}: killed after grace period (pid {})", id, pid)
            }
            StopAction::Stale => write!(f, "worker {}: removed stale record (pid {})", id, pid),
            StopAction::Failed { reason } => {
                write!(f, "worker {}: failed to stop (pid {}): {}", id, pid, reason)
            }
        }
    }
}

/// Result of a `stop`, in ascending id order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StopReport {
    pub outcomes: Vec<StopOutcome>,
}

impl StopReport {
    /// True when there was nothing to stop
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Slots whose worker survived
    pub fn failures(&self) -> Vec<&StopOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.action, StopAction::Failed { .. }))
            .collect()
    }
}

impl fmt::Display for StopReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.outcomes.is_empty() {
            return writeln!(f, "no workers running");
        }
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestartReport {
    pub stop: StopReport,
    pub start: StartReport,
}

impl fmt::Display for RestartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stop, self.start)
    }
}
