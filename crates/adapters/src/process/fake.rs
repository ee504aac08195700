// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ProcessAdapter, ProcessError, SpawnRequest, StopSignal};
use async_trait::async_trait;
use herd_core::ProcessProbe;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

/// Recorded process call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessCall {
    Spawn { name: String },
    RunForeground { name: String },
    Signal { pid: u32, signal: StopSignal },
}

/// Fake process state
#[derive(Debug, Clone)]
pub struct FakeProcess {
    pub request: SpawnRequest,
    pub alive: bool,
    /// Survives SIGTERM (forces escalation)
    pub ignores_terminate: bool,
    /// Survives SIGKILL too
    pub unkillable: bool,
    /// Pid now held by another user's process
    pub foreign: bool,
}

#[derive(Default)]
struct FakeState {
    processes: BTreeMap<u32, FakeProcess>,
    calls: Vec<ProcessCall>,
    next_pid: u32,
    failing: HashSet<String>,
    foreground_exit: Option<i32>,
}

/// Fake process adapter for testing
///
/// Pids are handed out sequentially from 1000. Processes live until
/// signalled or marked exited.
#[derive(Clone, Default)]
pub struct FakeProcessAdapter {
    state: Arc<Mutex<FakeState>>,
}

impl FakeProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ProcessCall> {
        self.with_state(|s| s.calls.clone())
    }

    /// Get a process by pid
    pub fn process(&self, pid: u32) -> Option<FakeProcess> {
        self.with_state(|s| s.processes.get(&pid).cloned())
    }

    /// Pids of processes still running, ascending
    pub fn alive_pids(&self) -> Vec<u32> {
        self.with_state(|s| {
            s.processes
                .iter()
                .filter(|(_, p)| p.alive)
                .map(|(pid, _)| *pid)
                .collect()
        })
    }

    /// Make spawns of the named process fail
    pub fn fail_spawn(&self, name: &str) {
        self.with_state(|s| s.failing.insert(name.to_string()));
    }

    /// Let spawns of the named process succeed again
    pub fn clear_spawn_failure(&self, name: &str) {
        self.with_state(|s| s.failing.remove(name));
    }

    /// Simulate the process dying out-of-band
    pub fn set_exited(&self, pid: u32) {
        self.with_state(|s| {
            if let Some(p) = s.processes.get_mut(&pid) {
                p.alive = false;
            }
        });
    }

    /// Make the process ignore SIGTERM
    pub fn set_ignores_terminate(&self, pid: u32) {
        self.with_state(|s| {
            if let Some(p) = s.processes.get_mut(&pid) {
                p.ignores_terminate = true;
            }
        });
    }

    /// Make the process survive every signal
    pub fn set_unkillable(&self, pid: u32) {
        self.with_state(|s| {
            if let Some(p) = s.processes.get_mut(&pid) {
                p.ignores_terminate = true;
                p.unkillable = true;
            }
        });
    }

    /// Simulate the pid being reused by a process owned by another user
    ///
    /// The probe reports it dead and signals fail with a permission error.
    pub fn set_foreign(&self, pid: u32) {
        self.with_state(|s| {
            if let Some(p) = s.processes.get_mut(&pid) {
                p.foreign = true;
            }
        });
    }

    /// Exit code returned by foreground runs (default 0)
    pub fn set_foreground_exit(&self, code: i32) {
        self.with_state(|s| s.foreground_exit = Some(code));
    }
}

impl ProcessProbe for FakeProcessAdapter {
    fn is_alive(&self, pid: u32) -> bool {
        self.with_state(|s| {
            s.processes
                .get(&pid)
                .is_some_and(|p| p.alive && !p.foreign)
        })
    }
}

#[async_trait]
impl ProcessAdapter for FakeProcessAdapter {
    async fn spawn_detached(&self, request: &SpawnRequest) -> Result<u32, ProcessError> {
        self.with_state(|s| {
            s.calls.push(ProcessCall::Spawn {
                name: request.name.clone(),
            });

            if s.failing.contains(&request.name) {
                return Err(ProcessError::SpawnFailed {
                    program: request.program.clone(),
                    reason: "injected failure".to_string(),
                });
            }

            s.next_pid += 1;
            let pid = 999 + s.next_pid;
            s.processes.insert(
                pid,
                FakeProcess {
                    request: request.clone(),
                    alive: true,
                    ignores_terminate: false,
                    unkillable: false,
                    foreign: false,
                },
            );
            Ok(pid)
        })
    }

    async fn run_foreground(&self, request: &SpawnRequest) -> Result<Option<i32>, ProcessError> {
        self.with_state(|s| {
            s.calls.push(ProcessCall::RunForeground {
                name: request.name.clone(),
            });
            if s.failing.contains(&request.name) {
                return Err(ProcessError::SpawnFailed {
                    program: request.program.clone(),
                    reason: "injected failure".to_string(),
                });
            }
            Ok(Some(s.foreground_exit.unwrap_or(0)))
        })
    }

    async fn signal(&self, pid: u32, signal: StopSignal) -> Result<(), ProcessError> {
        self.with_state(|s| {
            s.calls.push(ProcessCall::Signal { pid, signal });

            let Some(process) = s.processes.get_mut(&pid).filter(|p| p.alive) else {
                return Err(ProcessError::NoSuchProcess(pid));
            };
            if process.foreign {
                return Err(ProcessError::SignalFailed {
                    pid,
                    reason: "EPERM: Operation not permitted".to_string(),
                });
            }

            let survives = match signal {
                StopSignal::Terminate => process.ignores_terminate,
                StopSignal::Kill => process.unkillable,
            };
            if !survives {
                process.alive = false;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
