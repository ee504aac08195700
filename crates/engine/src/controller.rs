// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fleet lifecycle: start, stop, restart, run

use crate::error::EngineError;
use crate::report::{
    RestartReport, StartAction, StartOutcome, StartReport, StopAction, StopOutcome, StopReport,
};
use crate::status::{StatusReporter, WorkerStatus};
use herd_adapters::{ProcessAdapter, ProcessError, SpawnRequest, StopSignal};
use herd_core::{Clock, FleetConfig, WorkerId, CONFIG_ENV, WORKER_ID_ENV, WORKER_LOG_ENV};
use herd_storage::{RecordStore, SlotLock, StoreError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

/// Environment variable overriding the stop poll interval, in milliseconds
pub const POLL_INTERVAL_ENV: &str = "HERD_POLL_INTERVAL_MS";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const DEFAULT_KILL_WAIT: Duration = Duration::from_secs(2);

/// Poll interval for stop, from `HERD_POLL_INTERVAL_MS` or 50ms
pub fn poll_interval_from_env() -> Duration {
    std::env::var(POLL_INTERVAL_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&ms| ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL)
}

/// A worker signalled during stop, awaiting exit
struct Stopping {
    slot: SlotLock,
    pid: u32,
}

/// Drives the worker fleet to the configured size and back to zero
///
/// Holds no state of its own between calls: every decision is made from the
/// record store, under the slot lock of the worker concerned.
pub struct LifecycleController<P, C> {
    processes: P,
    store: RecordStore<P>,
    clock: C,
    config: FleetConfig,
    worker_program: PathBuf,
    poll_interval: Duration,
    kill_wait: Duration,
}

impl<P, C> LifecycleController<P, C>
where
    P: ProcessAdapter,
    C: Clock,
{
    /// Open the fleet's record store and build a controller over it
    pub fn new(
        config: FleetConfig,
        worker_program: PathBuf,
        processes: P,
        clock: C,
    ) -> Result<Self, EngineError> {
        let store = RecordStore::open(config.records_dir(), processes.clone())?;
        Ok(Self {
            processes,
            store,
            clock,
            config,
            worker_program,
            poll_interval: DEFAULT_POLL_INTERVAL,
            kill_wait: DEFAULT_KILL_WAIT,
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// How long to wait for a worker to die after SIGKILL
    pub fn with_kill_wait(mut self, wait: Duration) -> Self {
        self.kill_wait = wait;
        self
    }

    pub fn store(&self) -> &RecordStore<P> {
        &self.store
    }

    pub fn worker_program(&self) -> &Path {
        &self.worker_program
    }

    fn worker_env(&self) -> Vec<(String, String)> {
        vec![(
            CONFIG_ENV.to_string(),
            self.config.config_location.display().to_string(),
        )]
    }

    /// Launch description for the detached worker in slot `id`
    pub fn spawn_request(&self, id: WorkerId) -> SpawnRequest {
        let log_path = self.config.log_path(id);
        let mut env = self.worker_env();
        env.push((WORKER_ID_ENV.to_string(), id.to_string()));
        env.push((WORKER_LOG_ENV.to_string(), log_path.display().to_string()));

        SpawnRequest {
            name: id.file_stem(),
            program: self.worker_program.clone(),
            args: Vec::new(),
            cwd: self.config.config_location.clone(),
            env,
            log_path: Some(log_path),
        }
    }

    /// Launch description for a foreground worker (no slot, inherited stdio)
    pub fn foreground_request(&self) -> SpawnRequest {
        SpawnRequest {
            name: "worker-foreground".to_string(),
            program: self.worker_program.clone(),
            args: Vec::new(),
            cwd: self.config.config_location.clone(),
            env: self.worker_env(),
            log_path: None,
        }
    }

    /// Bring slots `0..worker_count` up, skipping those already running
    ///
    /// A failed spawn is reported for its slot and the remaining slots are
    /// still attempted.
    pub async fn start(&self) -> Result<StartReport, EngineError> {
        self.start_slots(self.config.worker_count).await
    }

    async fn start_slots(&self, count: u32) -> Result<StartReport, EngineError> {
        let mut report = StartReport::default();

        for id in WorkerId::range(count) {
            let slot = self.store.lock(id)?;
            let action = self.start_slot(&slot).await?;
            report.outcomes.push(StartOutcome { id, action });
        }

        self.log_extra_slots(count)?;
        Ok(report)
    }

    async fn start_slot(&self, slot: &SlotLock) -> Result<StartAction, EngineError> {
        let id = slot.id();
        if let Some(record) = self.store.lookup(slot)? {
            tracing::debug!(%id, pid = record.pid, "already running");
            return Ok(StartAction::AlreadyRunning { pid: record.pid });
        }

        let pid = match self.processes.spawn_detached(&self.spawn_request(id)).await {
            Ok(pid) => pid,
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to start worker");
                return Ok(StartAction::Failed {
                    reason: e.to_string(),
                });
            }
        };

        let started_at = self.clock.now();
        match self
            .store
            .register(slot, pid, started_at, &self.config.config_location)
        {
            Ok(_) => {
                tracing::info!(%id, pid, "started worker");
                Ok(StartAction::Started { pid })
            }
            Err(StoreError::RecordConflict { pid: existing, .. }) => {
                tracing::warn!(%id, pid, existing, "slot taken while spawning, terminating duplicate");
                self.discard(pid).await;
                Ok(StartAction::AlreadyRunning { pid: existing })
            }
            Err(e) => {
                self.discard(pid).await;
                Err(e.into())
            }
        }
    }

    /// Terminate a worker that never made it into the store
    async fn discard(&self, pid: u32) {
        if let Err(e) = self.processes.signal(pid, StopSignal::Terminate).await {
            tracing::warn!(pid, error = %e, "failed to terminate unregistered worker");
        }
    }

    fn log_extra_slots(&self, count: u32) -> Result<(), EngineError> {
        for record in self.store.all()? {
            if record.id.0 >= count && self.store.is_alive(&record) {
                tracing::info!(
                    id = %record.id,
                    pid = record.pid,
                    worker_count = count,
                    "worker above configured count left running"
                );
            }
        }
        Ok(())
    }

    /// Stop every recorded worker
    ///
    /// All workers get SIGTERM first, then share one grace period; survivors
    /// are sent SIGKILL. A worker that outlives SIGKILL keeps its record.
    pub async fn stop(&self) -> Result<StopReport, EngineError> {
        let mut outcomes = Vec::new();
        let mut stopping = Vec::new();

        for listed in self.store.all()? {
            let slot = self.store.lock(listed.id)?;
            // Re-read under the lock; a concurrent stop may have got here first
            let Some(record) = self.store.read(slot.id())? else {
                continue;
            };

            if !self.store.is_alive(&record) {
                self.store.remove(&slot)?;
                tracing::info!(id = %record.id, pid = record.pid, "removed stale record");
                outcomes.push(StopOutcome {
                    id: record.id,
                    pid: record.pid,
                    action: StopAction::Stale,
                });
                continue;
            }

            match self.processes.signal(record.pid, StopSignal::Terminate).await {
                Ok(()) => stopping.push(Stopping {
                    slot,
                    pid: record.pid,
                }),
                Err(ProcessError::NoSuchProcess(_)) => {
                    self.store.remove(&slot)?;
                    outcomes.push(StopOutcome {
                        id: record.id,
                        pid: record.pid,
                        action: StopAction::Stale,
                    });
                }
                Err(e) => {
                    tracing::error!(id = %record.id, pid = record.pid, error = %e, "failed to signal worker");
                    outcomes.push(StopOutcome {
                        id: record.id,
                        pid: record.pid,
                        action: StopAction::Failed {
                            reason: e.to_string(),
                        },
                    });
                }
            }
        }

        let survivors = self
            .await_exit(&mut stopping, &mut outcomes, self.config.grace_period, StopAction::Stopped)
            .await?;
        let mut survivors = self.escalate(survivors, &mut outcomes).await;
        let unkillable = self
            .await_exit(&mut survivors, &mut outcomes, self.kill_wait, StopAction::Killed)
            .await?;

        for worker in unkillable {
            let id = worker.slot.id();
            tracing::error!(%id, pid = worker.pid, "worker survived SIGKILL, keeping record");
            outcomes.push(StopOutcome {
                id,
                pid: worker.pid,
                action: StopAction::Failed {
                    reason: "still running after SIGKILL".to_string(),
                },
            });
        }

        outcomes.sort_by_key(|o| o.id);
        Ok(StopReport { outcomes })
    }

    /// Poll until every worker in `pending` exits or `timeout` passes
    ///
    /// Exited workers have their record removed and are reported as
    /// `action`; the ones still alive are returned.
    async fn await_exit(
        &self,
        pending: &mut Vec<Stopping>,
        outcomes: &mut Vec<StopOutcome>,
        timeout: Duration,
        action: StopAction,
    ) -> Result<Vec<Stopping>, EngineError> {
        let deadline = Instant::now() + timeout;

        loop {
            let mut alive = Vec::new();
            for worker in pending.drain(..) {
                if self.processes.is_alive(worker.pid) {
                    alive.push(worker);
                    continue;
                }
                self.store.remove(&worker.slot)?;
                let id = worker.slot.id();
                tracing::info!(%id, pid = worker.pid, "worker stopped");
                outcomes.push(StopOutcome {
                    id,
                    pid: worker.pid,
                    action: action.clone(),
                });
            }
            *pending = alive;

            if pending.is_empty() || Instant::now() >= deadline {
                return Ok(std::mem::take(pending));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn escalate(
        &self,
        survivors: Vec<Stopping>,
        outcomes: &mut Vec<StopOutcome>,
    ) -> Vec<Stopping> {
        let mut killed = Vec::new();
        for worker in survivors {
            let id = worker.slot.id();
            tracing::warn!(
                %id,
                pid = worker.pid,
                grace_period = ?self.config.grace_period,
                "worker ignored SIGTERM, sending SIGKILL"
            );
            match self.processes.signal(worker.pid, StopSignal::Kill).await {
                // Gone by itself; the next poll picks it up
                Ok(()) | Err(ProcessError::NoSuchProcess(_)) => killed.push(worker),
                Err(e) => outcomes.push(StopOutcome {
                    id,
                    pid: worker.pid,
                    action: StopAction::Failed {
                        reason: e.to_string(),
                    },
                }),
            }
        }
        killed
    }

    /// Fleet size implied by the store: one past the highest live slot
    fn running_count(&self) -> Result<Option<u32>, EngineError> {
        Ok(self
            .store
            .all()?
            .iter()
            .filter(|record| self.store.is_alive(record))
            .map(|record| record.id.0 + 1)
            .max())
    }

    /// Stop the fleet, verify it is gone, then start it again
    ///
    /// Without an explicit `count` the fleet comes back at the size it was
    /// running at, or the configured size when nothing was running. Nothing
    /// is started while any worker from before survives.
    pub async fn restart(&self, count: Option<u32>) -> Result<RestartReport, EngineError> {
        let count = match count {
            Some(count) => count,
            None => self
                .running_count()?
                .unwrap_or(self.config.worker_count),
        };
        tracing::debug!(worker_count = count, "restarting fleet");

        let stop = self.stop().await?;

        let ids: Vec<WorkerId> = self
            .store
            .all()?
            .iter()
            .filter(|record| self.store.is_alive(record))
            .map(|record| record.id)
            .collect();
        if !ids.is_empty() {
            return Err(EngineError::StopIncomplete { ids });
        }

        let start = self.start_slots(count).await?;
        Ok(RestartReport { stop, start })
    }

    /// Run one worker attached to this terminal and return its exit code
    ///
    /// The worker is not recorded and does not count toward the fleet.
    pub async fn run(&self) -> Result<Option<i32>, EngineError> {
        let code = self
            .processes
            .run_foreground(&self.foreground_request())
            .await?;
        Ok(code)
    }

    pub fn status(&self) -> Result<Vec<WorkerStatus>, EngineError> {
        Ok(StatusReporter::new(&self.store).report()?)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
