// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::process::{ProcessAdapter, ProcessError, SpawnRequest, StopSignal};
use async_trait::async_trait;
use herd_core::ProcessProbe;
use tracing::Instrument;

/// Wrapper that adds tracing to any ProcessAdapter
#[derive(Clone)]
pub struct TracedProcessAdapter<P> {
    inner: P,
}

impl<P> TracedProcessAdapter<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: ProcessProbe> ProcessProbe for TracedProcessAdapter<P> {
    fn is_alive(&self, pid: u32) -> bool {
        let alive = self.inner.is_alive(pid);
        tracing::trace!(pid, alive, "checked");
        alive
    }
}

#[async_trait]
impl<P: ProcessAdapter> ProcessAdapter for TracedProcessAdapter<P> {
    async fn spawn_detached(&self, request: &SpawnRequest) -> Result<u32, ProcessError> {
        let span = tracing::info_span!(
            "process.spawn",
            name = %request.name,
            program = %request.program.display()
        );

        async move {
            tracing::info!(cwd = %request.cwd.display(), env_count = request.env.len(), "starting");

            // Precondition: cwd must exist
            if !request.cwd.is_dir() {
                tracing::error!("working directory does not exist");
                return Err(ProcessError::SpawnFailed {
                    program: request.program.clone(),
                    reason: format!(
                        "working directory does not exist: {}",
                        request.cwd.display()
                    ),
                });
            }

            let start = std::time::Instant::now();
            let result = self.inner.spawn_detached(request).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(pid) => tracing::info!(
                    pid,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "process spawned"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "spawn failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn run_foreground(&self, request: &SpawnRequest) -> Result<Option<i32>, ProcessError> {
        let span = tracing::info_span!("process.run", name = %request.name);

        async move {
            tracing::info!(program = %request.program.display(), "running in foreground");
            let result = self.inner.run_foreground(request).await;

            match &result {
                Ok(code) => tracing::info!(code = ?code, "process exited"),
                Err(e) => tracing::error!(error = %e, "run failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn signal(&self, pid: u32, signal: StopSignal) -> Result<(), ProcessError> {
        let span = tracing::info_span!("process.signal", pid, %signal);

        async move {
            let result = self.inner.signal(pid, signal).await;
            // Signalling a process that already exited is routine during stop
            match &result {
                Ok(()) => tracing::debug!("sent"),
                Err(ProcessError::NoSuchProcess(_)) => tracing::debug!("process already gone"),
                Err(e) => tracing::warn!(error = %e, "signal failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
