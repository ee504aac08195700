// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker main loop

use crate::env::WorkerEnv;
use crate::error::WorkerError;
use herd_core::{FleetConfig, FleetOverrides, Settings};
use std::future::Future;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

/// Shortest heartbeat the loop accepts
const MIN_HEARTBEAT: Duration = Duration::from_millis(10);

/// A worker bound to its configuration bundle
pub struct Worker {
    env: WorkerEnv,
    settings: Settings,
}

impl Worker {
    /// Validate the bundle and load its settings
    pub fn load(env: WorkerEnv) -> Result<Self, WorkerError> {
        let config = FleetConfig::resolve(&env.config_location, FleetOverrides::default())?;
        Ok(Self {
            env: WorkerEnv {
                config_location: config.config_location,
                ..env
            },
            settings: config.settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn env(&self) -> &WorkerEnv {
        &self.env
    }

    /// Idle on the heartbeat until `shutdown` resolves
    ///
    /// Returns the number of heartbeats logged.
    pub async fn run_until(&self, shutdown: impl Future<Output = &'static str>) -> u64 {
        let period = self.settings.heartbeat_interval.max(MIN_HEARTBEAT);
        let mut heartbeat = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        let mut beats = 0;

        info!(
            worker = %self.env.label(),
            bundle = %self.env.config_location.display(),
            server = %self.settings.central_server_url(),
            "worker ready"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    beats += 1;
                    info!(beats, "heartbeat");
                }
                reason = &mut shutdown => {
                    info!("received {}, shutting down", reason);
                    break;
                }
            }
        }

        info!(worker = %self.env.label(), "worker stopped");
        beats
    }
}

/// Resolve on the first SIGTERM or SIGINT, naming the signal
pub fn shutdown_signal() -> Result<impl Future<Output = &'static str>, WorkerError> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    Ok(async move {
        tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        }
    })
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
