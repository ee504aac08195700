// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring from command-line arguments to a lifecycle controller

use crate::error::HerdError;
use anyhow::Result;
use herd_adapters::{OsProcessAdapter, TracedProcessAdapter};
use herd_core::{config_location, ConfigError, FleetConfig, FleetOverrides, SystemClock};
use herd_engine::{poll_interval_from_env, LifecycleController};
use std::path::{Path, PathBuf};

/// Environment variable overriding the worker executable
pub const WORKER_BINARY_ENV: &str = "HERD_WORKER_BINARY";

const WORKER_BINARY_NAME: &str = "herd-worker";

/// Controller over real processes, with tracing
pub type FleetController = LifecycleController<TracedProcessAdapter<OsProcessAdapter>, SystemClock>;

/// Resolve the bundle from `--config`, `HERD_CONFIG` or the current directory
pub fn resolve(config_flag: Option<&Path>, overrides: FleetOverrides) -> Result<FleetConfig> {
    let location = config_location(config_flag)?;
    match FleetConfig::resolve(&location, overrides) {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound { location, missing }) => {
            Err(HerdError::config_not_found(&location, &missing).into())
        }
        Err(e @ ConfigError::Invalid { .. }) => Err(HerdError::new("invalid configuration")
            .with_context(e.to_string())
            .with_suggestion("Fix the file and retry: herd config")
            .with_source(e)
            .into()),
        Err(e) => Err(e.into()),
    }
}

/// Build a controller for the resolved fleet
pub fn controller(config: FleetConfig) -> Result<FleetController> {
    let worker_program = find_worker_binary(&config);
    tracing::debug!(worker = %worker_program.display(), "using worker binary");
    let controller = LifecycleController::new(
        config,
        worker_program,
        TracedProcessAdapter::new(OsProcessAdapter::new()),
        SystemClock,
    )?
    .with_poll_interval(poll_interval_from_env());
    Ok(controller)
}

/// Find the herd-worker binary
fn find_worker_binary(config: &FleetConfig) -> PathBuf {
    // Explicit override (used by tests to ensure correct binary)
    if let Ok(path) = std::env::var(WORKER_BINARY_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = config.worker_binary() {
        return path;
    }

    // Installed next to herd
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join(WORKER_BINARY_NAME);
            if sibling.exists() {
                return sibling;
            }
        }
    }

    // Fall back to PATH lookup
    PathBuf::from(WORKER_BINARY_NAME)
}
