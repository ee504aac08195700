// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation fleet configuration

use super::{ConfigError, Settings, REQUIRED_FILES, SETTINGS_FILE};
use crate::worker::WorkerId;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration bundle
pub const CONFIG_ENV: &str = "HERD_CONFIG";

/// Command-line values that take precedence over `herd.toml`
#[derive(Debug, Clone, Copy, Default)]
pub struct FleetOverrides {
    pub worker_count: Option<u32>,
    pub grace_period: Option<Duration>,
}

/// Configuration resolved once per command invocation
#[derive(Debug, Clone, Serialize)]
pub struct FleetConfig {
    /// Desired number of concurrent workers
    pub worker_count: u32,
    /// Canonical path of the validated bundle
    pub config_location: PathBuf,
    /// Effective grace period for stopping workers
    #[serde(with = "humantime_serde")]
    pub grace_period: Duration,
    /// Directory holding worker records and logs
    pub state_dir: PathBuf,
    pub settings: Settings,
}

/// Pick the bundle location: explicit flag, then `HERD_CONFIG`, then the
/// current directory
pub fn config_location(flag: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })
}

impl FleetConfig {
    /// Validate the bundle at `location` and build the fleet configuration
    pub fn resolve(location: &Path, overrides: FleetOverrides) -> Result<Self, ConfigError> {
        let missing = missing_files(location);
        if !missing.is_empty() {
            return Err(ConfigError::NotFound {
                location: location.to_path_buf(),
                missing,
            });
        }

        let config_location = location
            .canonicalize()
            .map_err(|source| ConfigError::Io {
                path: location.to_path_buf(),
                source,
            })?;
        let settings = Settings::load(&config_location.join(SETTINGS_FILE))?;

        let state_dir = match &settings.state_dir {
            Some(dir) => config_location.join(dir),
            None => default_state_dir(
                &config_location,
                std::env::var_os("XDG_STATE_HOME").map(PathBuf::from),
                dirs::home_dir(),
            )?,
        };

        let config = Self {
            worker_count: overrides.worker_count.unwrap_or(settings.num_workers),
            grace_period: overrides.grace_period.unwrap_or(settings.grace_period),
            config_location,
            state_dir,
            settings,
        };

        tracing::debug!(
            location = %config.config_location.display(),
            state_dir = %config.state_dir.display(),
            worker_count = config.worker_count,
            "resolved fleet configuration"
        );

        Ok(config)
    }

    /// Directory of durable worker records
    pub fn records_dir(&self) -> PathBuf {
        self.state_dir.join("workers")
    }

    /// Directory of worker log files
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// Log file for one worker slot
    pub fn log_path(&self, id: WorkerId) -> PathBuf {
        self.logs_dir().join(format!("{}.log", id.file_stem()))
    }

    /// Worker executable named in `herd.toml`, resolved against the bundle
    pub fn worker_binary(&self) -> Option<PathBuf> {
        self.settings
            .worker_binary
            .as_ref()
            .map(|path| self.config_location.join(path))
    }
}

/// Required files absent from `location` (all of them when it is not a directory)
fn missing_files(location: &Path) -> Vec<String> {
    if !location.is_dir() {
        return REQUIRED_FILES.iter().map(|f| f.to_string()).collect();
    }
    REQUIRED_FILES
        .iter()
        .filter(|f| !location.join(f).is_file())
        .map(|f| f.to_string())
        .collect()
}

/// State directory for a bundle that does not name one
///
/// Uses XDG_STATE_HOME or defaults to ~/.local/state, keyed by a hash of the
/// canonical bundle path so two bundles never share records.
fn default_state_dir(
    config_location: &Path,
    xdg_state_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    let root = match (xdg_state_home, home) {
        (Some(xdg), _) if !xdg.as_os_str().is_empty() => xdg.join("herd"),
        (_, Some(home)) => home.join(".local/state/herd"),
        _ => return Err(ConfigError::NoStateDir),
    };
    Ok(root.join("fleets").join(fleet_hash(config_location)))
}

/// First 16 hex chars of the SHA-256 of the bundle path
fn fleet_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let result = hasher.finalize();
    result[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
#[path = "fleet_tests.rs"]
mod tests;
