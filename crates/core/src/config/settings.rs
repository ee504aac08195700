// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `herd.toml` contents

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_NUM_WORKERS: u32 = 3;
pub const DEFAULT_PORT: u16 = 9173;

/// Values read from a bundle's `herd.toml`
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Workers started when `start` is given no count
    pub num_workers: u32,
    /// Port of the central coordination server
    pub port: u16,
    /// URL workers report to, when the server is not local
    pub central_server: Option<String>,
    /// Wait after SIGTERM before a worker is killed
    #[serde(with = "humantime_serde")]
    pub grace_period: Duration,
    /// How often an idle worker logs a heartbeat
    #[serde(with = "humantime_serde")]
    pub heartbeat_interval: Duration,
    /// Worker executable; relative paths resolve against the bundle
    pub worker_binary: Option<PathBuf>,
    /// Record and log directory; relative paths resolve against the bundle
    pub state_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_workers: DEFAULT_NUM_WORKERS,
            port: DEFAULT_PORT,
            central_server: None,
            grace_period: Duration::from_secs(10),
            heartbeat_interval: Duration::from_secs(30),
            worker_binary: None,
            state_dir: None,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Invalid {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Read and parse a settings file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Central server URL, defaulting to the local server port
    pub fn central_server_url(&self) -> String {
        self.central_server
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
