// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration bundle resolution
//!
//! A bundle is a directory holding `herd.toml`. Every command invocation
//! resolves it afresh into a read-only [`FleetConfig`].

mod fleet;
mod settings;

pub use fleet::{config_location, FleetConfig, FleetOverrides, CONFIG_ENV};
pub use settings::{Settings, DEFAULT_NUM_WORKERS, DEFAULT_PORT};

use std::path::PathBuf;
use thiserror::Error;

/// Settings file inside a configuration bundle
pub const SETTINGS_FILE: &str = "herd.toml";

/// Files that must exist for a directory to count as a bundle
pub const REQUIRED_FILES: &[&str] = &[SETTINGS_FILE];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration not found at {}: missing {}", location.display(), missing.join(", "))]
    NotFound {
        location: PathBuf,
        missing: Vec<String>,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine state directory (set XDG_STATE_HOME or state_dir in herd.toml)")]
    NoStateDir,
}
