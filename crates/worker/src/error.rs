// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use herd_core::ConfigError;
use thiserror::Error;

/// Errors that stop a worker from starting
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("invalid worker id {value:?} in {var}")]
    InvalidWorkerId { var: &'static str, value: String },
    #[error("log path has no file name: {0}")]
    InvalidLogPath(std::path::PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
