// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the lifecycle engine

use herd_adapters::ProcessError;
use herd_core::WorkerId;
use herd_storage::StoreError;
use thiserror::Error;

/// Errors that can occur in lifecycle operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("record store error: {0}")]
    Store(#[from] StoreError),
    #[error("process error: {0}")]
    Process(#[from] ProcessError),
    #[error("workers still running after stop: {}", format_ids(.ids))]
    StopIncomplete { ids: Vec<WorkerId> },
}

fn format_ids(ids: &[WorkerId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
