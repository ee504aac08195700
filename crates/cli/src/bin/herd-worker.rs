// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! herd-worker - one member of a herd fleet
//!
//! Launched by `herd start` (detached) or `herd run` (foreground).

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match herd_worker::run_from_env().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
