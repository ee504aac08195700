// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! herd worker runtime
//!
//! Entry point of the `herd-worker` process. The supervisor passes the
//! bundle, slot and log file through the environment; the worker loads the
//! bundle, logs a heartbeat and exits cleanly on SIGTERM or SIGINT.

mod env;
mod error;
mod logging;
mod runtime;

pub use env::WorkerEnv;
pub use error::WorkerError;
pub use logging::{setup_logging, startup_marker, write_startup_error, write_startup_marker};
pub use runtime::{shutdown_signal, Worker};

/// Run a worker configured from the process environment until signalled
pub async fn run_from_env() -> Result<(), WorkerError> {
    let env = WorkerEnv::from_env()?;

    // Before tracing, so the supervisor can find where this run begins
    write_startup_marker(&env)?;
    let log_guard = setup_logging(&env)?;

    let result = start(env.clone()).await;
    if let Err(e) = &result {
        write_startup_error(&env, e);
        tracing::error!(error = %e, "worker failed to start");
    }
    drop(log_guard);
    result
}

async fn start(env: WorkerEnv) -> Result<(), WorkerError> {
    let worker = Worker::load(env)?;
    let shutdown = shutdown_signal()?;
    worker.run_until(shutdown).await;
    Ok(())
}
