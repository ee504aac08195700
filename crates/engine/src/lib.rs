// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! herd fleet lifecycle engine

mod controller;
mod error;
mod report;
mod status;

pub use controller::{poll_interval_from_env, LifecycleController, POLL_INTERVAL_ENV};
pub use error::EngineError;
pub use report::{
    RestartReport, StartAction, StartOutcome, StartReport, StopAction, StopOutcome, StopReport,
};
pub use status::{StatusReporter, WorkerStatus};
