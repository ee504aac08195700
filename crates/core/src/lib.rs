// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! herd-core: shared types for the herd worker fleet supervisor
//!
//! This crate provides:
//! - Configuration bundle resolution (`herd.toml`) into a [`FleetConfig`]
//! - The durable [`WorkerRecord`] shape and the [`ProcessProbe`] seam
//! - A clock abstraction for testable timestamps

pub mod clock;
pub mod config;
pub mod worker;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{
    config_location, ConfigError, FleetConfig, FleetOverrides, Settings, CONFIG_ENV,
    REQUIRED_FILES, SETTINGS_FILE,
};
pub use worker::{ProcessProbe, WorkerId, WorkerRecord, WORKER_ID_ENV, WORKER_LOG_ENV};
