// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `herd stop` and `herd restart`

use crate::error::HerdError;
use crate::fleet;
use anyhow::Result;
use clap::Args;
use herd_core::FleetOverrides;
use herd_engine::{EngineError, StopReport};
use std::path::Path;
use std::time::Duration;

#[derive(Args)]
pub struct StopArgs {
    /// Wait this long after SIGTERM before SIGKILL (e.g. "5s", "500ms")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub grace: Option<Duration>,
}

impl StopArgs {
    fn overrides(&self) -> FleetOverrides {
        FleetOverrides {
            grace_period: self.grace,
            ..Default::default()
        }
    }
}

#[derive(Args)]
pub struct RestartArgs {
    /// Number of workers (defaults to the running fleet's size, then
    /// num_workers in herd.toml)
    pub count: Option<u32>,

    #[command(flatten)]
    pub stop: StopArgs,
}

fn check_stopped(report: &StopReport) -> Result<()> {
    let failures = report.failures();
    if failures.is_empty() {
        return Ok(());
    }
    let ids: Vec<_> = failures.iter().map(|o| o.id).collect();
    Err(HerdError::stop_incomplete(&ids).into())
}

pub async fn stop(args: StopArgs, config_flag: Option<&Path>) -> Result<()> {
    let config = fleet::resolve(config_flag, args.overrides())?;
    let controller = fleet::controller(config)?;

    let report = controller.stop().await?;
    print!("{}", report);
    check_stopped(&report)
}

pub async fn restart(args: RestartArgs, config_flag: Option<&Path>) -> Result<()> {
    let config = fleet::resolve(config_flag, args.stop.overrides())?;
    let controller = fleet::controller(config)?;

    let report = match controller.restart(args.count).await {
        Ok(report) => report,
        Err(EngineError::StopIncomplete { ids }) => {
            return Err(HerdError::stop_incomplete(&ids)
                .with_context("Nothing was started")
                .into())
        }
        Err(e) => return Err(e.into()),
    };
    print!("{}", report);

    let failures = report.start.failures();
    if !failures.is_empty() {
        return Err(HerdError::spawn_failed(&failures, controller.worker_program()).into());
    }
    Ok(())
}
