// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `herd start` - bring the fleet up to size

use crate::error::HerdError;
use crate::fleet;
use anyhow::Result;
use clap::Args;
use herd_core::FleetOverrides;
use std::path::Path;

#[derive(Args)]
pub struct StartArgs {
    /// Number of workers (defaults to num_workers in herd.toml)
    pub count: Option<u32>,
}

pub async fn handle(args: StartArgs, config_flag: Option<&Path>) -> Result<()> {
    let config = fleet::resolve(
        config_flag,
        FleetOverrides {
            worker_count: args.count,
            ..Default::default()
        },
    )?;
    let controller = fleet::controller(config)?;

    let report = controller.start().await?;
    print!("{}", report);

    let failures = report.failures();
    if !failures.is_empty() {
        return Err(HerdError::spawn_failed(&failures, controller.worker_program()).into());
    }
    Ok(())
}
