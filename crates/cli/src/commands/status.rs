// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `herd status` - recorded workers and whether they are alive

use crate::fleet;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use herd_core::FleetOverrides;
use std::path::Path;

#[derive(Args)]
pub struct StatusArgs {
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn handle(args: StatusArgs, config_flag: Option<&Path>) -> Result<()> {
    let config = fleet::resolve(config_flag, FleetOverrides::default())?;
    let controller = fleet::controller(config)?;

    let rows = controller.status()?;
    output::print_list(&rows, args.format, "no workers recorded")
}
