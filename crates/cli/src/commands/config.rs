// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `herd config` - show the resolved configuration

use crate::fleet;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use herd_core::{FleetConfig, FleetOverrides};
use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Args)]
pub struct ConfigArgs {
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ConfigView {
    #[serde(flatten)]
    config: FleetConfig,
    central_server_url: String,
}

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        writeln!(f, "bundle:         {}", c.config_location.display())?;
        writeln!(f, "workers:        {}", c.worker_count)?;
        writeln!(f, "central server: {}", self.central_server_url)?;
        writeln!(
            f,
            "grace period:   {}",
            humantime::format_duration(c.grace_period)
        )?;
        writeln!(
            f,
            "heartbeat:      {}",
            humantime::format_duration(c.settings.heartbeat_interval)
        )?;
        writeln!(f, "state dir:      {}", c.state_dir.display())?;
        if let Some(binary) = c.worker_binary() {
            writeln!(f, "worker binary:  {}", binary.display())?;
        }
        Ok(())
    }
}

pub fn handle(args: ConfigArgs, config_flag: Option<&Path>) -> Result<()> {
    let config = fleet::resolve(config_flag, FleetOverrides::default())?;
    let view = ConfigView {
        central_server_url: config.settings.central_server_url(),
        config,
    };
    output::print(&view, args.format)
}
