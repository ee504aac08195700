// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `herd logs` - tail a worker's log file

use crate::error::HerdError;
use crate::fleet;
use anyhow::Result;
use clap::Args;
use herd_core::{FleetOverrides, WorkerId};
use std::io::ErrorKind;
use std::path::Path;

#[derive(Args)]
pub struct LogsArgs {
    /// Worker slot
    pub id: u32,

    /// Number of lines to show
    #[arg(short = 'n', long, default_value_t = 50)]
    pub lines: usize,
}

/// The last `n` lines of `content`
pub fn tail(content: &str, n: usize) -> Vec<&str> {
    let lines: Vec<&str> = content.lines().collect();
    let skip = lines.len().saturating_sub(n);
    lines[skip..].to_vec()
}

pub fn handle(args: LogsArgs, config_flag: Option<&Path>) -> Result<()> {
    let config = fleet::resolve(config_flag, FleetOverrides::default())?;
    let id = WorkerId(args.id);
    let path = config.log_path(id);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(HerdError::no_log(id, &path).into())
        }
        Err(e) => return Err(e.into()),
    };

    for line in tail(&content, args.lines) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
