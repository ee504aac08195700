// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `herd run` - one worker in the foreground

use crate::error::HerdError;
use crate::fleet;
use anyhow::Result;
use herd_core::FleetOverrides;
use std::path::Path;

pub async fn handle(config_flag: Option<&Path>) -> Result<()> {
    let config = fleet::resolve(config_flag, FleetOverrides::default())?;
    let controller = fleet::controller(config)?;

    // The worker shares our terminal and handles Ctrl-C itself; stay alive to
    // collect its exit status
    ctrlc::set_handler(|| {})?;

    match controller.run().await? {
        Some(0) => Ok(()),
        code => Err(HerdError::worker_exited(code).into()),
    }
}
