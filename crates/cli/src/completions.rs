// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `herd completions <shell>`
//!
//! ```bash
//! herd completions bash > ~/.local/share/bash-completion/completions/herd
//! herd completions zsh > ~/.zfunc/_herd
//! herd completions fish > ~/.config/fish/completions/herd.fish
//! herd completions powershell >> $PROFILE.CurrentUserAllHosts
//! herd completions elvish >> ~/.config/elvish/rc.elv
//! ```

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell`, named after the parsed command
pub fn write_completions<C: CommandFactory>(shell: Shell, out: &mut impl Write) -> Result<()> {
    let mut cmd = C::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, out);
    out.flush()?;
    Ok(())
}

pub fn handle<C: CommandFactory>(args: CompletionsArgs) -> Result<()> {
    write_completions::<C>(args.shell, &mut std::io::stdout().lock())
}

#[cfg(test)]
#[path = "completions_tests.rs"]
mod tests;
