// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "herd")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Start,
    Restart,
}

fn script(shell: Shell) -> String {
    let mut out = Vec::new();
    write_completions::<Cli>(shell, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[yare::parameterized(
    bash = { Shell::Bash },
    zsh = { Shell::Zsh },
    fish = { Shell::Fish },
    powershell = { Shell::PowerShell },
    elvish = { Shell::Elvish },
)]
fn script_names_binary_and_subcommands(shell: Shell) {
    let script = script(shell);
    assert!(script.contains("herd"));
    assert!(script.contains("restart"));
}
