// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! herd - worker fleet supervisor CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod completions;
mod error;
mod fleet;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, logs, run, start, status, stop};
use completions::CompletionsArgs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "herd", version, about = "herd - worker fleet supervisor")]
struct Cli {
    /// Configuration bundle directory (defaults to $HERD_CONFIG, then the
    /// current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start workers in the background
    Start(start::StartArgs),
    /// Stop all workers
    Stop(stop::StopArgs),
    /// Stop all workers, then start the same number again
    Restart(stop::RestartArgs),
    /// Run one worker in the foreground
    Run,
    /// Show recorded workers and whether they are alive
    Status(status::StatusArgs),
    /// Show the resolved configuration
    Config(config::ConfigArgs),
    /// Show the tail of a worker's log
    Logs(logs::LogsArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config_flag = cli.config.as_deref();

    match cli.command {
        Commands::Start(args) => start::handle(args, config_flag).await,
        Commands::Stop(args) => stop::stop(args, config_flag).await,
        Commands::Restart(args) => stop::restart(args, config_flag).await,
        Commands::Run => run::handle(config_flag).await,
        Commands::Status(args) => status::handle(args, config_flag),
        Commands::Config(args) => config::handle(args, config_flag),
        Commands::Logs(args) => logs::handle(args, config_flag),
        Commands::Completions(args) => completions::handle::<Cli>(args),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<error::HerdError>() {
                Some(herd) => eprint!("{}", herd),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}
