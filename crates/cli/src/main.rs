// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw` - job watch CLI
//!
//! Dashboard and track edits work straight off the state directory; agent
//! and daemon commands talk to `jwd` over its control socket.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod color;
mod commands;
mod exit_error;
mod output;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{agent, daemon, status, track};
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "jw", version, about = "Watch scheduled backend jobs", styles = color::styles())]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the job dashboard from the latest snapshot
    Status(status::StatusArgs),
    /// Track or untrack jobs, or list the catalog
    Track(track::TrackArgs),
    /// Control the polling agent
    Agent(agent::AgentArgs),
    /// Daemon management
    Daemon(daemon::DaemonArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            eprintln!("{}", exit.message);
            std::process::exit(exit.code);
        }
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;
    match cli.command {
        Commands::Status(args) => status::handle(args, format).await,
        Commands::Track(args) => track::handle(args, format).await,
        Commands::Agent(args) => agent::handle(args, format).await,
        Commands::Daemon(args) => daemon::daemon(args, format).await,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
