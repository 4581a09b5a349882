// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw agent` - control the polling agent inside the daemon

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use jw_core::AgentStatus;
use jw_wire::Request;

use crate::client::{ClientError, DaemonClient};
use crate::color;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct AgentArgs {
    #[command(subcommand)]
    pub command: AgentCommand,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentCommand {
    /// Start polling (also clears a pause)
    Start,
    /// Pause polling after the current cycle
    Pause,
    /// Resume a paused agent
    Resume,
    /// Stop polling and wait for the loop to exit
    Stop,
    /// Show agent state and cycle health
    Status,
}

impl AgentCommand {
    pub(crate) fn request(self) -> Request {
        match self {
            AgentCommand::Start => Request::AgentStart,
            AgentCommand::Pause => Request::AgentPause,
            AgentCommand::Resume => Request::AgentResume,
            AgentCommand::Stop => Request::AgentStop,
            AgentCommand::Status => Request::AgentStatus,
        }
    }
}

pub async fn handle(args: AgentArgs, format: OutputFormat) -> Result<()> {
    let client = DaemonClient::connect().map_err(not_running_or)?;
    let status = client.agent(args.command.request()).await.map_err(not_running_or)?;
    format_or_json(format, &status, || {
        for line in status_lines(&status) {
            println!("{line}");
        }
    })
}

fn not_running_or(e: ClientError) -> anyhow::Error {
    if e.is_not_running() {
        ExitError::not_running().into()
    } else {
        anyhow!("{}", e)
    }
}

pub(crate) fn status_lines(status: &AgentStatus) -> Vec<String> {
    let health = &status.health;
    let mut lines = vec![
        format!(
            "Agent: {} (poll every {}s)",
            color::status(&status.state.to_string()),
            status.poll_interval_sec
        ),
        format!("Cycles: {} ok, {} failed", health.cycles_completed, health.cycles_failed),
        format!("Last cycle: {}", health.last_cycle_at.as_deref().unwrap_or("never")),
        format!("Tracked jobs: {}", health.tracked_job_count),
    ];
    if let Some(error) = &health.last_error {
        lines.push(format!("Last error: {}", color::context(error)));
    }
    lines
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
