// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw daemon` - Daemon management commands

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use jw_daemon::Config;

use crate::client::DaemonClient;
use crate::color;
use crate::output::{format_or_json, OutputFormat};

/// How long `start`/`stop` wait for the daemon to come up or go away.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);
const SETTLE_POLL: Duration = Duration::from_millis(100);

#[derive(Args)]
pub struct DaemonArgs {
    #[command(subcommand)]
    pub command: DaemonCommand,
}

#[derive(Subcommand)]
pub enum DaemonCommand {
    /// Start the daemon in the background
    Start,
    /// Stop the agent and the daemon
    Stop,
    /// Check daemon status
    Status,
}

pub async fn daemon(args: DaemonArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        DaemonCommand::Start => start().await,
        DaemonCommand::Stop => stop().await,
        DaemonCommand::Status => status(format).await,
    }
}

async fn start() -> Result<()> {
    let config = Config::load()?;
    if let Ok(client) = DaemonClient::at(&config.socket_path) {
        if client.ping().await.is_ok() {
            println!("Daemon already running");
            return Ok(());
        }
    }

    let jwd = find_jwd_binary();
    let mut child = Command::new(&jwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| anyhow!("Failed to launch {}: {}", jwd.display(), e))?;

    let deadline = Instant::now() + SETTLE_TIMEOUT;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait()? {
            return Err(anyhow!(
                "Daemon exited during startup ({}); see {}",
                status,
                config.log_path.display()
            ));
        }
        if let Ok(client) = DaemonClient::at(&config.socket_path) {
            if client.ping().await.is_ok() {
                println!("Daemon started");
                return Ok(());
            }
        }
        tokio::time::sleep(SETTLE_POLL).await;
    }
    Err(anyhow!("Daemon did not respond within {:?}; see {}", SETTLE_TIMEOUT, config.log_path.display()))
}

async fn stop() -> Result<()> {
    let config = Config::load()?;
    let client = match DaemonClient::at(&config.socket_path) {
        Ok(client) => client,
        Err(_) => {
            println!("Daemon not running");
            return Ok(());
        }
    };
    match client.shutdown().await {
        Ok(()) => {}
        Err(e) if e.is_not_running() => {
            println!("Daemon not running");
            return Ok(());
        }
        Err(e) => return Err(anyhow!("Failed to stop daemon: {}", e)),
    }

    // The daemon removes its socket once the agent has exited
    let deadline = Instant::now() + SETTLE_TIMEOUT;
    while config.socket_path.exists() && Instant::now() < deadline {
        tokio::time::sleep(SETTLE_POLL).await;
    }
    println!("Daemon stopped");
    Ok(())
}

async fn status(format: OutputFormat) -> Result<()> {
    let client = match DaemonClient::connect() {
        Ok(c) => c,
        Err(_) => return print_not_running(format),
    };

    let status = match client.status().await {
        Ok(status) => status,
        Err(e) if e.is_not_running() => return print_not_running(format),
        Err(e) => return Err(anyhow!("{}", e)),
    };
    let version = client.hello().await.unwrap_or_else(|_| "unknown".to_string());

    let obj = serde_json::json!({
        "status": "running",
        "version": version,
        "pid": status.pid,
        "uptime_secs": status.uptime_secs,
        "uptime": format_uptime(status.uptime_secs),
        "agent": status.agent,
    });
    format_or_json(format, &obj, || {
        println!("Status: running");
        println!("Version: {}", color::literal(&version));
        println!("PID: {}", status.pid);
        println!("Uptime: {}", format_uptime(status.uptime_secs));
        for line in super::agent::status_lines(&status.agent) {
            println!("{line}");
        }
    })
}

fn print_not_running(format: OutputFormat) -> Result<()> {
    let obj = serde_json::json!({ "status": "not_running" });
    format_or_json(format, &obj, || println!("Daemon not running"))
}

pub(crate) fn format_uptime(secs: u64) -> String {
    let (days, hours, mins, secs) = (secs / 86_400, (secs % 86_400) / 3600, (secs % 3600) / 60, secs % 60);
    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h {mins}m {secs}s")
    } else if mins > 0 {
        format!("{mins}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// `jwd` next to the running `jw` binary, else whatever `PATH` resolves.
fn find_jwd_binary() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("jwd")))
        .filter(|path| path.exists())
        .unwrap_or_else(|| PathBuf::from("jwd"))
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
