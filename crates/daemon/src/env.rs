// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jw_engine::DEFAULT_POLL_INTERVAL;

use crate::lifecycle::LifecycleError;

/// Protocol version (from Cargo.toml)
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve state directory: JW_STATE_DIR > XDG_STATE_HOME/jw > ~/.local/state/jw
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Some(dir) = non_empty("JW_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("jw"));
    }
    let home = dirs::home_dir().ok_or(LifecycleError::NoStateDir)?;
    Ok(home.join(".local/state/jw"))
}

/// Default IPC timeout
pub fn ipc_timeout() -> Duration {
    std::env::var("JW_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

/// Catalog source, defaulting to `jobs.toml` inside the state directory.
pub fn catalog_path(state_dir: &Path) -> PathBuf {
    non_empty("JW_CATALOG_PATH").map(PathBuf::from).unwrap_or_else(|| state_dir.join("jobs.toml"))
}

/// Response document served by the replay backend.
pub fn replay_path(state_dir: &Path) -> PathBuf {
    non_empty("JW_BACKEND_REPLAY")
        .map(PathBuf::from)
        .unwrap_or_else(|| state_dir.join("backend_response.json"))
}

/// Poll interval; zero and unparseable values fall back to the default.
pub fn poll_interval() -> Duration {
    std::env::var("JW_POLL_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_POLL_INTERVAL)
}

pub fn backend_system() -> String {
    non_empty("JW_SYSTEM").unwrap_or_else(|| "SMP".to_string())
}

pub fn backend_client() -> String {
    non_empty("JW_CLIENT").unwrap_or_else(|| "100".to_string())
}

/// Start the agent as soon as the daemon is up (`JW_AUTOSTART`, default on).
pub fn autostart() -> bool {
    match non_empty("JW_AUTOSTART") {
        Some(value) => !matches!(value.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
        None => true,
    }
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
