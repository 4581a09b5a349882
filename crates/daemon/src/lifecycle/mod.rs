// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

mod startup;
pub use startup::{startup, StartupResult};

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jw_adapters::ReplayConnector;
use jw_core::SystemClock;
use jw_engine::{AgentConfig, AgentController, DEFAULT_POLL_INTERVAL};
use jw_storage::{CatalogLoader, SnapshotStore, TrackStateStore};
use thiserror::Error;
use tracing::{info, warn};

use crate::env;

/// Agent with the daemon's concrete backend and clock
pub type DaemonAgent = AgentController<ReplayConnector, SystemClock>;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/jw)
    pub state_dir: PathBuf,
    /// Path to Unix socket
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Snapshot published by the agent, read by the dashboard
    pub snapshot_path: PathBuf,
    /// Track-state overlay written by the dashboard
    pub track_state_path: PathBuf,
    /// Job catalog source
    pub catalog_path: PathBuf,
    /// Response document for the replay backend
    pub replay_path: PathBuf,
    pub poll_interval: Duration,
    pub system: String,
    pub client: String,
    /// Start the agent right after startup
    pub autostart: bool,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Uses fixed paths under `~/.local/state/jw/` (or `$XDG_STATE_HOME/jw/`)
    /// unless `JW_STATE_DIR` points elsewhere.
    pub fn load() -> Result<Self, LifecycleError> {
        let state_dir = env::state_dir()?;
        let mut config = Self::new(state_dir);
        config.catalog_path = env::catalog_path(&config.state_dir);
        config.replay_path = env::replay_path(&config.state_dir);
        config.poll_interval = env::poll_interval();
        config.system = env::backend_system();
        config.client = env::backend_client();
        config.autostart = env::autostart();
        Ok(config)
    }

    /// Default configuration rooted at `state_dir`.
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            socket_path: state_dir.join("daemon.sock"),
            lock_path: state_dir.join("daemon.pid"),
            log_path: state_dir.join("daemon.log"),
            snapshot_path: state_dir.join("job_snapshot.json"),
            track_state_path: state_dir.join("track_state.json"),
            catalog_path: state_dir.join("jobs.toml"),
            replay_path: state_dir.join("backend_response.json"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            system: "SMP".to_string(),
            client: "100".to_string(),
            autostart: true,
            state_dir,
        }
    }

    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig::new(
            CatalogLoader::new(self.catalog_path.clone()),
            TrackStateStore::new(self.track_state_path.clone()),
            SnapshotStore::new(self.snapshot_path.clone()),
        )
        .poll_interval(self.poll_interval)
        .backend_identity(self.system.clone(), self.client.clone())
    }
}

/// Daemon state during operation.
///
/// The listener is returned separately from startup to be spawned as a Listener task.
pub struct DaemonState {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// The polling agent (shared with the listener)
    pub agent: Arc<DaemonAgent>,
    /// When daemon started
    pub start_time: Instant,
}

impl DaemonState {
    /// Shutdown the daemon gracefully.
    ///
    /// Stops the agent and waits for its current cycle to finish before the
    /// socket and PID files are removed.
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        // 1. Stop the agent; an in-flight cycle completes and publishes
        self.agent.stop();
        self.agent.join().await;

        // 2. Remove socket file (listener task stops when tokio runtime exits)
        if self.config.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.socket_path) {
                warn!("Failed to remove socket file: {}", e);
            }
        }

        // 3. Remove PID file
        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // 4. Lock file is released automatically when self.lock_file is dropped

        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
