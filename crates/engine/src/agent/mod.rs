// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling agent lifecycle.
//!
//! The controller publishes the desired [`AgentState`] on a watch channel.
//! The background worker reads it between cycles and while waiting, so a
//! pause takes hold before the next cycle and a stop is observed within one
//! [`PAUSE_POLL`] even when the worker is paused. The worker itself moves the
//! state from `Stopping` to `Stopped` once it has closed its connection.

mod worker;

use std::sync::Arc;
use std::time::Duration;

use jw_adapters::BackendConnector;
use jw_core::{AgentHealth, AgentState, AgentStatus, Clock};
use jw_storage::{CatalogLoader, SnapshotStore, TrackStateStore};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ControlError;
use worker::PollWorker;

/// Age after which the catalog is reloaded at the start of a cycle.
pub const CATALOG_STALE_AFTER: Duration = Duration::from_secs(60);

/// How often a paused worker re-checks its state.
pub const PAUSE_POLL: Duration = Duration::from_millis(250);

/// Default time between cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Where the agent reads and writes, and how often.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub catalog: CatalogLoader,
    pub track_state: TrackStateStore,
    pub snapshot: SnapshotStore,
    pub poll_interval: Duration,
    /// Backend system id, copied into snapshot meta
    pub system: String,
    /// Backend client, copied into snapshot meta
    pub client: String,
}

impl AgentConfig {
    pub fn new(catalog: CatalogLoader, track_state: TrackStateStore, snapshot: SnapshotStore) -> Self {
        Self {
            catalog,
            track_state,
            snapshot,
            poll_interval: DEFAULT_POLL_INTERVAL,
            system: String::new(),
            client: String::new(),
        }
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn backend_identity(mut self, system: impl Into<String>, client: impl Into<String>) -> Self {
        self.system = system.into();
        self.client = client.into();
        self
    }
}

/// Owns the background polling loop.
///
/// Control methods are synchronous and return as soon as the new state is
/// published; `start` must be called inside a tokio runtime.
pub struct AgentController<K: BackendConnector, C: Clock> {
    connector: K,
    clock: C,
    config: AgentConfig,
    state: Arc<watch::Sender<AgentState>>,
    health: Arc<Mutex<AgentHealth>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<K: BackendConnector, C: Clock> AgentController<K, C> {
    pub fn new(connector: K, clock: C, config: AgentConfig) -> Self {
        let (state, _) = watch::channel(AgentState::Idle);
        Self {
            connector,
            clock,
            config,
            state: Arc::new(state),
            health: Arc::new(Mutex::new(AgentHealth::default())),
            task: Mutex::new(None),
        }
    }

    pub fn state(&self) -> AgentState {
        *self.state.borrow()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<AgentState> {
        self.state.subscribe()
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus {
            state: self.state(),
            poll_interval_sec: self.config.poll_interval.as_secs(),
            health: self.health.lock().clone(),
        }
    }

    /// `Idle|Stopped → Running`, spawning the loop. Clears a pause; a no-op
    /// while already running.
    pub fn start(&self) -> Result<(), ControlError> {
        let mut task = self.task.lock();
        match self.state() {
            AgentState::Running => Ok(()),
            AgentState::Paused => {
                self.transition(AgentState::Running);
                Ok(())
            }
            AgentState::Stopping => Err(ControlError::Stopping),
            AgentState::Idle | AgentState::Stopped => {
                self.transition(AgentState::Running);
                let worker = PollWorker::new(
                    self.connector.clone(),
                    self.clock.clone(),
                    self.config.clone(),
                    Arc::clone(&self.state),
                    Arc::clone(&self.health),
                );
                *task = Some(tokio::spawn(worker.run(self.state.subscribe())));
                Ok(())
            }
        }
    }

    /// `Running → Paused`. A cycle already in flight completes first.
    pub fn pause(&self) -> Result<(), ControlError> {
        let _task = self.task.lock();
        match self.state() {
            AgentState::Running => {
                self.transition(AgentState::Paused);
                Ok(())
            }
            AgentState::Paused => Ok(()),
            other => Err(ControlError::NotRunning(other)),
        }
    }

    /// `Paused → Running`. A no-op while already running.
    pub fn resume(&self) -> Result<(), ControlError> {
        let _task = self.task.lock();
        match self.state() {
            AgentState::Paused => {
                self.transition(AgentState::Running);
                Ok(())
            }
            AgentState::Running => Ok(()),
            other => Err(ControlError::NotRunning(other)),
        }
    }

    /// Any state `→ Stopping → Stopped`. Never fails.
    ///
    /// Without a live loop the agent goes straight to `Stopped`; otherwise the
    /// loop finishes its current cycle, tears down its connection and marks
    /// itself stopped. Use [`join`](Self::join) to wait for that.
    pub fn stop(&self) {
        let task = self.task.lock();
        match self.state() {
            AgentState::Running | AgentState::Paused => {
                let live = task.as_ref().is_some_and(|handle| !handle.is_finished());
                if live {
                    self.transition(AgentState::Stopping);
                } else {
                    self.transition(AgentState::Stopped);
                }
            }
            AgentState::Idle => self.transition(AgentState::Stopped),
            AgentState::Stopping | AgentState::Stopped => {}
        }
    }

    /// Wait for the background loop, if any, to exit.
    pub async fn join(&self) {
        let handle = self.task.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "polling loop task failed");
                self.state.send_replace(AgentState::Stopped);
            }
        }
    }

    fn transition(&self, next: AgentState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::info!(from = %previous, to = %next, "agent state changed");
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
