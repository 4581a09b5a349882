// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The background polling loop and its cycle body.

use std::sync::Arc;
use std::time::Instant;

use jw_adapters::{BackendConnector, JobBackend};
use jw_core::{
    reconcile, AgentHealth, AgentState, Clock, JobCatalogRow, JobStatusRecord, Snapshot,
    SnapshotMeta, TrackedJob,
};
use parking_lot::Mutex;
use tokio::sync::watch;

use super::{AgentConfig, CATALOG_STALE_AFTER, PAUSE_POLL};
use crate::error::CycleError;
use crate::fetch::fetch;

/// What one successful cycle published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CycleReport {
    pub generated_at: String,
    pub tracked: usize,
    pub published: usize,
    /// Non-fatal problem met along the way (stale catalog kept)
    pub warning: Option<String>,
}

pub(crate) struct PollWorker<K: BackendConnector, C: Clock> {
    connector: K,
    clock: C,
    config: AgentConfig,
    state: Arc<watch::Sender<AgentState>>,
    health: Arc<Mutex<AgentHealth>>,
    catalog: Option<Vec<JobCatalogRow>>,
    catalog_loaded_at: Option<Instant>,
    /// Opened on first use and kept across cycles; dropped after a failed call
    backend: Option<K::Backend>,
}

impl<K: BackendConnector, C: Clock> PollWorker<K, C> {
    pub(crate) fn new(
        connector: K,
        clock: C,
        config: AgentConfig,
        state: Arc<watch::Sender<AgentState>>,
        health: Arc<Mutex<AgentHealth>>,
    ) -> Self {
        Self {
            connector,
            clock,
            config,
            state,
            health,
            catalog: None,
            catalog_loaded_at: None,
            backend: None,
        }
    }

    pub(crate) async fn run(mut self, mut rx: watch::Receiver<AgentState>) {
        tracing::info!(
            poll_interval_sec = self.config.poll_interval.as_secs(),
            catalog = %self.config.catalog.path().display(),
            "polling loop started"
        );

        loop {
            let state = *rx.borrow_and_update();
            match state {
                AgentState::Running => {}
                AgentState::Paused => {
                    let _ = tokio::time::timeout(PAUSE_POLL, rx.changed()).await;
                    continue;
                }
                AgentState::Idle | AgentState::Stopping | AgentState::Stopped => break,
            }

            self.cycle().await;

            // Sleep out the interval, waking early on pause or stop
            let _ = tokio::time::timeout(self.config.poll_interval, rx.changed()).await;
        }

        self.teardown().await;
        let previous = self.state.send_replace(AgentState::Stopped);
        tracing::info!(from = %previous, "polling loop stopped");
    }

    /// Run one cycle and record its outcome in the shared health.
    async fn cycle(&mut self) {
        match self.run_cycle().await {
            Ok(report) => {
                tracing::info!(
                    tracked = report.tracked,
                    published = report.published,
                    "poll cycle complete"
                );
                let mut health = self.health.lock();
                health.cycles_completed += 1;
                health.last_cycle_at = Some(report.generated_at);
                health.tracked_job_count = report.tracked;
                health.last_error = report.warning;
            }
            Err(e) => {
                tracing::warn!(error = %e, "poll cycle failed");
                let mut health = self.health.lock();
                health.cycles_failed += 1;
                health.last_error = Some(e.to_string());
            }
        }
    }

    /// Catalog check, overlay read, reconcile, fetch, publish.
    pub(crate) async fn run_cycle(&mut self) -> Result<CycleReport, CycleError> {
        let warning = self.refresh_catalog()?;

        let overlay = self.config.track_state.load();
        let tracked = reconcile(self.catalog.as_deref().unwrap_or_default(), &overlay);

        let jobs = if tracked.is_empty() {
            tracing::debug!("no tracked jobs, skipping backend call");
            Vec::new()
        } else {
            self.fetch(&tracked).await?
        };

        let generated_at = self.clock.wall().to_rfc3339();
        let snapshot = Snapshot {
            meta: SnapshotMeta {
                system: self.config.system.clone(),
                client: self.config.client.clone(),
                generated_at: generated_at.clone(),
                poll_interval_sec: self.config.poll_interval.as_secs(),
                tracked_job_count: tracked.len(),
            },
            jobs,
        };
        self.config.snapshot.publish(&snapshot)?;

        Ok(CycleReport {
            generated_at,
            tracked: tracked.len(),
            published: snapshot.jobs.len(),
            warning,
        })
    }

    /// Reload the catalog once it is older than [`CATALOG_STALE_AFTER`].
    ///
    /// A failed reload keeps the previous catalog and is retried next cycle;
    /// without any previous catalog the cycle fails.
    fn refresh_catalog(&mut self) -> Result<Option<String>, CycleError> {
        let now = self.clock.now();
        let stale = match self.catalog_loaded_at {
            Some(loaded_at) => now.duration_since(loaded_at) > CATALOG_STALE_AFTER,
            None => true,
        };
        if !stale {
            return Ok(None);
        }

        match self.config.catalog.load() {
            Ok(rows) => {
                tracing::info!(rows = rows.len(), "catalog loaded");
                self.catalog = Some(rows);
                self.catalog_loaded_at = Some(now);
                Ok(None)
            }
            Err(e) if self.catalog.is_some() => {
                tracing::warn!(error = %e, "catalog reload failed, keeping previous catalog");
                Ok(Some(format!("catalog reload failed: {e}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch(&mut self, tracked: &[TrackedJob]) -> Result<Vec<JobStatusRecord>, CycleError> {
        let backend = match self.backend.take() {
            Some(backend) => backend,
            None => {
                let backend = self.connector.connect().await?;
                tracing::info!("backend connected");
                backend
            }
        };

        match fetch(&backend, tracked).await {
            Ok(records) => {
                self.backend = Some(backend);
                Ok(records)
            }
            Err(e) => {
                // Reconnect next cycle
                close_quietly(&backend).await;
                Err(e.into())
            }
        }
    }

    async fn teardown(&mut self) {
        if let Some(backend) = self.backend.take() {
            close_quietly(&backend).await;
            tracing::info!("backend connection closed");
        }
    }

    #[cfg(test)]
    pub(crate) fn is_connected(&self) -> bool {
        self.backend.is_some()
    }
}

async fn close_quietly<B: JobBackend>(backend: &B) {
    if let Err(e) = backend.close().await {
        tracing::debug!(error = %e, "ignoring backend close failure");
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
