// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presented rows over the latest snapshot.

use std::time::Duration;

use jw_core::{JobStatusRecord, Snapshot, TrackEdit, TrackState};
use jw_storage::{SnapshotStore, StoreError, TrackStateStore};
use serde::Serialize;

use crate::filter::Filters;
use crate::view::{JobDetail, SummaryLine};

/// How often a live dashboard re-reads its files.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// A job status record plus the user's track switch for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentedRow {
    #[serde(flatten)]
    pub record: JobStatusRecord,
    pub tracked: bool,
}

/// Reader and presenter state for one dashboard session.
///
/// Never writes the snapshot. Writes the overlay only through
/// [`submit_track_edits`](Self::submit_track_edits).
pub struct Dashboard {
    snapshots: SnapshotStore,
    track_state: TrackStateStore,
    snapshot: Snapshot,
    overlay: TrackState,
    rows: Vec<PresentedRow>,
    pub filters: Filters,
}

impl Dashboard {
    /// A dashboard with nothing loaded yet; call [`refresh`](Self::refresh).
    pub fn new(snapshots: SnapshotStore, track_state: TrackStateStore) -> Self {
        Self {
            snapshots,
            track_state,
            snapshot: Snapshot::default(),
            overlay: TrackState::default(),
            rows: Vec::new(),
            filters: Filters::default(),
        }
    }

    /// Re-read the snapshot and the overlay and re-derive every row.
    pub fn refresh(&mut self) {
        self.snapshot = self.snapshots.load();
        self.overlay = self.track_state.load();
        self.derive_rows();
        tracing::debug!(
            rows = self.rows.len(),
            generated_at = %self.snapshot.meta.generated_at,
            "dashboard refreshed"
        );
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn overlay(&self) -> &TrackState {
        &self.overlay
    }

    /// All rows in snapshot order, unfiltered.
    pub fn rows(&self) -> &[PresentedRow] {
        &self.rows
    }

    /// Rows passing the current filters.
    pub fn visible_rows(&self) -> Vec<&PresentedRow> {
        self.rows.iter().filter(|row| self.filters.matches(row)).collect()
    }

    /// Persist a batch of track edits with a single overlay write.
    ///
    /// The overlay is re-read from disk first so edits made elsewhere since
    /// the last refresh survive. Returns the number of edits applied; an
    /// empty batch writes nothing.
    pub fn submit_track_edits(&mut self, edits: &[TrackEdit]) -> Result<usize, StoreError> {
        let mut overlay = self.track_state.load();
        let applied = overlay.apply(edits);
        if applied == 0 {
            return Ok(0);
        }
        self.track_state.save(&overlay)?;
        tracing::info!(applied, "track edits saved");

        self.overlay = overlay;
        self.derive_rows();
        Ok(applied)
    }

    pub fn summary(&self) -> SummaryLine {
        SummaryLine::from_meta(&self.snapshot.meta)
    }

    /// Detail view of the first row named `job_name`.
    pub fn job_detail(&self, job_name: &str) -> Option<JobDetail> {
        self.rows.iter().find(|row| row.record.job_name == job_name).map(JobDetail::from_row)
    }

    fn derive_rows(&mut self) {
        self.rows = self
            .snapshot
            .jobs
            .iter()
            .map(|record| PresentedRow {
                tracked: self.overlay.is_tracked(&record.job_name),
                record: record.clone(),
            })
            .collect();
    }
}

#[cfg(test)]
#[path = "presenter_tests.rs"]
mod tests;
