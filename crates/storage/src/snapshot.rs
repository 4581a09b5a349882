// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The published job snapshot.

use std::path::{Path, PathBuf};

use jw_core::Snapshot;

use crate::json_store::{read_json, write_json_atomic, StoreError};

/// Handle on `job_snapshot.json`.
///
/// The agent is the only writer. Every publish replaces the whole document
/// atomically, so the dashboard never reads a torn snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the snapshot on disk.
    pub fn publish(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        write_json_atomic(&self.path, snapshot)?;
        tracing::debug!(
            path = %self.path.display(),
            jobs = snapshot.jobs.len(),
            generated_at = %snapshot.meta.generated_at,
            "published snapshot"
        );
        Ok(())
    }

    /// Current snapshot, or an empty one when nothing has been published yet.
    pub fn load(&self) -> Snapshot {
        read_json(&self.path, Snapshot::default())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
