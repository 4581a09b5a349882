// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence for the track-state overlay.

use std::path::{Path, PathBuf};

use jw_core::TrackState;

use crate::json_store::{read_json, write_json, StoreError};

/// Handle on `track_state.json`.
///
/// The dashboard writes, the agent reads once per cycle. Writes go straight
/// to the file; a reader that catches a torn write sees an empty overlay and
/// tracks everything for that one cycle.
#[derive(Debug, Clone)]
pub struct TrackStateStore {
    path: PathBuf,
}

impl TrackStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> TrackState {
        read_json(&self.path, TrackState::default())
    }

    pub fn save(&self, state: &TrackState) -> Result<(), StoreError> {
        write_json(&self.path, state)?;
        tracing::debug!(path = %self.path.display(), entries = state.len(), "saved track state");
        Ok(())
    }
}

#[cfg(test)]
#[path = "track_state_tests.rs"]
mod tests;
