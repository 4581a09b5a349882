// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Track-state overlay: the user's per-job "keep watching this" switch.
//!
//! The overlay sits on top of the catalog's own `enabled` flag. A job that
//! has no entry is tracked; only an explicit `false` opts it out. Entries for
//! jobs that have since left the catalog are kept and ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{JobCatalogRow, TrackedJob};

/// Mapping of job name to "tracked by user".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackState(BTreeMap<String, bool>);

impl TrackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `job_name` is tracked, defaulting to `true` when absent.
    pub fn is_tracked(&self, job_name: &str) -> bool {
        self.0.get(job_name).copied().unwrap_or(true)
    }

    /// Explicit entry for `job_name`, if any.
    pub fn get(&self, job_name: &str) -> Option<bool> {
        self.0.get(job_name).copied()
    }

    pub fn set(&mut self, job_name: impl Into<String>, tracked: bool) {
        self.0.insert(job_name.into(), tracked);
    }

    /// Apply a batch of edits. Blank job names are ignored.
    pub fn apply<'a, I>(&mut self, edits: I) -> usize
    where
        I: IntoIterator<Item = &'a TrackEdit>,
    {
        let mut applied = 0;
        for edit in edits {
            let name = edit.job_name.trim();
            if name.is_empty() {
                continue;
            }
            self.set(name, edit.tracked);
            applied += 1;
        }
        applied
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for TrackState {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A single user toggle of the `tracked` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEdit {
    pub job_name: String,
    pub tracked: bool,
}

impl TrackEdit {
    pub fn new(job_name: impl Into<String>, tracked: bool) -> Self {
        Self { job_name: job_name.into(), tracked }
    }
}

/// Select the jobs to poll this cycle.
///
/// A row is included iff it is enabled in the catalog and the overlay does
/// not opt it out. Output order follows catalog order.
pub fn reconcile(catalog: &[JobCatalogRow], overlay: &TrackState) -> Vec<TrackedJob> {
    catalog
        .iter()
        .filter(|row| row.enabled && overlay.is_tracked(&row.job_name))
        .map(TrackedJob::from)
        .collect()
}

#[cfg(test)]
#[path = "track_tests.rs"]
mod tests;
