// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The snapshot document published once per poll cycle.

use serde::{Deserialize, Serialize};

use crate::record::JobStatusRecord;

/// Identity and timing of the cycle that produced a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotMeta {
    pub system: String,
    pub client: String,
    /// RFC 3339 timestamp with local offset
    pub generated_at: String,
    pub poll_interval_sec: u64,
    pub tracked_job_count: usize,
}

/// Complete result of one poll cycle. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub jobs: Vec<JobStatusRecord>,
}

impl Snapshot {
    /// Whether any cycle has produced this snapshot yet.
    pub fn is_published(&self) -> bool {
        !self.meta.generated_at.is_empty()
    }
}
