// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job catalog rows and the per-cycle tracked job list.

use serde::{Deserialize, Serialize};

/// One monitorable job from the administrator-maintained catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCatalogRow {
    /// Trimmed, non-empty job name; the catalog key
    pub job_name: String,
    #[serde(default)]
    pub job_user: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub expected_duration_sec: u64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl JobCatalogRow {
    /// A row with defaults for every optional column.
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            job_user: String::new(),
            group: String::new(),
            expected_duration_sec: 0,
            enabled: true,
        }
    }
}

crate::builder! {
    pub struct JobCatalogRowBuilder => JobCatalogRow {
        into {
            job_name: String = "Z_TEST_JOB",
            job_user: String = "",
            group: String = "",
        }
        set {
            expected_duration_sec: u64 = 0,
            enabled: bool = true,
        }
    }
}

/// A job selected for the current poll cycle.
///
/// Derived fresh each cycle from the catalog and the track-state overlay;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedJob {
    pub job_name: String,
    pub job_user: String,
    pub expected_duration_sec: u64,
}

impl From<&JobCatalogRow> for TrackedJob {
    fn from(row: &JobCatalogRow) -> Self {
        Self {
            job_name: row.job_name.clone(),
            job_user: row.job_user.clone(),
            expected_duration_sec: row.expected_duration_sec,
        }
    }
}
