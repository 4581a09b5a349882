// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{JobCatalogRow, JobStatus, JobStatusRecord, Snapshot, SnapshotMeta};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core model types.
pub mod strategies {
    use crate::record::JobStatus;
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        proptest::sample::select(JobStatus::ALL.to_vec())
    }
}

// ── Fixture factories ───────────────────────────────────────────────────

/// Catalog row with the given name, enabled flag and expected duration.
pub fn catalog_row(name: &str, enabled: bool, expected_duration_sec: u64) -> JobCatalogRow {
    JobCatalogRow::builder()
        .job_name(name)
        .job_user("BATCH")
        .enabled(enabled)
        .expected_duration_sec(expected_duration_sec)
        .build()
}

/// Minimal status record for `name` in `status`.
pub fn status_record(name: &str, status: JobStatus) -> JobStatusRecord {
    JobStatusRecord::builder().job_name(name).status(status).build()
}

/// Snapshot containing the given records.
pub fn snapshot_with(jobs: Vec<JobStatusRecord>) -> Snapshot {
    Snapshot {
        meta: SnapshotMeta {
            system: "SMP".to_string(),
            client: "100".to_string(),
            generated_at: "2026-02-21T08:00:00+00:00".to_string(),
            poll_interval_sec: 30,
            tracked_job_count: jobs.len(),
        },
        jobs,
    }
}
