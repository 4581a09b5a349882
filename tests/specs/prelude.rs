// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the specs.

pub use std::path::{Path, PathBuf};
pub use std::time::Duration;

pub use jw_core::{AgentState, JobStatus, Snapshot, TrackEdit};
pub use jw_dashboard::Dashboard;
pub use jw_storage::{SnapshotStore, TrackStateStore};
pub use tempfile::TempDir;

use jw_adapters::export::ExportResponse;

/// A state directory with a catalog and nothing else.
pub struct StateDir {
    pub dir: TempDir,
}

impl StateDir {
    pub fn with_catalog(catalog_toml: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jobs.toml"), catalog_toml).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn catalog(&self) -> PathBuf {
        self.path().join("jobs.toml")
    }

    pub fn snapshot_store(&self) -> SnapshotStore {
        SnapshotStore::new(self.path().join("job_snapshot.json"))
    }

    pub fn track_state_store(&self) -> TrackStateStore {
        TrackStateStore::new(self.path().join("track_state.json"))
    }

    pub fn dashboard(&self) -> Dashboard {
        let mut dashboard = Dashboard::new(self.snapshot_store(), self.track_state_store());
        dashboard.refresh();
        dashboard
    }
}

/// Two finance jobs, one disabled, with expected durations.
pub const FINANCE_CATALOG: &str = r#"
[[jobs]]
job_name = "Z_FI_01"
job_user = "BATCH"
expected_duration_sec = 300

[[jobs]]
job_name = "Z_FI_02"
job_user = "BATCH"
enabled = "N"

[[jobs]]
job_name = "Z_MM_01"
job_user = "BATCH"
expected_duration_sec = "600"
"#;

/// Backend document: Z_FI_01 running late with steps, Z_MM_01 finished.
pub fn finance_response_json() -> serde_json::Value {
    serde_json::json!({
        "ET_JOBS": [
            {
                "JOBNAME": "Z_FI_01", "JOBCOUNT": "08301500", "SDLUNAME": "BATCH",
                "STATUS": "R", "STATUS_TXT": "Active",
                "STRTDATE": "20260221", "STRTTIME": "143000",
                "RUNTIME_SEC": "500", "CURRENT_STEP_NO": 2, "CURRENT_STEP_TXT": "RFBIBL00",
                "MSG": ""
            },
            {
                "JOBNAME": "Z_MM_01", "JOBCOUNT": "07000100", "SDLUNAME": "BATCH",
                "STATUS": "F", "STATUS_TXT": "",
                "STRTDATE": "20260221", "STRTTIME": "070001",
                "ENDDATE": "20260221", "ENDTIME": "071001",
                "RUNTIME_SEC": 600, "MSG": "Job finished"
            }
        ],
        "ET_STEPS": [
            { "JOBNAME": "Z_FI_01", "JOBCOUNT": "08301500", "STEPCNT": "1",
              "PROGNAME": "RFBIBL01", "STEP_STATUS": "F" },
            { "JOBNAME": "Z_FI_01", "JOBCOUNT": "08301500", "STEPCNT": "2",
              "PROGNAME": "RFBIBL00", "STEP_STATUS": "R" }
        ]
    })
}

pub fn finance_response() -> ExportResponse {
    serde_json::from_value(finance_response_json()).unwrap()
}
