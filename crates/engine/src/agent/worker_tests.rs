// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_adapters::{ExportResponse, FakeConnector};
use jw_core::{FakeClock, JobStatus, TrackEdit, TrackState};
use jw_storage::{CatalogLoader, SnapshotStore, TrackStateStore};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;

const CATALOG: &str = r#"
[[jobs]]
job_name = "Z_FI_01"
job_user = "BATCH_FI"
expected_duration_sec = 300

[[jobs]]
job_name = "Z_FI_02"
enabled = "N"

[[jobs]]
job_name = "Z_MM_01"
"#;

struct Fixture {
    dir: TempDir,
    connector: FakeConnector,
    clock: FakeClock,
    config: AgentConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jobs.toml"), CATALOG).unwrap();
        let config = AgentConfig::new(
            CatalogLoader::new(dir.path().join("jobs.toml")),
            TrackStateStore::new(dir.path().join("track_state.json")),
            SnapshotStore::new(dir.path().join("job_snapshot.json")),
        )
        .backend_identity("SMP", "100");

        let connector = FakeConnector::new();
        connector.set_response(
            serde_json::from_value::<ExportResponse>(json!({
                "ET_JOBS": [
                    {"JOBNAME": "Z_FI_01", "JOBCOUNT": "1", "STATUS_TXT": "ACTIVE", "RUNTIME_SEC": 500},
                    {"JOBNAME": "Z_MM_01", "JOBCOUNT": "2", "STATUS": "F"}
                ]
            }))
            .unwrap(),
        );

        Self { dir, connector, clock: FakeClock::new(), config }
    }

    fn worker(&self) -> PollWorker<FakeConnector, FakeClock> {
        let (state, _) = watch::channel(AgentState::Running);
        PollWorker::new(
            self.connector.clone(),
            self.clock.clone(),
            self.config.clone(),
            Arc::new(state),
            Arc::new(Mutex::new(AgentHealth::default())),
        )
    }

    fn write_catalog(&self, content: &str) {
        std::fs::write(self.dir.path().join("jobs.toml"), content).unwrap();
    }

    fn snapshot(&self) -> Snapshot {
        self.config.snapshot.load()
    }
}

#[tokio::test]
async fn cycle_publishes_snapshot_for_tracked_jobs() {
    let fx = Fixture::new();
    let mut worker = fx.worker();

    let report = worker.run_cycle().await.unwrap();

    assert_eq!(report.tracked, 2);
    assert_eq!(report.published, 2);
    assert_eq!(report.warning, None);

    let snapshot = fx.snapshot();
    assert_eq!(snapshot.meta.system, "SMP");
    assert_eq!(snapshot.meta.client, "100");
    assert_eq!(snapshot.meta.poll_interval_sec, 30);
    assert_eq!(snapshot.meta.tracked_job_count, 2);
    assert_eq!(snapshot.meta.generated_at, fx.clock.wall().to_rfc3339());
    assert_eq!(report.generated_at, snapshot.meta.generated_at);

    let fi = &snapshot.jobs[0];
    assert_eq!(fi.job_name, "Z_FI_01");
    assert_eq!(fi.status, JobStatus::Running);
    assert_eq!(fi.late_by_sec, 200);
    assert_eq!(snapshot.jobs[1].status, JobStatus::Ok);

    let calls = fx.connector.calls();
    assert_eq!(calls.len(), 1);
    let requested: Vec<_> = calls[0].filters.iter().map(|f| f.job_name.as_str()).collect();
    assert_eq!(requested, ["Z_FI_01", "Z_MM_01"]);
}

#[tokio::test]
async fn overlay_is_reread_every_cycle() {
    let fx = Fixture::new();
    let mut worker = fx.worker();
    worker.run_cycle().await.unwrap();

    let mut overlay = TrackState::new();
    overlay.apply(&[TrackEdit::new("Z_FI_01", false)]);
    fx.config.track_state.save(&overlay).unwrap();

    let report = worker.run_cycle().await.unwrap();
    assert_eq!(report.tracked, 1);
    let names: Vec<_> = fx.snapshot().jobs.into_iter().map(|j| j.job_name).collect();
    assert_eq!(names, ["Z_MM_01"]);
}

#[tokio::test]
async fn empty_tracked_list_skips_backend_and_publishes_empty_snapshot() {
    let fx = Fixture::new();
    fx.config
        .track_state
        .save(&[("Z_FI_01", false), ("Z_MM_01", false)].into_iter().collect())
        .unwrap();
    let mut worker = fx.worker();

    let report = worker.run_cycle().await.unwrap();

    assert_eq!(report.tracked, 0);
    assert_eq!(fx.connector.connects(), 0);
    assert!(fx.connector.calls().is_empty());
    let snapshot = fx.snapshot();
    assert!(snapshot.is_published());
    assert!(snapshot.jobs.is_empty());
    assert_eq!(snapshot.meta.tracked_job_count, 0);
}

#[tokio::test]
async fn catalog_reloads_only_after_it_goes_stale() {
    let fx = Fixture::new();
    let mut worker = fx.worker();
    worker.run_cycle().await.unwrap();

    fx.write_catalog("[[jobs]]\njob_name = \"Z_NEW\"\n");
    fx.clock.advance(Duration::from_secs(30));
    assert_eq!(worker.run_cycle().await.unwrap().tracked, 2);

    fx.clock.advance(Duration::from_secs(31));
    assert_eq!(worker.run_cycle().await.unwrap().tracked, 1);
    assert_eq!(fx.snapshot().meta.tracked_job_count, 1);
}

#[tokio::test]
async fn missing_catalog_fails_cycle_without_writing() {
    let fx = Fixture::new();
    std::fs::remove_file(fx.dir.path().join("jobs.toml")).unwrap();
    let mut worker = fx.worker();

    let err = worker.run_cycle().await.unwrap_err();

    assert!(matches!(err, CycleError::Catalog(_)));
    assert!(!fx.snapshot().is_published());
}

#[tokio::test]
async fn failed_reload_keeps_previous_catalog() {
    let fx = Fixture::new();
    let mut worker = fx.worker();
    worker.run_cycle().await.unwrap();

    fx.write_catalog("[[jobs]\nbroken");
    fx.clock.advance(Duration::from_secs(61));
    let report = worker.run_cycle().await.unwrap();

    assert_eq!(report.tracked, 2);
    assert!(report.warning.unwrap().starts_with("catalog reload failed"));

    // Retried on the very next cycle once fixed
    fx.write_catalog("[[jobs]]\njob_name = \"Z_FIXED\"\n");
    let report = worker.run_cycle().await.unwrap();
    assert_eq!(report.tracked, 1);
    assert_eq!(report.warning, None);
}

#[tokio::test]
async fn connection_is_reused_across_cycles() {
    let fx = Fixture::new();
    let mut worker = fx.worker();
    worker.run_cycle().await.unwrap();
    worker.run_cycle().await.unwrap();
    worker.run_cycle().await.unwrap();

    assert_eq!(fx.connector.connects(), 1);
    assert_eq!(fx.connector.calls().len(), 3);
    assert!(worker.is_connected());
}

#[tokio::test]
async fn failed_call_keeps_old_snapshot_and_reconnects() {
    let fx = Fixture::new();
    let mut worker = fx.worker();
    worker.run_cycle().await.unwrap();
    let before = fx.snapshot();

    fx.connector.fail_next_call("RFC_COMMUNICATION_FAILURE");
    fx.clock.advance(Duration::from_secs(30));
    let err = worker.run_cycle().await.unwrap_err();

    assert!(matches!(err, CycleError::Backend(_)));
    assert!(!worker.is_connected());
    assert_eq!(fx.snapshot(), before);

    worker.run_cycle().await.unwrap();
    assert_eq!(fx.connector.connects(), 2);
}

#[tokio::test]
async fn failed_connect_fails_cycle() {
    let fx = Fixture::new();
    fx.connector.fail_next_connect("logon failed");
    let mut worker = fx.worker();

    let err = worker.run_cycle().await.unwrap_err();
    assert!(matches!(err, CycleError::Backend(_)));
    assert!(worker.run_cycle().await.is_ok());
}

#[tokio::test]
async fn teardown_swallows_close_failure() {
    let fx = Fixture::new();
    let mut worker = fx.worker();
    worker.run_cycle().await.unwrap();
    fx.connector.set_fail_close(true);

    worker.teardown().await;

    assert_eq!(fx.connector.closes(), 1);
    assert!(!worker.is_connected());
}
