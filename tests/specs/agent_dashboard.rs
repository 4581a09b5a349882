// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent and dashboard specs
//!
//! The polling agent and the dashboard share nothing but the snapshot and
//! track-state files. These specs drive the agent in virtual time against a
//! fake backend and read the results back the way the dashboard does.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use jw_adapters::FakeConnector;
use jw_core::{AgentStatus, FakeClock, StepInfo};
use jw_engine::{AgentConfig, AgentController};
use jw_storage::CatalogLoader;

use crate::prelude::*;

type Agent = AgentController<FakeConnector, FakeClock>;

fn agent_for(state: &StateDir, connector: &FakeConnector) -> Agent {
    let config = AgentConfig::new(
        CatalogLoader::new(state.catalog()),
        state.track_state_store(),
        state.snapshot_store(),
    )
    .poll_interval(Duration::from_secs(30))
    .backend_identity("SMP", "100");
    AgentController::new(connector.clone(), FakeClock::new(), config)
}

async fn wait_until(agent: &Agent, done: impl Fn(&AgentStatus) -> bool) {
    for _ in 0..10_000 {
        if done(&agent.status()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("condition not reached; status: {:?}", agent.status());
}

async fn stop(agent: &Agent) {
    agent.stop();
    agent.join().await;
    assert_eq!(agent.state(), AgentState::Stopped);
}

fn job_names(snapshot: &Snapshot) -> Vec<&str> {
    snapshot.jobs.iter().map(|j| j.job_name.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn first_cycle_publishes_what_the_dashboard_shows() {
    let state = StateDir::with_catalog(FINANCE_CATALOG);
    let connector = FakeConnector::new();
    connector.set_response(finance_response());
    let agent = agent_for(&state, &connector);

    agent.start().unwrap();
    wait_until(&agent, |s| s.health.cycles_completed >= 1).await;
    stop(&agent).await;

    let dashboard = state.dashboard();
    let snapshot = dashboard.snapshot();
    assert_eq!(snapshot.meta.system, "SMP");
    assert_eq!(snapshot.meta.client, "100");
    assert_eq!(snapshot.meta.poll_interval_sec, 30);
    assert_eq!(snapshot.meta.tracked_job_count, 2, "Z_FI_02 is disabled in the catalog");
    assert_eq!(job_names(snapshot), vec!["Z_FI_01", "Z_MM_01"]);

    let late = &dashboard.rows()[0];
    assert!(late.tracked);
    assert_eq!(late.record.status, JobStatus::Running);
    assert_eq!(late.record.raw_status, "R");
    assert_eq!(late.record.job_count, "08301500");
    assert_eq!(late.record.last_start.as_deref(), Some("2026-02-21T14:30:00"));
    assert_eq!(late.record.runtime_sec, Some(500));
    assert_eq!(late.record.expected_duration_sec, 300);
    assert_eq!(late.record.late_by_sec, 200);
    assert_eq!(late.record.current_step, "Step 2 - RFBIBL00");
    similar_asserts::assert_eq!(
        late.record.steps,
        vec![
            StepInfo {
                step_no: 1,
                step_type: "ABAP".to_string(),
                name: "RFBIBL01".to_string(),
                variant: String::new(),
                status: "F".to_string(),
            },
            StepInfo {
                step_no: 2,
                step_type: "ABAP".to_string(),
                name: "RFBIBL00".to_string(),
                variant: String::new(),
                status: "R".to_string(),
            },
        ]
    );

    let done = &dashboard.rows()[1];
    assert_eq!(done.record.status, JobStatus::Ok);
    assert_eq!(done.record.expected_duration_sec, 600);
    assert_eq!(done.record.late_by_sec, 0);
    assert_eq!(done.record.last_end.as_deref(), Some("2026-02-21T07:10:01"));
    assert_eq!(done.record.last_message, "Job finished");

    let detail = dashboard.job_detail("Z_FI_01").unwrap();
    assert_eq!(detail.step_lines(), vec!["Step 1 - RFBIBL01 (F)", "Step 2 - RFBIBL00 (R)"]);
}

#[tokio::test(start_paused = true)]
async fn untracking_from_the_dashboard_applies_at_the_next_cycle() {
    let state = StateDir::with_catalog(FINANCE_CATALOG);
    let connector = FakeConnector::new();
    connector.set_response(finance_response());
    let agent = agent_for(&state, &connector);

    agent.start().unwrap();
    wait_until(&agent, |s| s.health.cycles_completed >= 1).await;

    let mut dashboard = state.dashboard();
    dashboard.submit_track_edits(&[TrackEdit::new("Z_FI_01", false)]).unwrap();
    // The edit shows up immediately, before the agent has seen it
    assert!(!dashboard.rows()[0].tracked);

    wait_until(&agent, |s| s.health.cycles_completed >= 2).await;
    stop(&agent).await;

    dashboard.refresh();
    assert_eq!(job_names(dashboard.snapshot()), vec!["Z_MM_01"]);
    assert_eq!(dashboard.snapshot().meta.tracked_job_count, 1);
    assert_eq!(dashboard.overlay().get("Z_FI_01"), Some(false));

    let calls = connector.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].selects("Z_FI_01"));
    assert!(!calls[1].selects("Z_FI_01"));
    assert_eq!(connector.connects(), 1, "one connection is reused across cycles");
}

#[tokio::test(start_paused = true)]
async fn nothing_tracked_means_no_backend_call() {
    let state = StateDir::with_catalog(
        r#"
[[jobs]]
job_name = "Z_FI_01"
expected_duration_sec = 300

[[jobs]]
job_name = "Z_FI_02"
enabled = false
"#,
    );
    let mut dashboard = state.dashboard();
    dashboard.submit_track_edits(&[TrackEdit::new("Z_FI_01", false)]).unwrap();
    let connector = FakeConnector::new();
    let agent = agent_for(&state, &connector);

    agent.start().unwrap();
    wait_until(&agent, |s| s.health.cycles_completed >= 1).await;
    stop(&agent).await;

    dashboard.refresh();
    assert!(dashboard.snapshot().jobs.is_empty());
    assert_eq!(dashboard.snapshot().meta.tracked_job_count, 0);
    assert!(!dashboard.snapshot().meta.generated_at.is_empty());
    assert_eq!(connector.connects(), 0);
    assert!(connector.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_keeps_the_previous_snapshot() {
    let state = StateDir::with_catalog(FINANCE_CATALOG);
    let connector = FakeConnector::new();
    connector.set_response(finance_response());
    let agent = agent_for(&state, &connector);

    agent.start().unwrap();
    wait_until(&agent, |s| s.health.cycles_completed >= 1).await;
    let before = std::fs::read_to_string(state.snapshot_store().path()).unwrap();

    connector.fail_next_call("RFC_COMMUNICATION_FAILURE");
    wait_until(&agent, |s| s.health.cycles_failed >= 1).await;

    let after = std::fs::read_to_string(state.snapshot_store().path()).unwrap();
    assert_eq!(before, after);
    let status = agent.status();
    assert_eq!(status.state, AgentState::Running, "a failed cycle does not end the loop");
    assert!(status.health.last_error.unwrap().contains("RFC_COMMUNICATION_FAILURE"));

    wait_until(&agent, |s| s.health.cycles_completed >= 2).await;
    assert_eq!(connector.connects(), 2, "the failed connection is replaced");
    stop(&agent).await;
}

#[tokio::test(start_paused = true)]
async fn readers_never_see_a_partial_snapshot() {
    let state = StateDir::with_catalog(FINANCE_CATALOG);
    let connector = FakeConnector::new();
    connector.set_response(finance_response());
    let agent = agent_for(&state, &connector);

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let path = state.snapshot_store().path().to_path_buf();
        let done = Arc::clone(&done);
        std::thread::spawn(move || {
            let mut reads = 0usize;
            while !done.load(Ordering::Relaxed) {
                if let Ok(text) = std::fs::read_to_string(&path) {
                    let parsed: Result<Snapshot, _> = serde_json::from_str(&text);
                    assert!(parsed.is_ok(), "partial snapshot observed: {text:?}");
                    reads += 1;
                }
            }
            reads
        })
    };

    agent.start().unwrap();
    wait_until(&agent, |s| s.health.cycles_completed >= 25).await;
    stop(&agent).await;

    done.store(true, Ordering::Relaxed);
    reader.join().unwrap();
    assert_eq!(state.dashboard().snapshot().jobs.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn pause_and_stop_are_prompt() {
    let state = StateDir::with_catalog(FINANCE_CATALOG);
    let connector = FakeConnector::new();
    connector.set_response(finance_response());
    let agent = agent_for(&state, &connector);

    agent.start().unwrap();
    wait_until(&agent, |s| s.health.cycles_completed >= 1).await;
    agent.pause().unwrap();
    agent.pause().unwrap();
    assert_eq!(agent.state(), AgentState::Paused);

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(agent.status().health.cycles_completed, 1, "no cycles while paused");

    let started = tokio::time::Instant::now();
    stop(&agent).await;
    assert!(started.elapsed() <= Duration::from_secs(1));
}
