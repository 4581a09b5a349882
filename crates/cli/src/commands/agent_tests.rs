// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jw_core::{AgentHealth, AgentState};
use serial_test::serial;
use yare::parameterized;

use super::*;

#[parameterized(
    start = { AgentCommand::Start, Request::AgentStart },
    pause = { AgentCommand::Pause, Request::AgentPause },
    resume = { AgentCommand::Resume, Request::AgentResume },
    stop = { AgentCommand::Stop, Request::AgentStop },
    status = { AgentCommand::Status, Request::AgentStatus },
)]
fn command_maps_to_request(command: AgentCommand, expected: Request) {
    assert_eq!(command.request(), expected);
}

#[test]
#[serial]
fn status_lines_for_fresh_agent() {
    std::env::set_var("NO_COLOR", "1");
    let status = AgentStatus { state: AgentState::Idle, poll_interval_sec: 30, ..Default::default() };

    assert_eq!(
        status_lines(&status),
        vec![
            "Agent: idle (poll every 30s)",
            "Cycles: 0 ok, 0 failed",
            "Last cycle: never",
            "Tracked jobs: 0",
        ]
    );
}

#[test]
#[serial]
fn status_lines_include_last_error() {
    std::env::set_var("NO_COLOR", "1");
    let status = AgentStatus {
        state: AgentState::Running,
        poll_interval_sec: 10,
        health: AgentHealth {
            cycles_completed: 4,
            cycles_failed: 1,
            last_cycle_at: Some("2026-02-21T08:00:00+00:00".to_string()),
            last_error: Some("backend error: connect failed".to_string()),
            tracked_job_count: 2,
        },
    };

    let lines = status_lines(&status);

    assert_eq!(lines[1], "Cycles: 4 ok, 1 failed");
    assert_eq!(lines[2], "Last cycle: 2026-02-21T08:00:00+00:00");
    assert_eq!(lines[4], "Last error: backend error: connect failed");
}

#[test]
fn not_running_maps_to_exit_error() {
    let err = not_running_or(ClientError::DaemonNotRunning);
    let exit = err.downcast_ref::<ExitError>().unwrap();
    assert_eq!(exit.code, crate::exit_error::EXIT_NOT_RUNNING);
}
