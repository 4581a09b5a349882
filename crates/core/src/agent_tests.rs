// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    idle = { AgentState::Idle, "idle", false },
    running = { AgentState::Running, "running", true },
    paused = { AgentState::Paused, "paused", true },
    stopping = { AgentState::Stopping, "stopping", true },
    stopped = { AgentState::Stopped, "stopped", false },
)]
fn state_display_and_activity(state: AgentState, text: &str, active: bool) {
    assert_eq!(state.to_string(), text);
    assert_eq!(state.is_active(), active);
    assert_eq!(serde_json::to_value(state).unwrap(), serde_json::json!(text));
}

#[test]
fn status_flattens_health() {
    let status = AgentStatus {
        state: AgentState::Running,
        poll_interval_sec: 30,
        health: AgentHealth {
            cycles_completed: 3,
            last_error: Some("call failed".to_string()),
            ..AgentHealth::default()
        },
    };
    let value = serde_json::to_value(&status).unwrap();
    assert_eq!(value["state"], "running");
    assert_eq!(value["cycles_completed"], 3);
    assert_eq!(value["last_error"], "call failed");

    let back: AgentStatus = serde_json::from_value(value).unwrap();
    assert_eq!(back, status);
}
