// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling agent lifecycle state and health, shared by the agent and its
//! control surfaces.

use serde::{Deserialize, Serialize};

/// Lifecycle state of the polling agent.
///
/// ```text
/// Idle ──start──▶ Running ◀──resume/start── Paused
///                   │  └──────pause──────────▶ │
///                   └──stop──▶ Stopping ◀─stop─┘
///                                 │
///                                 ▼
///                              Stopped ──start──▶ Running
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    #[default]
    Idle,
    Running,
    Paused,
    Stopping,
    Stopped,
}

crate::simple_display! {
    AgentState {
        Idle => "idle",
        Running => "running",
        Paused => "paused",
        Stopping => "stopping",
        Stopped => "stopped",
    }
}

impl AgentState {
    /// Whether a background loop exists in this state.
    pub fn is_active(self) -> bool {
        matches!(self, AgentState::Running | AgentState::Paused | AgentState::Stopping)
    }
}

/// Outcome counters of the polling loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentHealth {
    pub cycles_completed: u64,
    pub cycles_failed: u64,
    /// `generated_at` of the last published snapshot
    pub last_cycle_at: Option<String>,
    /// Most recent cycle error, cleared by the next clean cycle
    pub last_error: Option<String>,
    /// Tracked jobs in the last completed cycle
    pub tracked_job_count: usize,
}

/// Point-in-time view of the agent for status queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentStatus {
    pub state: AgentState,
    pub poll_interval_sec: u64,
    #[serde(flatten)]
    pub health: AgentHealth,
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
