// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

/// Request from CLI to daemon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    /// Health check ping
    Ping,

    /// Version handshake
    Hello { version: String },

    /// Get daemon status
    Status,

    /// Start the polling agent, or clear a pause
    AgentStart,

    /// Pause polling before the next cycle
    AgentPause,

    /// Resume a paused agent
    AgentResume,

    /// Stop the polling agent and wait for it to exit
    AgentStop,

    /// Get the polling agent's state and health
    AgentStatus,

    /// Stop the agent and shut the daemon down
    Shutdown,
}
