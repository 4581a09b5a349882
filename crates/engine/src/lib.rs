// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-engine: the polling agent
//!
//! [`AgentController`] owns the start/pause/resume/stop lifecycle of one
//! background loop. Each cycle reloads the catalog when stale, re-reads the
//! track-state overlay, fetches status for the tracked jobs in one backend
//! call, and publishes the result as a snapshot.

pub mod agent;
mod error;
pub mod fetch;

pub use agent::{
    AgentConfig, AgentController, CATALOG_STALE_AFTER, DEFAULT_POLL_INTERVAL, PAUSE_POLL,
};
pub use error::{ControlError, CycleError};
pub use fetch::{export_request, fetch, map_response};
