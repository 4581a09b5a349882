// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-adapters: the seam between the agent and the job-scheduling backend
//!
//! The agent only sees [`BackendConnector`] and [`JobBackend`]. The transport
//! behind them (and its login handshake) lives outside this workspace; the
//! replay connector serves a recorded response document instead.

pub mod backend;
pub mod export;
pub mod replay;

pub use backend::{BackendConnector, BackendError, JobBackend};
pub use export::{ExportRequest, ExportResponse, JobFilter, RawJob, RawStep, EXPORT_FUNCTION};
pub use replay::{ReplayBackend, ReplayConnector};

#[cfg(any(test, feature = "test-support"))]
pub use backend::{FakeBackend, FakeConnector};
