// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-core: data model shared by the polling agent and the dashboard

pub mod macros;

pub mod agent;
pub mod catalog;
pub mod clock;
pub mod record;
pub mod snapshot;
pub mod time_fmt;
pub mod track;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use agent::{AgentHealth, AgentState, AgentStatus};
pub use catalog::{JobCatalogRow, TrackedJob};
pub use clock::{Clock, FakeClock, SystemClock};
pub use record::{late_by_sec, JobStatus, JobStatusRecord, StepInfo};
pub use snapshot::{Snapshot, SnapshotMeta};
pub use time_fmt::{backend_timestamp, format_elapsed};
pub use track::{reconcile, TrackEdit, TrackState};
