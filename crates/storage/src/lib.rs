// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-storage: file-backed persistence shared by the agent and the dashboard
//!
//! The agent and the dashboard never share memory. They meet only through
//! two files: the snapshot (written atomically by the agent) and the track
//! state (written directly by the dashboard).

mod catalog;
mod json_store;
mod snapshot;
mod track_state;

pub use catalog::{CatalogError, CatalogLoader};
pub use json_store::{read_json, write_json, write_json_atomic, StoreError};
pub use snapshot::SnapshotStore;
pub use track_state::TrackStateStore;
