// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-dashboard: snapshot reader and presenter
//!
//! Reads the snapshot and the track-state overlay on its own cadence, joins
//! them into presented rows, filters them, and writes the user's track edits
//! back to the overlay. Rendering is left to the caller.

mod filter;
mod presenter;
mod view;

pub use filter::Filters;
pub use presenter::{Dashboard, PresentedRow, REFRESH_INTERVAL};
pub use view::{JobDetail, SummaryLine};
