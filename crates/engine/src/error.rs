// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types

use jw_adapters::BackendError;
use jw_core::AgentState;
use jw_storage::{CatalogError, StoreError};
use thiserror::Error;

/// Errors that abort a single poll cycle.
///
/// None of these stop the loop; the next cycle starts on schedule.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("snapshot write failed: {0}")]
    Store(#[from] StoreError),
}

/// Rejected lifecycle transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("agent is {0}; start it first")]
    NotRunning(AgentState),
    #[error("agent is still stopping; retry once it has stopped")]
    Stopping,
}
