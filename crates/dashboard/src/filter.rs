// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Row filters

use std::collections::BTreeSet;

use jw_core::JobStatus;
use serde::{Deserialize, Serialize};

use crate::presenter::PresentedRow;

/// The three dashboard filters, combined with AND.
///
/// An empty search and an empty status set match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// Case-insensitive substring of the job name
    pub search: String,
    pub status_filter: BTreeSet<JobStatus>,
    pub tracked_only: bool,
}

impl Filters {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn statuses(mut self, statuses: impl IntoIterator<Item = JobStatus>) -> Self {
        self.status_filter = statuses.into_iter().collect();
        self
    }

    pub fn tracked_only(mut self, tracked_only: bool) -> Self {
        self.tracked_only = tracked_only;
        self
    }

    pub fn matches(&self, row: &PresentedRow) -> bool {
        self.matches_search(&row.record.job_name)
            && (self.status_filter.is_empty() || self.status_filter.contains(&row.record.status))
            && (!self.tracked_only || row.tracked)
    }

    fn matches_search(&self, job_name: &str) -> bool {
        let needle = self.search.trim();
        needle.is_empty() || job_name.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
