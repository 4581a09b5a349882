// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Summary and detail views.

use std::fmt;

use jw_core::{JobStatus, SnapshotMeta, StepInfo};
use serde::Serialize;

use crate::presenter::PresentedRow;

/// Header line: when the agent last published, how often, and for how many jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub generated_at: String,
    pub poll_interval_sec: u64,
    pub tracked_job_count: usize,
}

impl SummaryLine {
    pub fn from_meta(meta: &SnapshotMeta) -> Self {
        Self {
            generated_at: meta.generated_at.clone(),
            poll_interval_sec: meta.poll_interval_sec,
            tracked_job_count: meta.tracked_job_count,
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generated_at.is_empty() {
            return f.write_str("No snapshot yet");
        }
        write!(
            f,
            "Last refresh: {} | Poll: {}s | Tracked (agent): {}",
            self.generated_at, self.poll_interval_sec, self.tracked_job_count
        )
    }
}

/// The selected job with its steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDetail {
    pub job_name: String,
    pub status: JobStatus,
    pub last_start: Option<String>,
    pub runtime_sec: Option<u64>,
    pub current_step: String,
    pub last_message: String,
    pub tracked: bool,
    pub steps: Vec<StepInfo>,
}

impl JobDetail {
    pub(crate) fn from_row(row: &PresentedRow) -> Self {
        let record = &row.record;
        Self {
            job_name: record.job_name.clone(),
            status: record.status,
            last_start: record.last_start.clone(),
            runtime_sec: record.runtime_sec,
            current_step: record.current_step.clone(),
            last_message: record.last_message.clone(),
            tracked: row.tracked,
            steps: record.steps.clone(),
        }
    }

    /// `Step 1 - ZFI_PREP (FINISHED)`, one per step.
    pub fn step_lines(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| format!("Step {} - {} ({})", step.step_no, step.name, step.status))
            .collect()
    }
}

impl fmt::Display for JobDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = |v: Option<&str>| v.filter(|s| !s.is_empty()).unwrap_or("-").to_string();
        writeln!(f, "{}", self.job_name)?;
        writeln!(f, "  Status:       {}", self.status)?;
        writeln!(f, "  Last start:   {}", dash(self.last_start.as_deref()))?;
        writeln!(
            f,
            "  Runtime:      {}",
            self.runtime_sec.map(|s| format!("{s}s")).unwrap_or_else(|| "-".to_string())
        )?;
        writeln!(f, "  Current step: {}", dash(Some(&self.current_step)))?;
        writeln!(f, "  Message:      {}", dash(Some(&self.last_message)))?;
        writeln!(f, "  Tracked:      {}", if self.tracked { "yes" } else { "no" })?;
        if self.steps.is_empty() {
            write!(f, "  Steps:        none")
        } else {
            write!(f, "  Steps:")?;
            for line in self.step_lines() {
                write!(f, "\n    {line}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
