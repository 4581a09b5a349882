// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized job status records, one per job per poll.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Normalized job status.
///
/// Serialized in upper case (`"RUNNING"`). Any unrecognized value read back
/// from a snapshot decodes as [`JobStatus::Unknown`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Scheduled,
    Running,
    Ok,
    Failed,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

crate::simple_display! {
    JobStatus {
        Scheduled => "SCHEDULED",
        Running => "RUNNING",
        Ok => "OK",
        Failed => "FAILED",
        Cancelled => "CANCELLED",
        Unknown => "UNKNOWN",
    }
}

impl JobStatus {
    /// Every status, in display order.
    pub const ALL: [JobStatus; 6] = [
        JobStatus::Scheduled,
        JobStatus::Running,
        JobStatus::Ok,
        JobStatus::Failed,
        JobStatus::Cancelled,
        JobStatus::Unknown,
    ];

    /// Map a backend status text (case-insensitive) to a status.
    pub fn from_text(text: &str) -> Option<Self> {
        let status = match text.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" | "RELEASED" | "READY" | "PLANNED" => JobStatus::Scheduled,
            "RUNNING" | "ACTIVE" => JobStatus::Running,
            "OK" | "FINISHED" | "COMPLETED" => JobStatus::Ok,
            "FAILED" | "ERROR" => JobStatus::Failed,
            "CANCELLED" | "CANCELED" | "ABORTED" => JobStatus::Cancelled,
            "UNKNOWN" => JobStatus::Unknown,
            _ => return None,
        };
        Some(status)
    }

    /// Map a one-letter backend status code to a status.
    pub fn from_code(code: &str) -> Option<Self> {
        let status = match code.trim().to_ascii_uppercase().as_str() {
            "S" | "P" | "Z" | "Y" => JobStatus::Scheduled,
            "R" => JobStatus::Running,
            "F" => JobStatus::Ok,
            "A" => JobStatus::Cancelled,
            _ => return None,
        };
        Some(status)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Ok | JobStatus::Failed | JobStatus::Cancelled)
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::from_text(s).ok_or_else(|| format!("unknown job status: {s}"))
    }
}

/// One step of a job run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepInfo {
    pub step_no: u32,
    #[serde(rename = "type")]
    pub step_type: String,
    pub name: String,
    pub variant: String,
    pub status: String,
}

/// Status of one job as reported by the backend in a single poll.
///
/// Produced fresh every cycle and replaced wholesale in the next snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobStatusRecord {
    pub job_name: String,
    pub job_user: String,
    pub status: JobStatus,
    /// One-letter status code exactly as the backend sent it
    pub raw_status: String,
    /// Backend run/occurrence identifier
    pub job_count: String,
    pub last_start: Option<String>,
    pub last_end: Option<String>,
    pub next_run: Option<String>,
    pub runtime_sec: Option<u64>,
    pub expected_duration_sec: u64,
    pub late_by_sec: u64,
    pub current_step: String,
    pub current_step_runtime_sec: Option<u64>,
    pub steps: Vec<StepInfo>,
    pub last_message: String,
}

crate::builder! {
    pub struct JobStatusRecordBuilder => JobStatusRecord {
        into {
            job_name: String = "Z_TEST_JOB",
            job_user: String = "BATCH",
            raw_status: String = "",
            job_count: String = "00000001",
            current_step: String = "",
            last_message: String = "",
        }
        set {
            status: JobStatus = JobStatus::Running,
            expected_duration_sec: u64 = 0,
            late_by_sec: u64 = 0,
            steps: Vec<StepInfo> = Vec::new(),
        }
        option {
            last_start: String = None,
            last_end: String = None,
            next_run: String = None,
            runtime_sec: u64 = None,
            current_step_runtime_sec: u64 = None,
        }
    }
}

/// How far a run has overshot its expected duration.
///
/// Zero when the runtime is unknown or within budget.
pub fn late_by_sec(runtime_sec: Option<u64>, expected_duration_sec: u64) -> u64 {
    runtime_sec.map(|runtime| runtime.saturating_sub(expected_duration_sec)).unwrap_or(0)
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
