// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fetch adapter: one export call for the tracked jobs, mapped into
//! [`JobStatusRecord`]s.
//!
//! Mapping never fails. Odd numeric and date fields turn into `None`, blank
//! step fields take defaults, and steps that match no job are dropped.

use std::collections::HashMap;

use jw_adapters::{BackendError, ExportRequest, ExportResponse, JobBackend, JobFilter, RawJob, RawStep};
use jw_core::{backend_timestamp, late_by_sec, JobStatus, JobStatusRecord, StepInfo, TrackedJob};

const DEFAULT_STEP_TYPE: &str = "ABAP";
const DEFAULT_STEP_STATUS: &str = "UNKNOWN";

/// Fetch status for `tracked` in exactly one backend round trip.
pub async fn fetch<B>(backend: &B, tracked: &[TrackedJob]) -> Result<Vec<JobStatusRecord>, BackendError>
where
    B: JobBackend + ?Sized,
{
    let request = export_request(tracked);
    let response = backend.export_jobs(&request).await?;
    let records = map_response(tracked, response);
    tracing::debug!(requested = tracked.len(), returned = records.len(), "fetched job status");
    Ok(records)
}

/// Latest run, with steps, of every tracked job.
pub fn export_request(tracked: &[TrackedJob]) -> ExportRequest {
    ExportRequest::latest(
        tracked.iter().map(|job| JobFilter::new(&job.job_name, &job.job_user)).collect(),
    )
}

/// Join steps onto jobs by `(job name, run id)` and normalize every field.
///
/// Jobs the backend returns without a matching tracked entry keep an
/// expected duration of zero.
pub fn map_response(tracked: &[TrackedJob], response: ExportResponse) -> Vec<JobStatusRecord> {
    let expected: HashMap<&str, u64> =
        tracked.iter().map(|job| (job.job_name.as_str(), job.expected_duration_sec)).collect();

    let mut steps_by_run: HashMap<(String, String), Vec<StepInfo>> = HashMap::new();
    for step in response.steps {
        let key = (step.job_name.clone(), step.job_count.clone());
        steps_by_run.entry(key).or_default().push(step_info(step));
    }

    response
        .jobs
        .into_iter()
        .filter(|job| !job.job_name.is_empty())
        .map(|job| {
            let expected = expected.get(job.job_name.as_str()).copied().unwrap_or(0);
            let steps = steps_by_run
                .remove(&(job.job_name.clone(), job.job_count.clone()))
                .unwrap_or_default();
            job_record(job, expected, steps)
        })
        .collect()
}

fn job_record(job: RawJob, expected_duration_sec: u64, steps: Vec<StepInfo>) -> JobStatusRecord {
    let runtime_sec = job.runtime_sec();
    let status = JobStatus::from_text(&job.status_text)
        .or_else(|| JobStatus::from_code(&job.status))
        .unwrap_or_default();

    JobStatusRecord {
        status,
        last_start: backend_timestamp(&job.start_date, &job.start_time),
        last_end: backend_timestamp(&job.end_date, &job.end_time),
        next_run: backend_timestamp(&job.next_date, &job.next_time),
        runtime_sec,
        expected_duration_sec,
        late_by_sec: late_by_sec(runtime_sec, expected_duration_sec),
        current_step: current_step_label(job.current_step_no(), &job.current_step_text),
        current_step_runtime_sec: job.current_step_runtime_sec(),
        steps,
        raw_status: job.status,
        job_count: job.job_count,
        job_user: job.job_user,
        last_message: job.message,
        job_name: job.job_name,
    }
}

fn step_info(step: RawStep) -> StepInfo {
    StepInfo {
        step_no: step.step_no().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        step_type: non_blank_or(step.step_type, DEFAULT_STEP_TYPE),
        name: step.program,
        variant: step.variant,
        status: non_blank_or(step.status, DEFAULT_STEP_STATUS),
    }
}

/// `Step 3 - ZFI_POST` when the step number is known, else the bare text.
pub(crate) fn current_step_label(step_no: Option<u64>, text: &str) -> String {
    match step_no {
        _ if text.is_empty() => String::new(),
        Some(n) if n > 0 => format!("Step {n} - {text}"),
        _ => text.to_string(),
    }
}

fn non_blank_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
