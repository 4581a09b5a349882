// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request and response records of the job export function.
//!
//! Field names follow the backend's own (upper-case) names so recorded
//! response documents deserialize as-is. The backend is loose about types:
//! numeric fields may arrive as numbers or as strings, and text fields as
//! numbers. Text fields are read leniently; numeric fields are kept as raw
//! JSON and interpreted through the accessor methods, which never fail.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Name of the remote function that exports job status.
pub const EXPORT_FUNCTION: &str = "ZSRE_JOBMON_EXPORT";

/// Default cap on job rows returned by one call.
pub const DEFAULT_MAX_JOBS: u32 = 200;

/// One call's worth of filters and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "IT_FILTER", default)]
    pub filters: Vec<JobFilter>,
    /// Only the most recent run of each job
    #[serde(rename = "IV_ONLY_LATEST", with = "flag", default)]
    pub only_latest: bool,
    /// Only runs that are currently active
    #[serde(rename = "IV_ONLY_ACTIVE", with = "flag", default)]
    pub only_active: bool,
    #[serde(rename = "IV_INCLUDE_STEPS", with = "flag", default)]
    pub include_steps: bool,
    #[serde(rename = "IV_MAX_JOBS", default = "default_max_jobs")]
    pub max_jobs: u32,
}

fn default_max_jobs() -> u32 {
    DEFAULT_MAX_JOBS
}

impl ExportRequest {
    /// Latest run of each filtered job, with steps.
    pub fn latest(filters: Vec<JobFilter>) -> Self {
        Self {
            filters,
            only_latest: true,
            only_active: false,
            include_steps: true,
            max_jobs: DEFAULT_MAX_JOBS,
        }
    }

    /// Whether `job_name` is selected by one of the filters.
    pub fn selects(&self, job_name: &str) -> bool {
        self.filters.iter().any(|f| f.job_name == job_name)
    }
}

/// Selects one job by name, optionally narrowed by user, run and client.
///
/// Blank fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobFilter {
    #[serde(rename = "JOBNAME")]
    pub job_name: String,
    #[serde(rename = "SDLUNAME")]
    pub job_user: String,
    #[serde(rename = "JOBCOUNT")]
    pub job_count: String,
    #[serde(rename = "CLIENT")]
    pub client: String,
}

impl JobFilter {
    pub fn new(job_name: impl Into<String>, job_user: impl Into<String>) -> Self {
        Self { job_name: job_name.into(), job_user: job_user.into(), ..Self::default() }
    }
}

/// Parallel job and step tables returned by one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    #[serde(rename = "ET_JOBS", default, deserialize_with = "nullable_list")]
    pub jobs: Vec<RawJob>,
    #[serde(rename = "ET_STEPS", default, deserialize_with = "nullable_list")]
    pub steps: Vec<RawStep>,
}

/// One job run as the backend reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawJob {
    #[serde(rename = "JOBNAME", deserialize_with = "text")]
    pub job_name: String,
    #[serde(rename = "JOBCOUNT", deserialize_with = "text")]
    pub job_count: String,
    #[serde(rename = "SDLUNAME", deserialize_with = "text")]
    pub job_user: String,
    /// One-letter status code
    #[serde(rename = "STATUS", deserialize_with = "text")]
    pub status: String,
    #[serde(rename = "STATUS_TXT", deserialize_with = "text")]
    pub status_text: String,
    #[serde(rename = "STRTDATE", deserialize_with = "text")]
    pub start_date: String,
    #[serde(rename = "STRTTIME", deserialize_with = "text")]
    pub start_time: String,
    #[serde(rename = "ENDDATE", deserialize_with = "text")]
    pub end_date: String,
    #[serde(rename = "ENDTIME", deserialize_with = "text")]
    pub end_time: String,
    /// Next scheduled start, when the backend reports one
    #[serde(rename = "SDLSTRTDT", deserialize_with = "text")]
    pub next_date: String,
    #[serde(rename = "SDLSTRTTM", deserialize_with = "text")]
    pub next_time: String,
    #[serde(rename = "RUNTIME_SEC")]
    pub runtime_sec: Value,
    #[serde(rename = "CURRENT_STEP_NO")]
    pub current_step_no: Value,
    #[serde(rename = "CURRENT_STEP_TXT", deserialize_with = "text")]
    pub current_step_text: String,
    #[serde(rename = "CURRENT_STEP_RUNTIME_SEC")]
    pub current_step_runtime_sec: Value,
    #[serde(rename = "MSG", deserialize_with = "text")]
    pub message: String,
}

impl RawJob {
    pub fn runtime_sec(&self) -> Option<u64> {
        number(&self.runtime_sec)
    }

    pub fn current_step_no(&self) -> Option<u64> {
        number(&self.current_step_no)
    }

    pub fn current_step_runtime_sec(&self) -> Option<u64> {
        number(&self.current_step_runtime_sec)
    }
}

/// One step of a job run, keyed to its job by name and run id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStep {
    #[serde(rename = "JOBNAME", deserialize_with = "text")]
    pub job_name: String,
    #[serde(rename = "JOBCOUNT", deserialize_with = "text")]
    pub job_count: String,
    #[serde(rename = "STEPCNT")]
    pub step_no: Value,
    #[serde(rename = "STEP_TYPE", deserialize_with = "text")]
    pub step_type: String,
    #[serde(rename = "PROGNAME", deserialize_with = "text")]
    pub program: String,
    #[serde(rename = "VARIANT", deserialize_with = "text")]
    pub variant: String,
    #[serde(rename = "STEP_STATUS", deserialize_with = "text")]
    pub status: String,
}

impl RawStep {
    pub fn step_no(&self) -> Option<u64> {
        number(&self.step_no)
    }
}

/// Non-negative integer from a number or numeric string.
///
/// Blank, negative, fractional-garbage and non-numeric values yield `None`.
pub fn number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Backend boolean flags: `"X"` for set, `""` for unset.
mod flag {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "X" } else { "" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.trim().eq_ignore_ascii_case("X"))
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
