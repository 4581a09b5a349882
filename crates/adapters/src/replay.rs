// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend that serves a recorded export response from disk.
//!
//! The document is re-read on every call, so editing it between cycles
//! changes what the agent sees. Jobs are filtered to the request and capped
//! at `IV_MAX_JOBS`, the way the live function answers.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::backend::{BackendConnector, BackendError, JobBackend};
use crate::export::{ExportRequest, ExportResponse, EXPORT_FUNCTION};

/// Connector for [`ReplayBackend`]
#[derive(Debug, Clone)]
pub struct ReplayConnector {
    path: PathBuf,
}

impl ReplayConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BackendConnector for ReplayConnector {
    type Backend = ReplayBackend;

    async fn connect(&self) -> Result<ReplayBackend, BackendError> {
        if !self.path.is_file() {
            return Err(BackendError::ConnectFailed(format!(
                "replay document not found: {}",
                self.path.display()
            )));
        }
        tracing::info!(path = %self.path.display(), "connected to replay backend");
        Ok(ReplayBackend { path: self.path.clone() })
    }
}

/// A "connection" to a recorded response document
#[derive(Debug)]
pub struct ReplayBackend {
    path: PathBuf,
}

#[async_trait]
impl JobBackend for ReplayBackend {
    async fn export_jobs(&self, request: &ExportRequest) -> Result<ExportResponse, BackendError> {
        let call_failed = |message: String| BackendError::CallFailed {
            function: EXPORT_FUNCTION.to_string(),
            message,
        };
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| call_failed(format!("{}: {e}", self.path.display())))?;
        let recorded: ExportResponse =
            serde_json::from_str(&content).map_err(|e| call_failed(e.to_string()))?;
        Ok(answer(request, recorded))
    }

    async fn close(&self) -> Result<(), BackendError> {
        tracing::debug!(path = %self.path.display(), "closed replay backend");
        Ok(())
    }
}

/// Restrict a recorded response to what `request` asks for.
fn answer(request: &ExportRequest, recorded: ExportResponse) -> ExportResponse {
    let jobs: Vec<_> = recorded
        .jobs
        .into_iter()
        .filter(|job| request.selects(&job.job_name))
        .take(request.max_jobs as usize)
        .collect();
    let steps = if request.include_steps {
        recorded
            .steps
            .into_iter()
            .filter(|step| {
                jobs.iter().any(|j| j.job_name == step.job_name && j.job_count == step.job_count)
            })
            .collect()
    } else {
        Vec::new()
    };
    ExportResponse { jobs, steps }
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
