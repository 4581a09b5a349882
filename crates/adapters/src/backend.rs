// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use thiserror::Error;

use crate::export::{ExportRequest, ExportResponse};

/// Errors from backend operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("connect failed: {0}")]
    ConnectFailed(String),
    #[error("call {function} failed: {message}")]
    CallFailed { function: String, message: String },
    #[error("close failed: {0}")]
    CloseFailed(String),
}

/// An open connection to the job-scheduling backend
#[async_trait]
pub trait JobBackend: Send + Sync + 'static {
    /// Run the job export function once
    async fn export_jobs(&self, request: &ExportRequest) -> Result<ExportResponse, BackendError>;

    /// Release the connection
    async fn close(&self) -> Result<(), BackendError>;
}

/// Opens backend connections
#[async_trait]
pub trait BackendConnector: Clone + Send + Sync + 'static {
    type Backend: JobBackend;

    async fn connect(&self) -> Result<Self::Backend, BackendError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{BackendConnector, BackendError, JobBackend};
    use crate::export::{ExportRequest, ExportResponse, EXPORT_FUNCTION};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeBackendState {
        response: ExportResponse,
        call_errors: VecDeque<String>,
        connect_errors: VecDeque<String>,
        fail_close: bool,
        calls: Vec<ExportRequest>,
        connects: usize,
        closes: usize,
    }

    /// Fake connector for testing.
    ///
    /// Every connection it opens shares one scripted state: the canned
    /// response, queued failures and call records.
    #[derive(Clone, Default)]
    pub struct FakeConnector {
        inner: Arc<Mutex<FakeBackendState>>,
    }

    impl FakeConnector {
        pub fn new() -> Self {
            Self::default()
        }

        /// Response returned by every successful call, filtered to the
        /// requested jobs
        pub fn set_response(&self, response: ExportResponse) {
            self.inner.lock().response = response;
        }

        /// Fail the next call with `message`
        pub fn fail_next_call(&self, message: impl Into<String>) {
            self.inner.lock().call_errors.push_back(message.into());
        }

        /// Fail the next connect with `message`
        pub fn fail_next_connect(&self, message: impl Into<String>) {
            self.inner.lock().connect_errors.push_back(message.into());
        }

        pub fn set_fail_close(&self, fail: bool) {
            self.inner.lock().fail_close = fail;
        }

        /// All requests received, in order
        pub fn calls(&self) -> Vec<ExportRequest> {
            self.inner.lock().calls.clone()
        }

        pub fn connects(&self) -> usize {
            self.inner.lock().connects
        }

        pub fn closes(&self) -> usize {
            self.inner.lock().closes
        }
    }

    #[async_trait]
    impl BackendConnector for FakeConnector {
        type Backend = FakeBackend;

        async fn connect(&self) -> Result<FakeBackend, BackendError> {
            let mut inner = self.inner.lock();
            if let Some(message) = inner.connect_errors.pop_front() {
                return Err(BackendError::ConnectFailed(message));
            }
            inner.connects += 1;
            Ok(FakeBackend { inner: Arc::clone(&self.inner) })
        }
    }

    /// Connection handed out by [`FakeConnector`]
    pub struct FakeBackend {
        inner: Arc<Mutex<FakeBackendState>>,
    }

    #[async_trait]
    impl JobBackend for FakeBackend {
        async fn export_jobs(
            &self,
            request: &ExportRequest,
        ) -> Result<ExportResponse, BackendError> {
            let mut inner = self.inner.lock();
            inner.calls.push(request.clone());
            if let Some(message) = inner.call_errors.pop_front() {
                return Err(BackendError::CallFailed {
                    function: EXPORT_FUNCTION.to_string(),
                    message,
                });
            }
            let jobs = inner
                .response
                .jobs
                .iter()
                .filter(|job| request.selects(&job.job_name))
                .cloned()
                .collect();
            Ok(ExportResponse { jobs, steps: inner.response.steps.clone() })
        }

        async fn close(&self) -> Result<(), BackendError> {
            let mut inner = self.inner.lock();
            inner.closes += 1;
            if inner.fail_close {
                return Err(BackendError::CloseFailed("connection already closed".to_string()));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBackend, FakeConnector};

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
