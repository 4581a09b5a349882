// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-socket client for the `jwd` daemon.
//!
//! Each request opens a fresh connection: one request, one response.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jw_core::AgentStatus;
use jw_daemon::env::{ipc_timeout, PROTOCOL_VERSION};
use jw_daemon::Config;
use jw_wire::{ProtocolError, Request, Response};
use thiserror::Error;
use tokio::net::UnixStream;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("daemon is not running")]
    DaemonNotRunning,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("{0}")]
    Rejected(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("{0}")]
    Config(#[from] jw_daemon::LifecycleError),
}

impl ClientError {
    /// True when the failure means nothing is listening on the socket.
    pub fn is_not_running(&self) -> bool {
        match self {
            ClientError::DaemonNotRunning => true,
            ClientError::Io(e) => {
                matches!(e.kind(), ErrorKind::NotFound | ErrorKind::ConnectionRefused)
            }
            _ => false,
        }
    }
}

/// Daemon status as reported over the socket
#[derive(Debug, Clone, serde::Serialize)]
pub struct DaemonStatus {
    pub uptime_secs: u64,
    pub pid: u32,
    pub agent: AgentStatus,
}

pub struct DaemonClient {
    socket_path: PathBuf,
    timeout: Duration,
}

impl DaemonClient {
    /// Connect to the daemon at the configured state dir.
    ///
    /// Fails fast with [`ClientError::DaemonNotRunning`] when the socket file
    /// is missing; a stale socket surfaces on the first request instead.
    pub fn connect() -> Result<Self, ClientError> {
        let config = Config::load()?;
        Self::at(&config.socket_path)
    }

    pub fn at(socket_path: &Path) -> Result<Self, ClientError> {
        if !socket_path.exists() {
            return Err(ClientError::DaemonNotRunning);
        }
        Ok(Self { socket_path: socket_path.to_path_buf(), timeout: ipc_timeout() })
    }

    /// Send one request and wait for its response.
    pub async fn send(&self, request: &Request) -> Result<Response, ClientError> {
        let stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::ConnectionRefused) {
                ClientError::DaemonNotRunning
            } else {
                ClientError::Io(e)
            }
        })?;
        let (mut reader, mut writer) = stream.into_split();
        jw_wire::write_request(&mut writer, request, self.timeout).await?;
        Ok(jw_wire::read_response(&mut reader, self.timeout).await?)
    }

    fn reject<T>(response: Response) -> Result<T, ClientError> {
        match response {
            Response::Error { message } => Err(ClientError::Rejected(message)),
            other => Err(ClientError::UnexpectedResponse(format!("{other:?}"))),
        }
    }

    pub async fn ping(&self) -> Result<(), ClientError> {
        match self.send(&Request::Ping).await? {
            Response::Pong => Ok(()),
            other => Self::reject(other),
        }
    }

    /// Get daemon version via Hello handshake
    pub async fn hello(&self) -> Result<String, ClientError> {
        let request = Request::Hello { version: PROTOCOL_VERSION.to_string() };
        match self.send(&request).await? {
            Response::Hello { version } => Ok(version),
            other => Self::reject(other),
        }
    }

    pub async fn status(&self) -> Result<DaemonStatus, ClientError> {
        match self.send(&Request::Status).await? {
            Response::Status { uptime_secs, pid, agent } => {
                Ok(DaemonStatus { uptime_secs, pid, agent })
            }
            other => Self::reject(other),
        }
    }

    /// Send an agent control request and return the resulting agent status.
    pub async fn agent(&self, request: Request) -> Result<AgentStatus, ClientError> {
        match self.send(&request).await? {
            Response::Agent { agent } => Ok(agent),
            other => Self::reject(other),
        }
    }

    /// Request daemon shutdown
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        match self.send(&Request::Shutdown).await? {
            Response::Ok | Response::ShuttingDown => Ok(()),
            other => Self::reject(other),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
