// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for handling socket I/O.
//!
//! The Listener runs in a spawned task, accepting connections and serving
//! one request per connection. Control requests go straight to the agent
//! controller; none of them block on a polling cycle except `AgentStop`,
//! which waits for the loop to exit.

use std::sync::Arc;
use std::time::Instant;

use jw_wire::{ProtocolError, Request, Response};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::UnixListener;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use crate::env::{ipc_timeout, PROTOCOL_VERSION};
use crate::lifecycle::DaemonAgent;

/// Shared daemon context for all request handlers.
pub struct ListenCtx {
    pub agent: Arc<DaemonAgent>,
    pub start_time: Instant,
    pub shutdown: Arc<Notify>,
}

/// Listener task for accepting socket connections.
pub struct Listener {
    unix: UnixListener,
    ctx: Arc<ListenCtx>,
}

/// Errors from connection handling.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl Listener {
    pub fn new(unix: UnixListener, ctx: Arc<ListenCtx>) -> Self {
        Self { unix, ctx }
    }

    /// Run the listener loop, spawning a task for each connection.
    pub async fn run(self) {
        loop {
            match self.unix.accept().await {
                Ok((stream, _)) => {
                    let ctx = Arc::clone(&self.ctx);
                    tokio::spawn(async move {
                        let (reader, writer) = stream.into_split();
                        if let Err(e) = handle_connection(reader, writer, &ctx).await {
                            log_connection_error(e);
                        }
                    });
                }
                Err(e) => error!("Unix accept error: {}", e),
            }
        }
    }
}

fn log_connection_error(e: ConnectionError) {
    match e {
        ConnectionError::Protocol(ProtocolError::ConnectionClosed) => {
            debug!("Client disconnected")
        }
        ConnectionError::Protocol(ProtocolError::Timeout(_)) => warn!("Connection timeout"),
        ConnectionError::Protocol(_) => error!("Connection error: {}", e),
    }
}

/// Handle a single client connection.
///
/// The handler is raced against client disconnect detection so a CLI that
/// gave up waiting does not leave an orphaned handler behind.
pub(crate) async fn handle_connection<R, W>(
    mut reader: R,
    mut writer: W,
    ctx: &ListenCtx,
) -> Result<(), ConnectionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let request = jw_wire::read_request(&mut reader, ipc_timeout()).await?;

    // Status polling is frequent; control requests are worth an info line
    if matches!(request, Request::Ping | Request::Status | Request::AgentStatus) {
        debug!(request = ?request, "received query");
    } else {
        info!(request = ?request, "received request");
    }

    let response = tokio::select! {
        response = handle_request(request, ctx) => response,
        _ = detect_client_disconnect(&mut reader) => {
            debug!("Client disconnected, dropping handler");
            return Ok(());
        }
    };

    debug!("Sending response: {:?}", response);
    jw_wire::write_response(&mut writer, &response, ipc_timeout()).await?;

    Ok(())
}

/// Detect client disconnect by reading from the socket after the request.
///
/// The client sends one request then waits, so a read only returns on EOF.
async fn detect_client_disconnect<R: AsyncRead + Unpin>(reader: &mut R) {
    let mut buf = [0u8; 1];
    let _ = reader.read(&mut buf).await;
}

/// Handle a single request and return a response.
pub(crate) async fn handle_request(request: Request, ctx: &ListenCtx) -> Response {
    let agent = &ctx.agent;
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version } => {
            if version != PROTOCOL_VERSION {
                warn!(client = %version, daemon = PROTOCOL_VERSION, "protocol version mismatch");
            }
            Response::Hello { version: PROTOCOL_VERSION.to_string() }
        }

        Request::Status => Response::Status {
            uptime_secs: ctx.start_time.elapsed().as_secs(),
            pid: std::process::id(),
            agent: agent.status(),
        },

        Request::AgentStatus => Response::Agent { agent: agent.status() },

        Request::AgentStart => control(agent, agent.start()),
        Request::AgentPause => control(agent, agent.pause()),
        Request::AgentResume => control(agent, agent.resume()),

        Request::AgentStop => {
            agent.stop();
            agent.join().await;
            Response::Agent { agent: agent.status() }
        }

        Request::Shutdown => {
            ctx.shutdown.notify_one();
            Response::ShuttingDown
        }
    }
}

fn control(agent: &DaemonAgent, result: Result<(), jw_engine::ControlError>) -> Response {
    match result {
        Ok(()) => Response::Agent { agent: agent.status() },
        Err(e) => Response::error(e.to_string()),
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
