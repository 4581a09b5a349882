// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon control specs
//!
//! A real daemon (replay backend, real clock) driven over its control
//! socket the way `jw agent ...` and `jw daemon stop` drive it.

use std::sync::Arc;

use jw_daemon::{startup, Config, ListenCtx, Listener};
use jw_wire::{Request, Response};
use tokio::net::UnixStream;
use tokio::sync::Notify;

use crate::prelude::*;

const IO_TIMEOUT: Duration = Duration::from_secs(2);

async fn send(socket: &Path, request: Request) -> Response {
    let stream = UnixStream::connect(socket).await.unwrap();
    let (mut reader, mut writer) = stream.into_split();
    jw_wire::write_request(&mut writer, &request, IO_TIMEOUT).await.unwrap();
    jw_wire::read_response(&mut reader, IO_TIMEOUT).await.unwrap()
}

fn agent_state(response: Response) -> AgentState {
    match response {
        Response::Agent { agent } => agent.state,
        other => panic!("expected Agent response, got {other:?}"),
    }
}

#[tokio::test]
async fn daemon_polls_and_obeys_control_requests() {
    let state = StateDir::with_catalog(FINANCE_CATALOG);
    let mut config = Config::new(state.path());
    std::fs::write(&config.replay_path, finance_response_json().to_string()).unwrap();
    config.poll_interval = Duration::from_secs(60);
    config.autostart = false;

    let started = startup(&config).await.unwrap();
    let mut daemon = started.daemon;
    let shutdown = Arc::new(Notify::new());
    let ctx = Arc::new(ListenCtx {
        agent: Arc::clone(&daemon.agent),
        start_time: daemon.start_time,
        shutdown: Arc::clone(&shutdown),
    });
    tokio::spawn(Listener::new(started.listener, ctx).run());
    let socket = config.socket_path.clone();

    assert_eq!(send(&socket, Request::Ping).await, Response::Pong);
    assert_eq!(agent_state(send(&socket, Request::AgentStatus).await), AgentState::Idle);
    assert!(matches!(send(&socket, Request::AgentPause).await, Response::Error { .. }));

    assert_eq!(agent_state(send(&socket, Request::AgentStart).await), AgentState::Running);

    // First cycle runs immediately
    let snapshots = state.snapshot_store();
    let mut published = Snapshot::default();
    for _ in 0..250 {
        published = snapshots.load();
        if !published.jobs.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(published.jobs.len(), 2);
    assert_eq!(published.meta.poll_interval_sec, 60);

    match send(&socket, Request::Status).await {
        Response::Status { pid, agent, .. } => {
            assert_eq!(pid, std::process::id());
            assert_eq!(agent.poll_interval_sec, 60);
        }
        other => panic!("expected Status, got {other:?}"),
    }

    assert_eq!(agent_state(send(&socket, Request::AgentPause).await), AgentState::Paused);
    assert_eq!(agent_state(send(&socket, Request::AgentResume).await), AgentState::Running);
    assert_eq!(agent_state(send(&socket, Request::AgentStop).await), AgentState::Stopped);

    assert_eq!(send(&socket, Request::Shutdown).await, Response::ShuttingDown);
    tokio::time::timeout(IO_TIMEOUT, shutdown.notified()).await.unwrap();

    daemon.shutdown().await.unwrap();
    assert!(!config.socket_path.exists());
    assert!(!config.lock_path.exists());
    // The last snapshot outlives the daemon for the dashboard
    assert_eq!(snapshots.load().jobs.len(), 2);
}

#[tokio::test]
async fn second_daemon_on_the_same_state_dir_is_refused() {
    let state = StateDir::with_catalog(FINANCE_CATALOG);
    let mut config = Config::new(state.path());
    config.autostart = false;

    let _first = startup(&config).await.unwrap();
    let second = startup(&config).await;

    assert!(matches!(second, Err(jw_daemon::LifecycleError::LockFailed(_))));
}
