// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jwd`: hosts the polling agent and serves the control socket.

use std::process::ExitCode;
use std::sync::Arc;

use jw_daemon::{startup, Config, ListenCtx, Listener, StartupResult};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Notify;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("jwd: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("jwd: cannot open {}: {e}", config.log_path.display());
            return ExitCode::FAILURE;
        }
    };

    let StartupResult { mut daemon, listener } = match startup(&config).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("jwd: {e}");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Arc::new(Notify::new());
    let ctx = Arc::new(ListenCtx {
        agent: Arc::clone(&daemon.agent),
        start_time: daemon.start_time,
        shutdown: Arc::clone(&shutdown),
    });
    tokio::spawn(Listener::new(listener, ctx).run());

    println!("READY");
    wait_for_shutdown(&shutdown).await;

    match daemon.shutdown().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "shutdown failed");
            ExitCode::FAILURE
        }
    }
}

/// Log to `daemon.log` in the state dir; `RUST_LOG` overrides the `info` default.
fn init_logging(config: &Config) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.state_dir)?;
    let file_name = config.log_path.file_name().unwrap_or(std::ffi::OsStr::new("daemon.log"));
    let appender = tracing_appender::rolling::never(&config.state_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
    Ok(guard)
}

async fn wait_for_shutdown(shutdown: &Notify) {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => Some(sigterm),
        Err(e) => {
            error!(error = %e, "cannot install SIGTERM handler");
            None
        }
    };
    let sigterm_recv = async {
        match sigterm.as_mut() {
            Some(sigterm) => {
                sigterm.recv().await;
            }
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("received SIGINT"),
        _ = sigterm_recv => info!("received SIGTERM"),
        _ = shutdown.notified() => info!("shutdown requested"),
    }
}
