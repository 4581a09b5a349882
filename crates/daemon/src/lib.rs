// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jobwatch daemon library
//!
//! Hosts one polling agent behind a Unix control socket. The CLI uses
//! [`env`] and [`lifecycle::Config`] to find the same state directory the
//! daemon writes to.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod listener;

pub use lifecycle::{startup, Config, DaemonAgent, DaemonState, LifecycleError, StartupResult};
pub use listener::{ListenCtx, Listener};
