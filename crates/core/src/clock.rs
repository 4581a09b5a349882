// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling.
//!
//! The agent needs two kinds of time: a monotonic instant for the catalog
//! staleness timer, and a wall-clock timestamp for `generated_at`.

use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, Local};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic time, used for interval bookkeeping.
    fn now(&self) -> Instant;
    /// Wall-clock time with the local UTC offset.
    fn wall(&self) -> DateTime<FixedOffset>;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
    wall: Arc<Mutex<DateTime<FixedOffset>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        // 2026-02-21T08:00:00+00:00
        let wall = DateTime::from_timestamp(1_771_660_800, 0)
            .unwrap_or_default()
            .fixed_offset();
        Self { current: Arc::new(Mutex::new(Instant::now())), wall: Arc::new(Mutex::new(wall)) }
    }

    /// Advance both the monotonic and wall clocks by the given duration
    pub fn advance(&self, duration: Duration) {
        *self.current.lock() += duration;
        let delta = ChronoDuration::from_std(duration).unwrap_or_else(|_| ChronoDuration::zero());
        let mut wall = self.wall.lock();
        *wall += delta;
    }

    /// Pin the wall clock to a specific timestamp
    pub fn set_wall(&self, wall: DateTime<FixedOffset>) {
        *self.wall.lock() = wall;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }

    fn wall(&self) -> DateTime<FixedOffset> {
        *self.wall.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
