// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use yare::parameterized;

use super::*;

#[parameterized(
    seconds = { 42, "42s" },
    minutes = { 125, "2m 5s" },
    hours = { 3_725, "1h 2m 5s" },
    days = { 90_061, "1d 1h 1m" },
)]
fn uptime_formatting(secs: u64, expected: &str) {
    assert_eq!(format_uptime(secs), expected);
}
