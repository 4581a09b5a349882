// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp and duration formatting.

/// Combine backend date (`YYYYMMDD`) and time (`HHMMSS`) tokens into ISO-8601.
///
/// - date + time → `YYYY-MM-DDTHH:MM:SS`
/// - date only (time blank or malformed) → `YYYY-MM-DD`
/// - blank or malformed date → `None`
pub fn backend_timestamp(date: &str, time: &str) -> Option<String> {
    let date = date.trim();
    let time = time.trim();
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (yyyy, mm, dd) = (&date[0..4], &date[4..6], &date[6..8]);
    if time.len() >= 6 && time.bytes().all(|b| b.is_ascii_digit()) {
        let (hh, mi, ss) = (&time[0..2], &time[2..4], &time[4..6]);
        return Some(format!("{yyyy}-{mm}-{dd}T{hh}:{mi}:{ss}"));
    }
    Some(format!("{yyyy}-{mm}-{dd}"))
}

/// Format elapsed seconds compactly: `45s`, `3m`, `2h5m`, `1d`.
pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        let mins = (secs % 3600) / 60;
        if mins == 0 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}h{}m", secs / 3600, mins)
        }
    } else {
        format!("{}d", secs / 86_400)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
