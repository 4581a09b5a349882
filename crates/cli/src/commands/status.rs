// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw status` - the job dashboard
//!
//! Reads the snapshot and track-state files directly; the daemon does not
//! need to be running to look at the last published snapshot.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use jw_core::JobStatus;
use jw_daemon::Config;
use jw_dashboard::{Dashboard, Filters, PresentedRow, REFRESH_INTERVAL};
use jw_storage::{SnapshotStore, TrackStateStore};

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, format_secs, or_dash, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Only jobs whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only jobs with these statuses (comma separated or repeated)
    #[arg(long = "status", value_delimiter = ',', value_parser = parse_status)]
    pub statuses: Vec<JobStatus>,

    /// Hide jobs that are not tracked
    #[arg(long)]
    pub tracked_only: bool,

    /// Show one job with its step list
    #[arg(long, value_name = "JOB")]
    pub job: Option<String>,

    /// Redraw every few seconds until interrupted
    #[arg(short, long)]
    pub watch: bool,
}

pub(crate) fn parse_status(text: &str) -> Result<JobStatus, String> {
    JobStatus::from_text(text).ok_or_else(|| {
        let names: Vec<String> = JobStatus::ALL.iter().map(|s| s.to_string()).collect();
        format!("unknown status '{text}' (expected one of {})", names.join(", "))
    })
}

pub(crate) fn filters(args: &StatusArgs) -> Filters {
    let mut filters =
        Filters::default().statuses(args.statuses.iter().copied()).tracked_only(args.tracked_only);
    if let Some(search) = &args.search {
        filters = filters.search(search.clone());
    }
    filters
}

pub async fn handle(args: StatusArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let mut dashboard = Dashboard::new(
        SnapshotStore::new(config.snapshot_path.clone()),
        TrackStateStore::new(config.track_state_path.clone()),
    );
    dashboard.filters = filters(&args);

    if !args.watch {
        dashboard.refresh();
        return show(&dashboard, &args, format);
    }

    loop {
        dashboard.refresh();
        if format == OutputFormat::Text {
            // Clear screen and home the cursor
            print!("\x1b[2J\x1b[H");
        }
        show(&dashboard, &args, format)?;
        tokio::select! {
            _ = tokio::time::sleep(REFRESH_INTERVAL) => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn show(dashboard: &Dashboard, args: &StatusArgs, format: OutputFormat) -> Result<()> {
    if let Some(name) = &args.job {
        let detail = dashboard.job_detail(name).ok_or_else(|| {
            ExitError::new(1, format!("Job '{name}' is not in the current snapshot"))
        })?;
        return format_or_json(format, &detail, || println!("{detail}"));
    }

    let rows = dashboard.visible_rows();
    let summary = dashboard.summary();
    let obj = serde_json::json!({
        "summary": summary,
        "jobs": rows,
    });
    format_or_json(format, &obj, || {
        render_dashboard(dashboard, &mut std::io::stdout());
    })
}

/// Summary line, then the filtered job table.
pub(crate) fn render_dashboard(dashboard: &Dashboard, out: &mut dyn Write) {
    let _ = writeln!(out, "{}", color::context(&dashboard.summary().to_string()));
    let _ = writeln!(out);

    let rows = dashboard.visible_rows();
    if rows.is_empty() {
        let msg = if dashboard.rows().is_empty() {
            "No jobs in snapshot."
        } else {
            "No jobs match the current filters."
        };
        let _ = writeln!(out, "{msg}");
        return;
    }
    job_table(&rows).render(out);
}

pub(crate) fn job_table(rows: &[&PresentedRow]) -> Table {
    let mut table = Table::new(vec![
        Column::left("JOB").with_max(32),
        Column::left("USER").with_max(12),
        Column::status("STATUS"),
        Column::left("LAST START"),
        Column::right("RUNTIME"),
        Column::right("EXPECTED"),
        Column::right("LATE BY"),
        Column::left("STEP").with_max(28),
        Column::left("NEXT RUN"),
        Column::muted("TRACKED"),
    ]);
    for row in rows {
        let record = &row.record;
        table.row(vec![
            record.job_name.clone(),
            or_dash(Some(&record.job_user)),
            record.status.to_string(),
            or_dash(record.last_start.as_deref()),
            format_secs(record.runtime_sec),
            format_secs(Some(record.expected_duration_sec).filter(|s| *s > 0)),
            format_secs(Some(record.late_by_sec).filter(|s| *s > 0)),
            or_dash(Some(&record.current_step)),
            or_dash(record.next_run.as_deref()),
            if row.tracked { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
