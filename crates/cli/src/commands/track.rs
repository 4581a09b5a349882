// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw track` - edit the track-state overlay
//!
//! All names on one command line become one batch: the overlay file is
//! written once. The agent picks the change up at its next cycle.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use jw_core::{reconcile, JobCatalogRow, TrackEdit, TrackState};
use jw_daemon::Config;
use jw_dashboard::Dashboard;
use jw_storage::{CatalogLoader, SnapshotStore, TrackStateStore};
use serde::Serialize;

use crate::color;
use crate::output::{format_or_json, format_secs, handle_list, or_dash, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Job names to change; with no names, list the catalog
    pub names: Vec<String>,

    /// Stop tracking the named jobs
    #[arg(long, conflicts_with = "on")]
    pub off: bool,

    /// Track the named jobs (the default)
    #[arg(long)]
    pub on: bool,
}

/// A catalog row with its overlay flag and whether the agent will poll it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CatalogEntry {
    #[serde(flatten)]
    pub row: JobCatalogRow,
    pub tracked: bool,
    pub polled: bool,
}

pub async fn handle(args: TrackArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    if args.names.is_empty() {
        return list(&config, format);
    }

    let tracked = args.on || !args.off;
    let edits = edits_for(&args.names, tracked);
    let mut dashboard = Dashboard::new(
        SnapshotStore::new(config.snapshot_path.clone()),
        TrackStateStore::new(config.track_state_path.clone()),
    );
    let applied = dashboard.submit_track_edits(&edits)?;

    let obj = serde_json::json!({
        "tracked": tracked,
        "jobs": args.names,
        "applied": applied,
    });
    format_or_json(format, &obj, || {
        let verb = if tracked { "Tracking" } else { "Untracked" };
        for name in &args.names {
            println!("{} {}", verb, color::header(name));
        }
        if applied == 0 {
            println!("{}", color::muted("(no change)"));
        }
    })
}

/// One edit per distinct name, in first-seen order.
pub(crate) fn edits_for(names: &[String], tracked: bool) -> Vec<TrackEdit> {
    let mut seen = std::collections::BTreeSet::new();
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty() && seen.insert(name.to_string()))
        .map(|name| TrackEdit::new(name, tracked))
        .collect()
}

fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let catalog = CatalogLoader::new(config.catalog_path.clone()).load()?;
    let overlay = TrackStateStore::new(config.track_state_path.clone()).load();
    let entries = catalog_entries(&catalog, &overlay);

    handle_list(format, &entries, "Catalog is empty.", |items, out| {
        render_catalog(items, out);
    })
}

pub(crate) fn catalog_entries(catalog: &[JobCatalogRow], overlay: &TrackState) -> Vec<CatalogEntry> {
    let polled: std::collections::BTreeSet<String> =
        reconcile(catalog, overlay).into_iter().map(|job| job.job_name).collect();
    catalog
        .iter()
        .map(|row| CatalogEntry {
            tracked: overlay.is_tracked(&row.job_name),
            polled: polled.contains(&row.job_name),
            row: row.clone(),
        })
        .collect()
}

fn render_catalog(items: &[CatalogEntry], out: &mut dyn Write) {
    let mut table = Table::new(vec![
        Column::left("JOB").with_max(32),
        Column::left("USER").with_max(12),
        Column::left("GROUP").with_max(16),
        Column::right("EXPECTED"),
        Column::left("ENABLED"),
        Column::left("TRACKED"),
        Column::muted("POLLED"),
    ]);
    let yes_no = |b: bool| if b { "yes" } else { "no" }.to_string();
    for entry in items {
        table.row(vec![
            entry.row.job_name.clone(),
            or_dash(Some(&entry.row.job_user)),
            or_dash(Some(&entry.row.group)),
            format_secs(Some(entry.row.expected_duration_sec).filter(|s| *s > 0)),
            yes_no(entry.row.enabled),
            yes_no(entry.tracked),
            yes_no(entry.polled),
        ]);
    }
    table.render(out);
}

#[cfg(test)]
#[path = "track_tests.rs"]
mod tests;
