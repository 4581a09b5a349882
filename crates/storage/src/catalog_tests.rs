// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use tempfile::tempdir;
use yare::parameterized;

fn write_catalog(name: &str, content: &str) -> (tempfile::TempDir, CatalogLoader) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, CatalogLoader::new(path))
}

fn row(cells: Value) -> Option<JobCatalogRow> {
    match cells {
        Value::Object(map) => normalize_row(map),
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn missing_source_is_an_error() {
    let dir = tempdir().unwrap();
    let loader = CatalogLoader::new(dir.path().join("jobs.toml"));
    assert!(matches!(loader.load(), Err(CatalogError::Missing(_))));
}

#[test]
fn unknown_extension_is_rejected() {
    let (_dir, loader) = write_catalog("jobs.xlsx", "binary");
    assert!(matches!(loader.load(), Err(CatalogError::UnsupportedFormat(_))));
}

#[test]
fn corrupt_toml_is_a_parse_error() {
    let (_dir, loader) = write_catalog("jobs.toml", "[[jobs]\njob_name = ");
    assert!(matches!(loader.load(), Err(CatalogError::Parse { .. })));
}

#[test]
fn json_scalar_document_is_a_parse_error() {
    let (_dir, loader) = write_catalog("jobs.json", "42");
    assert!(matches!(loader.load(), Err(CatalogError::Parse { .. })));
}

#[test]
fn loads_toml_table_array_in_order() {
    let (_dir, loader) = write_catalog(
        "jobs.toml",
        r#"
[[jobs]]
job_name = "Z_FI_01"
job_user = "BATCH_FI"
group = "Finance"
expected_duration_sec = 300
enabled = "Y"

[[jobs]]
job_name = "Z_FI_02"
enabled = "N"

[[jobs]]
job_name = "Z_MM_01"
"#,
    );

    let rows = loader.load().unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.job_name.as_str()).collect();
    assert_eq!(names, ["Z_FI_01", "Z_FI_02", "Z_MM_01"]);

    assert_eq!(rows[0].job_user, "BATCH_FI");
    assert_eq!(rows[0].group, "Finance");
    assert_eq!(rows[0].expected_duration_sec, 300);
    assert!(rows[0].enabled);
    assert!(!rows[1].enabled);
    assert_eq!(rows[2], JobCatalogRow::new("Z_MM_01"));
}

#[test]
fn loads_json_array_and_jobs_object() {
    let (_dir, loader) =
        write_catalog("jobs.json", r#"[{"job_name": "Z_A"}, {"job_name": "Z_B", "enabled": false}]"#);
    let rows = loader.load().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(!rows[1].enabled);

    let (_dir, loader) = write_catalog("jobs.json", r#"{"jobs": [{"job_name": "Z_C"}]}"#);
    assert_eq!(loader.load().unwrap()[0].job_name, "Z_C");
}

#[test]
fn blank_and_duplicate_names_are_dropped() {
    let (_dir, loader) = write_catalog(
        "jobs.json",
        r#"[
            {"job_name": "  Z_FI_01  ", "expected_duration_sec": 300},
            {"job_name": "   "},
            {"job_user": "NOBODY"},
            {"job_name": "Z_FI_01", "expected_duration_sec": 999},
            "not a row"
        ]"#,
    );
    let rows = loader.load().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].job_name, "Z_FI_01");
    assert_eq!(rows[0].expected_duration_sec, 300);
}

#[test]
fn empty_catalog_is_not_an_error() {
    let (_dir, loader) = write_catalog("jobs.json", "[]");
    assert!(loader.load().unwrap().is_empty());
}

#[parameterized(
    plain = { "job_name", "job_name" },
    upper = { "JOB_NAME", "job_name" },
    padded = { "  Enabled ", "enabled" },
    spaced = { "Expected Duration Sec", "expected_duration_sec" },
    tabbed = { "job\tuser", "job_user" },
)]
fn column_names_are_normalized(raw: &str, expected: &str) {
    assert_eq!(normalize_column(raw), expected);
}

#[test]
fn headers_with_odd_casing_still_map() {
    let row = row(json!({"Job Name": "Z_X", " GROUP ": "Ops", "ENABLED": "no"})).unwrap();
    assert_eq!(row.job_name, "Z_X");
    assert_eq!(row.group, "Ops");
    assert!(!row.enabled);
}

#[parameterized(
    y = { json!("Y"), true },
    yes_lower = { json!("yes"), true },
    true_mixed = { json!("True"), true },
    one_text = { json!("1"), true },
    padded = { json!(" y "), true },
    blank = { json!(""), true },
    null = { Value::Null, true },
    bool_true = { json!(true), true },
    bool_false = { json!(false), false },
    one = { json!(1), true },
    zero = { json!(0), false },
    n = { json!("N"), false },
    no = { json!("no"), false },
    other = { json!("maybe"), false },
)]
fn enabled_coercion(cell: Value, expected: bool) {
    let row = row(json!({"job_name": "Z_X", "enabled": cell})).unwrap();
    assert_eq!(row.enabled, expected);
}

#[parameterized(
    int = { json!(300), 300 },
    float = { json!(299.9), 299 },
    text = { json!(" 120 "), 120 },
    text_float = { json!("60.5"), 60 },
    negative = { json!(-5), 0 },
    garbage = { json!("soon"), 0 },
    null = { Value::Null, 0 },
)]
fn expected_duration_coercion(cell: Value, expected: u64) {
    let row = row(json!({"job_name": "Z_X", "expected_duration_sec": cell})).unwrap();
    assert_eq!(row.expected_duration_sec, expected);
}

#[test]
fn numeric_job_name_is_kept_as_text() {
    let row = row(json!({"job_name": 4711})).unwrap();
    assert_eq!(row.job_name, "4711");
}
