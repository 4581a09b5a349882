// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job catalog loader.
//!
//! The catalog is a hand-maintained table of jobs, stored either as TOML
//! (`[[jobs]]` table array) or JSON (an array of row objects, or an object
//! with a `jobs` array). Column names are matched case- and
//! whitespace-insensitively. Only `job_name` carries meaning on its own; every
//! other column falls back to a default, and rows with a blank name are
//! dropped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use jw_core::JobCatalogRow;
use serde_json::{Map, Value};
use thiserror::Error;

/// Tokens accepted as "enabled", compared case-insensitively
const TRUTHY: [&str; 4] = ["Y", "YES", "TRUE", "1"];

/// Errors from loading the catalog source
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog source not found: {0}")]
    Missing(PathBuf),
    #[error("IO error reading catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unsupported catalog format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}

impl CatalogError {
    fn parse(path: &Path, message: impl std::fmt::Display) -> Self {
        CatalogError::Parse { path: path.to_path_buf(), message: message.to_string() }
    }
}

/// Reads and normalizes the catalog source at a fixed path.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog in source order.
    ///
    /// Fails when the source is missing, unreadable or not a table of rows.
    /// Individual odd cells never fail the load.
    pub fn load(&self) -> Result<Vec<JobCatalogRow>, CatalogError> {
        let path = self.path.as_path();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CatalogError::Missing(path.to_path_buf())
            } else {
                CatalogError::Io { path: path.to_path_buf(), source: e }
            }
        })?;

        let document = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => {
                serde_json::from_str::<Value>(&content).map_err(|e| CatalogError::parse(path, e))?
            }
            Some(ext) if ext.eq_ignore_ascii_case("toml") => {
                let table: toml::Value =
                    toml::from_str(&content).map_err(|e| CatalogError::parse(path, e))?;
                serde_json::to_value(table).map_err(|e| CatalogError::parse(path, e))?
            }
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        let rows = parse_rows(path, document)?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "loaded job catalog");
        Ok(rows)
    }
}

/// Normalize raw rows into catalog rows, dropping blank and duplicate names.
fn parse_rows(path: &Path, document: Value) -> Result<Vec<JobCatalogRow>, CatalogError> {
    let raw_rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("jobs") {
            Some(Value::Array(rows)) => rows,
            Some(_) => return Err(CatalogError::parse(path, "`jobs` must be an array of rows")),
            None => return Err(CatalogError::parse(path, "expected a `jobs` array")),
        },
        _ => return Err(CatalogError::parse(path, "expected an array of job rows")),
    };

    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(raw_rows.len());
    for (index, raw) in raw_rows.into_iter().enumerate() {
        let Value::Object(cells) = raw else {
            tracing::warn!(path = %path.display(), index, "skipping catalog row that is not a table");
            continue;
        };
        let Some(row) = normalize_row(cells) else {
            continue;
        };
        if !seen.insert(row.job_name.clone()) {
            tracing::warn!(
                path = %path.display(),
                job_name = %row.job_name,
                "duplicate catalog row, keeping the first"
            );
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// One raw row to a catalog row; `None` when the job name is blank.
pub(crate) fn normalize_row(cells: Map<String, Value>) -> Option<JobCatalogRow> {
    let mut row = JobCatalogRow::new(String::new());
    for (key, value) in cells {
        match normalize_column(&key).as_str() {
            "job_name" => row.job_name = text_cell(&value),
            "job_user" => row.job_user = text_cell(&value),
            "group" => row.group = text_cell(&value),
            "expected_duration_sec" => row.expected_duration_sec = duration_cell(&value),
            "enabled" => row.enabled = enabled_cell(&value),
            _ => {}
        }
    }
    if row.job_name.is_empty() {
        return None;
    }
    Some(row)
}

/// `" Job Name "` → `"job_name"`
pub(crate) fn normalize_column(key: &str) -> String {
    key.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join("_")
}

fn text_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Whole seconds; anything negative or unparseable is 0.
fn duration_cell(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(float_secs)).unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| s.parse::<f64>().ok().map(float_secs)).unwrap_or(0)
        }
        _ => 0,
    }
}

fn float_secs(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 {
        f as u64
    } else {
        0
    }
}

/// Blank or absent cells count as enabled.
fn enabled_cell(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64() == Some(1),
        Value::String(s) => {
            let token = s.trim();
            token.is_empty() || TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(token))
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
