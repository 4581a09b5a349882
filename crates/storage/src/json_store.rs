// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Small JSON documents on disk.
//!
//! Reads never fail: a missing, unreadable or corrupt file yields the
//! caller's default. Writes propagate errors.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors from JSON store writes
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io { path: path.to_path_buf(), source }
    }
}

/// Read and parse `path`, falling back to `default` on any failure.
pub fn read_json<T: DeserializeOwned>(path: &Path, default: T) -> T {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "unreadable JSON file, using default");
            }
            return default;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "corrupt JSON file, using default");
            default
        }
    }
}

/// Write `value` as pretty JSON directly onto `path`.
///
/// Not atomic: a concurrent reader may see a torn file. Only for small
/// documents whose readers fall back to defaults on parse failure.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    ensure_parent(path)?;
    fs::write(path, json.as_bytes()).map_err(|e| StoreError::io(path, e))
}

/// Write `value` as pretty JSON to a temporary sibling, then rename it onto `path`.
///
/// Readers observe either the previous complete file or the new one.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    ensure_parent(path)?;

    let tmp_path = tmp_sibling(path);
    let mut file = File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
    file.write_all(json.as_bytes()).map_err(|e| StoreError::io(&tmp_path, e))?;
    file.sync_all().map_err(|e| StoreError::io(&tmp_path, e))?;
    drop(file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::io(path, e)
    })
}

/// `job_snapshot.json` → `job_snapshot.json.tmp`
pub(crate) fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "json_store_tests.rs"]
mod tests;
