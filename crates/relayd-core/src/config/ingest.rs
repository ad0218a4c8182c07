//! Deterministic ingestion of a directory of configuration fragments.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::error::ConfigError;
use crate::config::loader::load_source;
use crate::config::merge::merge;

/// Fold every fragment in `dir` into `target`.
///
/// Regular files are processed in lexicographic order by filename, so the
/// same directory contents always yield the same merge order regardless of
/// filesystem listing order. Hidden files (names starting with `.`) are
/// skipped with a debug note. A fragment that fails to parse is logged at
/// warn level and skipped; it never aborts ingestion of the rest of the
/// directory. Merge shape defects propagate, they are structural errors.
pub fn ingest_directory(dir: &Path, target: Value) -> Result<Value, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::SourceNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|e| ConfigError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut fragments: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_hidden(&path) {
            log::debug!("Skipping hidden configuration fragment: {}", path.display());
            continue;
        }
        fragments.push(path);
    }
    fragments.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

    let mut merged = target;
    for path in fragments {
        match load_source(&path) {
            Ok(fragment) => {
                merged = merge(merged, fragment)?;
            }
            Err(error) => {
                // Covers parse failures and fragments vanishing mid-scan;
                // the remaining fragments still get ingested.
                log::warn!("Skipping configuration fragment: {}", error);
            }
        }
    }
    Ok(merged)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
