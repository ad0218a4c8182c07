//! # Relayd Core Plugin System Errors
//!
//! Defines error types for plugin discovery. Every variant is recoverable
//! at its own granularity: a scan error skips one directory, a manifest
//! error skips one unit. Neither aborts the remaining scan.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    /// A plugin directory could not be enumerated.
    #[error("Failed to scan plugin directory '{}': {message}", path.display())]
    Scan {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A discovered unit's manifest is malformed.
    #[error("Plugin manifest error for '{}': {message}", path.display())]
    Manifest {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A manifest declares a category outside the fixed set.
    #[error("Plugin '{name}' in '{}' declares unknown capability category '{category}'", path.display())]
    UnknownCategory {
        name: String,
        path: PathBuf,
        category: String,
    },
}
