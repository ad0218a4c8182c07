//! # Relayd Core Configuration Errors
//!
//! Defines error types for configuration loading, merging and directory
//! ingestion. [`ConfigError::SourceNotFound`] and [`ConfigError::MergeShape`]
//! are fatal for the orchestration run; [`ConfigError::Parse`] is recoverable
//! (the offending source is skipped with a warning).

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

/// The shape class of a configuration value, used in merge diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A key/value mapping
    Mapping,
    /// An ordered sequence
    Sequence,
    /// A string, number or boolean
    Scalar,
    /// An explicit null (or an absent value)
    Null,
}

impl ValueShape {
    /// Classify a configuration value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueShape::Mapping,
            Value::Array(_) => ValueShape::Sequence,
            Value::Null => ValueShape::Null,
            _ => ValueShape::Scalar,
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueShape::Mapping => "mapping",
            ValueShape::Sequence => "sequence",
            ValueShape::Scalar => "scalar",
            ValueShape::Null => "null",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A named configuration path (file or directory) does not exist.
    #[error("Configuration source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// A source exists but could not be parsed into a configuration tree.
    #[error("Failed to parse configuration from '{}': {message}", path.display())]
    Parse {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Two sources disagree on the shape of the same key. This signals a
    /// configuration defect (e.g. a list-valued and an object-valued
    /// override for the same key) and aborts the merge.
    #[error("Cannot merge {source_shape} into {target_shape} at '{key_path}'")]
    MergeShape {
        key_path: String,
        target_shape: ValueShape,
        source_shape: ValueShape,
    },

    /// An I/O failure while enumerating a configuration directory.
    #[error("Failed to read configuration directory '{}': {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Whether the error is recoverable at the source level: the caller may
    /// log a warning, treat the source as absent, and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConfigError::Parse { .. })
    }
}
