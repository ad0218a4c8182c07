//! Parsing of a single configuration source into a tree.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::error::ConfigError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }

    /// Parse source text in this format into a configuration tree.
    fn parse(&self, path: &Path, content: &str) -> Result<Value, ConfigError> {
        match self {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: format!("invalid JSON: {}", e),
                    source: Some(Box::new(e)),
                })
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: format!("invalid YAML: {}", e),
                    source: Some(Box::new(e)),
                })
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                let table: toml::Value =
                    toml::from_str(content).map_err(|e| ConfigError::Parse {
                        path: path.to_path_buf(),
                        message: format!("invalid TOML: {}", e),
                        source: Some(Box::new(e)),
                    })?;
                serde_json::to_value(table).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: format!("TOML value not representable as a tree: {}", e),
                    source: Some(Box::new(e)),
                })
            }
        }
    }
}

/// Load one configuration source into a tree.
///
/// A missing file is [`ConfigError::SourceNotFound`]; an unrecognized
/// extension or malformed content is [`ConfigError::Parse`]. Parse failures
/// are recoverable: the caller logs a warning and treats the source as
/// absent rather than aborting the run.
pub fn load_source(path: &Path) -> Result<Value, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::Parse {
        path: path.to_path_buf(),
        message: "unrecognized configuration file extension".to_string(),
        source: None,
    })?;

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: format!("unreadable source: {}", e),
        source: Some(Box::new(e)),
    })?;

    format.parse(path, &content)
}
