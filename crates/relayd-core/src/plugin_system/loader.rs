//! Plugin discovery: ordered directory scanning, manifest parsing, and
//! per-category blacklist filtering.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::config::loader::ConfigFormat;
use crate::plugin_system::blacklist::Blacklist;
use crate::plugin_system::descriptor::{Category, OptionSpec, PluginDescriptor};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registry::PluginRegistry;

// --- Intermediate structs for deserialization ---

#[derive(Deserialize, Debug)]
struct RawOptionSpec {
    name: String,
    #[serde(default)]
    default: Value,
    #[serde(default)]
    help: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawManifest {
    name: String,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    options: Vec<RawOptionSpec>,
}

// --- End Intermediate structs ---

/// The seam to the external "loadable unit" mechanism.
///
/// A source turns one directory into a set of per-unit discovery outcomes.
/// The loader only defines ordering and filtering policy on top of it.
pub trait PluginSource {
    /// Discover every candidate unit in `dir`.
    ///
    /// The outer `Err` means the directory itself could not be scanned; an
    /// inner `Err` is a single malformed unit. Units must be returned in a
    /// deterministic order.
    fn discover(
        &self,
        dir: &Path,
    ) -> Result<Vec<Result<PluginDescriptor, PluginSystemError>>, PluginSystemError>;
}

/// Discovers plugins from manifest files.
///
/// Every regular file in the directory with a recognized configuration
/// extension is treated as one unit's manifest, declaring the plugin's
/// name, capability categories, optional version and option schema.
#[derive(Debug, Default)]
pub struct ManifestSource;

impl ManifestSource {
    /// Create a manifest-file plugin source
    pub fn new() -> Self {
        Self
    }

    fn parse_manifest(path: &Path) -> Result<PluginDescriptor, PluginSystemError> {
        let content = fs::read_to_string(path).map_err(|e| PluginSystemError::Manifest {
            path: path.to_path_buf(),
            message: format!("unreadable manifest: {}", e),
            source: Some(Box::new(e)),
        })?;

        let raw: RawManifest = match ConfigFormat::from_path(path) {
            Some(ConfigFormat::Json) => {
                serde_json::from_str(&content).map_err(|e| PluginSystemError::Manifest {
                    path: path.to_path_buf(),
                    message: format!("invalid JSON manifest: {}", e),
                    source: Some(Box::new(e)),
                })?
            }
            #[cfg(feature = "yaml-config")]
            Some(ConfigFormat::Yaml) => {
                serde_yaml::from_str(&content).map_err(|e| PluginSystemError::Manifest {
                    path: path.to_path_buf(),
                    message: format!("invalid YAML manifest: {}", e),
                    source: Some(Box::new(e)),
                })?
            }
            #[cfg(feature = "toml-config")]
            Some(ConfigFormat::Toml) => {
                toml::from_str(&content).map_err(|e| PluginSystemError::Manifest {
                    path: path.to_path_buf(),
                    message: format!("invalid TOML manifest: {}", e),
                    source: Some(Box::new(e)),
                })?
            }
            None => {
                return Err(PluginSystemError::Manifest {
                    path: path.to_path_buf(),
                    message: "unrecognized manifest extension".to_string(),
                    source: None,
                });
            }
        };

        let mut categories = BTreeSet::new();
        for category in &raw.categories {
            let category = Category::from_str(category).map_err(|_| {
                PluginSystemError::UnknownCategory {
                    name: raw.name.clone(),
                    path: path.to_path_buf(),
                    category: category.clone(),
                }
            })?;
            categories.insert(category);
        }
        if categories.is_empty() {
            return Err(PluginSystemError::Manifest {
                path: path.to_path_buf(),
                message: format!("plugin '{}' declares no capability categories", raw.name),
                source: None,
            });
        }

        let version = match raw.version {
            Some(version) => Some(semver::Version::parse(&version).map_err(|e| {
                PluginSystemError::Manifest {
                    path: path.to_path_buf(),
                    message: format!("invalid plugin version '{}': {}", version, e),
                    source: Some(Box::new(e)),
                }
            })?),
            None => None,
        };

        Ok(PluginDescriptor {
            name: raw.name,
            source: path.to_path_buf(),
            categories,
            version,
            options: raw
                .options
                .into_iter()
                .map(|raw| OptionSpec {
                    name: raw.name,
                    default: raw.default,
                    help: raw.help,
                })
                .collect(),
            description: raw.description,
        })
    }
}

impl PluginSource for ManifestSource {
    fn discover(
        &self,
        dir: &Path,
    ) -> Result<Vec<Result<PluginDescriptor, PluginSystemError>>, PluginSystemError> {
        if !dir.is_dir() {
            return Err(PluginSystemError::Scan {
                path: dir.to_path_buf(),
                message: "not a directory".to_string(),
                source: None,
            });
        }
        let entries = fs::read_dir(dir).map_err(|e| PluginSystemError::Scan {
            path: dir.to_path_buf(),
            message: format!("{}", e),
            source: Some(e),
        })?;

        let mut manifests: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && ConfigFormat::from_path(path).is_some())
            .collect();
        manifests.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

        Ok(manifests
            .iter()
            .map(|path| Self::parse_manifest(path))
            .collect())
    }
}

/// Outcome report for one discovery pass.
///
/// Discovery never aborts on individual failures; everything that was
/// skipped or rejected is aggregated here alongside the registry mutation.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// `(category, name)` pairs registered, in discovery order
    pub registered: Vec<(Category, String)>,
    /// `(category, name)` pairs skipped because of the blacklist
    pub blacklisted: Vec<(Category, String)>,
    /// Per-directory and per-unit failures
    pub errors: Vec<PluginSystemError>,
}

impl DiscoveryReport {
    /// Whether discovery completed without any skipped directory or unit.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Scans plugin directories and fills the registry.
pub struct PluginLoader<S> {
    source: S,
}

impl<S: PluginSource> PluginLoader<S> {
    /// Create a loader over the given plugin source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Scan `dirs` in the order given and register every discovered unit.
    ///
    /// Later directories' units with the same `(category, name)` overwrite
    /// earlier ones. A blacklisted name is skipped for that category only;
    /// the unit still registers for other categories it implements. Errors
    /// on individual directories or units are logged and recorded in the
    /// report, never aborting the remaining scan.
    pub fn load_all(
        &self,
        dirs: &[PathBuf],
        blacklist: &Blacklist,
        registry: &mut PluginRegistry,
    ) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();

        for dir in dirs {
            log::debug!("Scanning plugin directory: {}", dir.display());
            let outcomes = match self.source.discover(dir) {
                Ok(outcomes) => outcomes,
                Err(error) => {
                    log::warn!("Plugin directory skipped: {}", error);
                    report.errors.push(error);
                    continue;
                }
            };

            for outcome in outcomes {
                let descriptor = match outcome {
                    Ok(descriptor) => Arc::new(descriptor),
                    Err(error) => {
                        log::warn!("Plugin unit skipped: {}", error);
                        report.errors.push(error);
                        continue;
                    }
                };

                for category in descriptor.categories.iter().copied() {
                    if blacklist.contains(category, &descriptor.name) {
                        log::info!(
                            "Plugin '{}' is blacklisted for category '{}'; skipping registration",
                            descriptor.name,
                            category
                        );
                        report
                            .blacklisted
                            .push((category, descriptor.name.clone()));
                        continue;
                    }
                    registry.register_for(category, Arc::clone(&descriptor));
                    report.registered.push((category, descriptor.name.clone()));
                }
            }
        }

        report
    }
}
