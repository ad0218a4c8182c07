//! The orchestration state machine.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::activation::engine::ActivationEngine;
use crate::activation::error::ActivationError;
use crate::activation::CategoryBuckets;
use crate::config::ingest::ingest_directory;
use crate::config::loader::load_source;
use crate::config::merge::merge;
use crate::orchestrator::error::{OrchestratorError, Result};
use crate::orchestrator::options::Options;
use crate::plugin_system::blacklist::Blacklist;
use crate::plugin_system::loader::{DiscoveryReport, ManifestSource, PluginLoader};
use crate::plugin_system::registry::PluginRegistry;

/// Position of an orchestration run in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Init,
    ConfigResolved,
    PluginsDiscovered,
    Activated,
    Ready,
    AbortedNoActivation,
    AbortedConfigError,
}

/// Everything handed to the runtime core when orchestration reaches Ready.
#[derive(Debug)]
pub struct Startup {
    /// The merged configuration tree
    pub config: Value,
    /// The `logging` section, passed through untouched (empty in debug mode)
    pub logging: Map<String, Value>,
    /// Per-category activation lists
    pub buckets: CategoryBuckets,
    /// The completed registry, for listing and diagnostics
    pub registry: PluginRegistry,
    /// What discovery skipped or rejected
    pub discovery: DiscoveryReport,
    /// Per-entry activation failures (already logged)
    pub activation_errors: Vec<ActivationError>,
}

/// Sequences one startup run.
///
/// The steps must be invoked in order: [`resolve_config`], then
/// [`discover_plugins`], then [`activate`], then [`into_startup`];
/// [`run`] composes all four. Each run owns its registry and merged tree,
/// never shared with a concurrent run — the daemon reconfigures by
/// re-running the whole sequence.
///
/// [`resolve_config`]: Orchestrator::resolve_config
/// [`discover_plugins`]: Orchestrator::discover_plugins
/// [`activate`]: Orchestrator::activate
/// [`into_startup`]: Orchestrator::into_startup
/// [`run`]: Orchestrator::run
#[derive(Debug)]
pub struct Orchestrator {
    options: Options,
    state: OrchestratorState,
    config: Value,
    registry: PluginRegistry,
    discovery: DiscoveryReport,
    buckets: CategoryBuckets,
    activation_errors: Vec<ActivationError>,
}

impl Orchestrator {
    /// Create a new run over the given options
    pub fn new(options: Options) -> Self {
        Self {
            options,
            state: OrchestratorState::Init,
            config: Value::Null,
            registry: PluginRegistry::new(),
            discovery: DiscoveryReport::default(),
            buckets: CategoryBuckets::default(),
            activation_errors: Vec::new(),
        }
    }

    /// The current state of the run
    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    /// The merged configuration tree (null before `resolve_config`)
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// The plugin registry (empty before `discover_plugins`)
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// The discovery report (empty before `discover_plugins`)
    pub fn discovery(&self) -> &DiscoveryReport {
        &self.discovery
    }

    /// The activation buckets (empty before `activate`)
    pub fn buckets(&self) -> &CategoryBuckets {
        &self.buckets
    }

    fn expect_state(&self, step: &'static str, expected: OrchestratorState) -> Result<()> {
        if self.state != expected {
            return Err(OrchestratorError::Lifecycle {
                step,
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Merge all configuration sources in program order, then fold in the
    /// configuration directory if one was given.
    ///
    /// A missing source path (file or directory) is a fatal usage error. A
    /// source that exists but fails to parse is logged at warn level and
    /// treated as absent.
    pub fn resolve_config(&mut self) -> Result<()> {
        self.expect_state("resolve_config", OrchestratorState::Init)?;

        let mut merged = Value::Null;
        let sources = self.options.config_sources.clone();
        for path in &sources {
            match load_source(path) {
                Ok(tree) => {
                    merged = match merge(merged, tree) {
                        Ok(merged) => merged,
                        Err(error) => return self.abort_config(error),
                    };
                }
                Err(error) if error.is_recoverable() => {
                    log::warn!("Configuration source treated as absent: {}", error);
                }
                Err(error) => return self.abort_config(error),
            }
        }

        if let Some(dir) = self.options.config_directory.clone() {
            merged = match ingest_directory(&dir, merged) {
                Ok(merged) => merged,
                Err(error) => return self.abort_config(error),
            };
        }

        self.config = merged;
        self.state = OrchestratorState::ConfigResolved;
        log::debug!("Configuration resolved from {} source(s)", self.options.config_sources.len());
        Ok(())
    }

    /// Scan the union of configured and CLI-supplied plugin directories,
    /// against the blacklist extracted from the configuration.
    pub fn discover_plugins(&mut self) -> Result<&DiscoveryReport> {
        self.expect_state("discover_plugins", OrchestratorState::ConfigResolved)?;

        let mut dirs = self.configured_plugin_directories();
        dirs.extend(self.options.plugin_directories.iter().cloned());

        let blacklist = Blacklist::from_config(&self.config);
        let loader = PluginLoader::new(ManifestSource::new());
        self.discovery = loader.load_all(&dirs, &blacklist, &mut self.registry);

        self.state = OrchestratorState::PluginsDiscovered;
        log::info!(
            "Plugin discovery complete: {} registration(s), {} blacklisted, {} error(s)",
            self.discovery.registered.len(),
            self.discovery.blacklisted.len(),
            self.discovery.errors.len()
        );
        Ok(&self.discovery)
    }

    /// Run the activation engine once per capability category.
    ///
    /// Per-entry failures are logged and collected; they never abort the
    /// remaining entries or categories.
    pub fn activate(&mut self) -> Result<&CategoryBuckets> {
        self.expect_state("activate", OrchestratorState::PluginsDiscovered)?;

        let engine = ActivationEngine::new(&self.registry);
        let (buckets, errors) = engine.activate_all(&self.config);
        for error in &errors {
            log::warn!("Activation entry skipped: {}", error);
        }
        self.buckets = buckets;
        self.activation_errors = errors;

        self.state = OrchestratorState::Activated;
        Ok(&self.buckets)
    }

    /// Transition to Ready and hand the run's results to the caller.
    ///
    /// Fails with `NoActivation` when every category's activation list is
    /// empty; partial activation is never silently promoted to success if
    /// the aggregate result is empty.
    pub fn into_startup(mut self) -> Result<Startup> {
        self.expect_state("into_startup", OrchestratorState::Activated)?;

        if self.buckets.is_empty() {
            self.state = OrchestratorState::AbortedNoActivation;
            return Err(OrchestratorError::NoActivation {
                diagnostic: self.no_activation_diagnostic(),
            });
        }

        self.state = OrchestratorState::Ready;
        let logging = if self.options.debug {
            Map::new()
        } else {
            self.config
                .get("logging")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default()
        };

        Ok(Startup {
            config: self.config,
            logging,
            buckets: self.buckets,
            registry: self.registry,
            discovery: self.discovery,
            activation_errors: self.activation_errors,
        })
    }

    /// Run the whole sequence: config, discovery, activation, hand-off.
    pub fn run(mut self) -> Result<Startup> {
        self.resolve_config()?;
        self.discover_plugins()?;
        self.activate()?;
        self.into_startup()
    }

    fn abort_config<T>(&mut self, error: crate::config::error::ConfigError) -> Result<T> {
        self.state = OrchestratorState::AbortedConfigError;
        Err(OrchestratorError::Config(error))
    }

    /// Plugin directories named by the merged configuration, in order.
    fn configured_plugin_directories(&self) -> Vec<PathBuf> {
        let Some(entries) = self.config.get("plugin_directories") else {
            return Vec::new();
        };
        let Some(entries) = entries.as_array() else {
            log::warn!("'plugin_directories' is not a sequence of paths; ignoring");
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| match entry.as_str() {
                Some(path) => Some(PathBuf::from(path)),
                None => {
                    log::warn!("Ignoring non-string entry in 'plugin_directories'");
                    None
                }
            })
            .collect()
    }

    fn no_activation_diagnostic(&self) -> String {
        let mut causes = vec![
            "no configuration entries name a discovered plugin".to_string(),
        ];
        if self.registry.is_empty() {
            causes.push("no plugins were discovered; check 'plugin_directories' and --plugin-directory".to_string());
        }
        if !self.discovery.is_clean() {
            let note = if self.options.debug {
                format!("{} discovery error(s) occurred", self.discovery.errors.len())
            } else {
                format!(
                    "{} discovery error(s) occurred (re-run with --debug for details)",
                    self.discovery.errors.len()
                )
            };
            causes.push(note);
        }
        if !self.activation_errors.is_empty() {
            causes.push(format!(
                "{} activation entr(ies) could not be resolved",
                self.activation_errors.len()
            ));
        }
        causes.join("; ")
    }
}
