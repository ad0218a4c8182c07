//! # Relayd Core
//!
//! Startup orchestration for the relayd event-forwarding daemon. This crate
//! decides *what gets activated and with what configuration*: it merges
//! configuration sources into a single tree, discovers capability plugins,
//! filters them against a per-category blacklist, and binds the configured
//! subset into activation buckets handed to the daemon's runtime core.
//!
//! The runtime itself (event routing, network I/O, the processing pipeline)
//! is an external collaborator and lives outside this crate.

pub mod activation;
pub mod config;
pub mod orchestrator;
pub mod plugin_system;

// Re-export key public types for the binary and for embedding consumers.
pub use activation::{ActivatedPlugin, ActivationEngine, CategoryBuckets};
pub use config::ConfigError;
pub use orchestrator::{Options, Orchestrator, OrchestratorError, Startup};
pub use plugin_system::{Blacklist, Category, PluginDescriptor, PluginLoader, PluginRegistry};
