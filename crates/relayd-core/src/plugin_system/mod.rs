//! # Relayd Core Plugin System
//!
//! Discovery and registration of capability plugins. A plugin is a unit
//! that fills one or more capability categories (tunnel, input, output);
//! discovery scans configured directories, parses each unit's manifest into
//! an immutable [`PluginDescriptor`], filters it against the per-category
//! [`Blacklist`], and registers it in the [`PluginRegistry`] keyed by
//! `(category, name)`.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`descriptor`]**: The [`PluginDescriptor`] metadata (name, source
//!   location, capability set, declared option schema) and the fixed
//!   [`Category`] set.
//! - **[`registry`]**: The `(category, name)`-keyed [`PluginRegistry`] with
//!   last-discovered-wins override semantics.
//! - **[`blacklist`]**: Per-category name exclusions sourced from the merged
//!   configuration, consulted only during discovery.
//! - **[`loader`]**: Ordered directory scanning through the [`PluginSource`]
//!   seam, with per-unit error isolation and a structured
//!   [`DiscoveryReport`].
//! - **[`error`]**: [`PluginSystemError`] for scan and manifest failures.

pub mod blacklist;
pub mod descriptor;
pub mod error;
pub mod loader;
pub mod registry;

pub use blacklist::Blacklist;
pub use descriptor::{Category, OptionSpec, PluginDescriptor};
pub use error::PluginSystemError;
pub use loader::{DiscoveryReport, ManifestSource, PluginLoader, PluginSource};
pub use registry::PluginRegistry;

// Test module declaration
#[cfg(test)]
mod tests;
