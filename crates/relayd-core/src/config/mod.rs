//! # Relayd Core Configuration
//!
//! Loading and combining of configuration sources for the orchestration
//! sequence. A configuration tree is a [`serde_json::Value`]: a mapping,
//! an ordered sequence, or a scalar.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`loader`]**: Parses a single configuration source (file) into a tree,
//!   detecting the on-disk format from the file extension.
//! - **[`merge`]**: Deterministically merges two trees, recursively. Later
//!   sources win; shape mismatches are structural errors.
//! - **[`ingest`]**: Folds an entire directory of configuration fragments
//!   into a running tree in filename-sorted order.
//! - **[`error`]**: Defines [`ConfigError`], covering missing sources, parse
//!   failures and merge shape defects.

pub mod error;
pub mod ingest;
pub mod loader;
pub mod merge;

pub use error::{ConfigError, ValueShape};
pub use ingest::ingest_directory;
pub use loader::{load_source, ConfigFormat};
pub use merge::merge;

// Test module declaration
#[cfg(test)]
mod tests;
