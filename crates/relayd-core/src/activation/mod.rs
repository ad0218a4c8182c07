//! # Relayd Core Activation
//!
//! Binding of discovered plugin descriptors to their configuration entries.
//! For each capability category the [`ActivationEngine`] walks the
//! category's entry sequence in the merged configuration, resolves each
//! named plugin from the registry, and produces an ordered
//! [`ActivatedPlugin`] list. Activation order is significant for downstream
//! startup sequencing; per-entry failures never abort the remaining entries.

pub mod engine;
pub mod error;

pub use engine::{ActivatedPlugin, ActivationEngine, CategoryBuckets};
pub use error::ActivationError;

// Test module declaration
#[cfg(test)]
mod tests;
