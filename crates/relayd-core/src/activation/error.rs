//! # Relayd Core Activation Errors
//!
//! Per-entry activation failures. Each one is reported and skipped; it
//! never aborts activation of the remaining entries in the same category or
//! of other categories.

use crate::plugin_system::descriptor::Category;

#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    /// The category's configuration section is not a sequence of entries.
    #[error("Configuration section '{category}' is not a sequence of activation entries")]
    NotASequence { category: Category },

    /// An entry is not a mapping carrying a resolvable `name`.
    #[error("Entry {index} under '{category}' has no resolvable plugin name")]
    MissingName { category: Category, index: usize },

    /// An entry names a plugin absent from the registry for its category.
    #[error("Entry {index} under '{category}' names unknown plugin '{name}'")]
    UnknownPlugin {
        category: Category,
        index: usize,
        name: String,
    },
}
