//! # Relayd Core Orchestrator Errors
//!
//! Defines [`OrchestratorError`], the fatal error type of the orchestration
//! sequence. Recoverable file- and unit-level failures are isolated and
//! logged inside the individual components; what reaches this enum
//! terminates the run with a non-zero exit.

use std::result::Result as StdResult;

use crate::config::error::ConfigError;
use crate::orchestrator::bootstrap::OrchestratorState;

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// A fatal configuration error: a named source path does not exist, a
    /// directory could not be read, or two sources disagree on a key's
    /// shape.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Every category's activation list is empty after processing.
    #[error("Nothing to activate: {diagnostic}")]
    NoActivation { diagnostic: String },

    /// An orchestration step was invoked out of order.
    #[error("Orchestrator step '{step}' invoked in state {actual:?} (expected {expected:?})")]
    Lifecycle {
        step: &'static str,
        expected: OrchestratorState,
        actual: OrchestratorState,
    },
}

/// Shorthand for Result with the orchestrator error type
pub type Result<T> = StdResult<T, OrchestratorError>;
