//! # Relayd Core Orchestrator
//!
//! Sequences startup: resolve configuration, discover plugins against the
//! blacklist, activate the configured entries, and hand the result to the
//! runtime core. The sequence is single-threaded and strictly sequential;
//! each step is guarded by an explicit state machine so misuse fails loudly
//! instead of silently re-running phases.

pub mod bootstrap;
pub mod error;
pub mod options;

pub use bootstrap::{Orchestrator, OrchestratorState, Startup};
pub use error::{OrchestratorError, Result};
pub use options::Options;
