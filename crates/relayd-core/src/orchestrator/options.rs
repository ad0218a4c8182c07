//! Startup options, constructed once and passed through the sequence.

use std::path::PathBuf;

/// Everything the orchestration sequence needs from the outside world.
///
/// Built once by the caller (the CLI maps its flags onto this struct) and
/// passed by value; there is no hidden global option state.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Raised log verbosity; also drops the config's `logging` pass-through
    pub debug: bool,

    /// Configuration sources, merged in the order given
    pub config_sources: Vec<PathBuf>,

    /// Directory of configuration fragments, ingested after all sources
    pub config_directory: Option<PathBuf>,

    /// Plugin search directories supplied on the command line, scanned
    /// after the directories named in the configuration
    pub plugin_directories: Vec<PathBuf>,
}
