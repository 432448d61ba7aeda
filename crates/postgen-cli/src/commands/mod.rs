//! One module per subcommand.

use std::path::PathBuf;

use crate::error::{CliError, CliResult};

pub mod completions;
pub mod config;
pub mod feature;
pub mod finalize;
pub mod init;

/// Working directory, used when `--dir` is not given.
fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir().map_err(CliError::io("Failed to read the current directory"))
}
