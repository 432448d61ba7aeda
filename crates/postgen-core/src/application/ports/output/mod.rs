//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `postgen-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PostgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `postgen_adapters::filesystem::LocalFilesystem` (production)
/// - `postgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Files are read and written whole; there is no streaming edit.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> PostgenResult<String>;

    /// Overwrite a file with `content`.
    fn write_file(&self, path: &Path, content: &str) -> PostgenResult<()>;

    /// `true` if `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// `true` if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Rename a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> PostgenResult<()>;
}

/// A program, its arguments, and the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Exit status of a finished command. `code` is `None` when killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for running external commands.
///
/// Implemented by:
/// - `postgen_adapters::process::ProcessRunner` (production)
///
/// Runs block until the child exits; there is no timeout.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `invocation` to completion.
    ///
    /// Returns `Err` only if the process could not be started.
    fn run(&self, invocation: &Invocation) -> PostgenResult<CommandStatus>;
}

/// Port for finding an executable.
///
/// Implemented by:
/// - `postgen_adapters::process::SystemLocator` (env var, then `PATH`)
#[cfg_attr(test, mockall::automock)]
pub trait ExecutableLocator: Send + Sync {
    /// Resolve `program`, preferring the value of the `env_override`
    /// variable when it is set and non-empty.
    ///
    /// Returns `None` unless the result is an existing executable file.
    fn locate(&self, program: &str, env_override: &str) -> Option<PathBuf>;
}
