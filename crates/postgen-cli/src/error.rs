//! Errors surfaced by the `postgen` binary.
//!
//! Everything a hook can fail with ends up as a [`CliError`], which knows its
//! exit code, what to suggest, and which finalize step (if any) it stopped.

use std::error::Error as _;
use std::fmt::Write as _;
use std::io;

use owo_colors::OwoColorize;
use thiserror::Error;

use postgen_core::{
    application::FinalizeStep,
    error::{ErrorCategory, PostgenError},
};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Core(#[from] PostgenError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// `map_err` adapter attaching `message` to an I/O failure.
    pub fn io(message: impl Into<String>) -> impl FnOnce(io::Error) -> CliError {
        let message = message.into();
        move |source| CliError::IoError { message, source }
    }

    /// The finalize step this error stopped, for `finalize` failures.
    pub fn failed_step(&self) -> Option<FinalizeStep> {
        match self {
            Self::Core(e) => e.failed_step(),
            _ => None,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run 'postgen config list' to see the effective configuration".into(),
            ],
            Self::Core(e) => e.suggestions(),
            Self::IoError { .. } => vec!["Check permissions on the project directory".into()],
        }
    }

    /// Process exit code.
    ///
    /// | Failure                                   | Code |
    /// |-------------------------------------------|------|
    /// | rename, smoke test, I/O, internal         |  1   |
    /// | invalid input (empty feature name)        |  2   |
    /// | project directory missing                 |  3   |
    /// | configuration                             |  4   |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigError { .. } => 4,
            Self::IoError { .. } => 1,
            Self::Core(e) => match e.category() {
                ErrorCategory::Validation => 2,
                ErrorCategory::NotFound => 3,
                ErrorCategory::Configuration => 4,
                ErrorCategory::Internal => 1,
            },
        }
    }

    /// User-facing report for stderr.
    ///
    /// A stopped finalize step is named in the heading. Causes are listed
    /// only when `verbose`; otherwise a hint says they exist.
    pub fn render(&self, colored: bool, verbose: bool) -> String {
        let heading = match self.failed_step() {
            Some(step) => format!("{step} failed"),
            None => "Error".to_string(),
        };

        let mut out = String::new();
        if colored {
            let _ = writeln!(out, "\n{} {}", "✗".red().bold(), heading.red().bold());
            let _ = writeln!(out, "  {}", self.to_string().red());
        } else {
            let _ = writeln!(out, "\n✗ {heading}");
            let _ = writeln!(out, "  {self}");
        }

        // core errors already embed their inner message
        let mut causes = Vec::new();
        if !matches!(self, Self::Core(_)) {
            let mut source = self.source();
            while let Some(err) = source {
                causes.push(err.to_string());
                source = err.source();
            }
        }
        if verbose {
            for cause in &causes {
                let _ = writeln!(out, "  caused by: {cause}");
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let title = "Try:";
            if colored {
                let _ = writeln!(out, "\n{}", title.yellow().bold());
            } else {
                let _ = writeln!(out, "\n{title}");
            }
            for suggestion in suggestions {
                let _ = writeln!(out, "  - {suggestion}");
            }
        }

        if !verbose && !causes.is_empty() {
            let _ = writeln!(out, "\nRe-run with -v to see the underlying cause.");
        }
        out
    }

    /// Trace the failure for `-v` runs; [`Self::render`] is the copy the
    /// user always sees.
    pub fn log(&self) {
        let code = self.exit_code();
        if self.is_fatal_step() {
            tracing::info!(code, "Finalize stopped: {self}");
        } else {
            tracing::debug!(code, "Command failed: {self}");
        }
        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {source}");
        }
    }

    fn is_fatal_step(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_fatal_step())
    }
}
