//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not patch
//! logic. Patch-logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed on an existing path.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Renaming the placeholder directory failed.
    #[error("Failed to rename {from} to {to}: {reason}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// The smoke-test build exited unsuccessfully.
    #[error("Build failed: `{command}` exited with {}", code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}")))]
    BuildFailed { command: String, code: Option<i32> },

    /// An external command could not be started.
    #[error("Could not run `{command}`: {reason}")]
    CommandSpawnFailed { command: String, reason: String },

    /// The directory the hook should run in does not exist.
    #[error("Project directory not found: {path}")]
    ProjectDirNotFound { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
                "Make sure the file is UTF-8 text".into(),
            ],
            Self::RenameFailed { to, .. } => vec![
                format!("Check whether {} already exists", to.display()),
                "Check that you have write permissions in the project directory".into(),
            ],
            Self::BuildFailed { .. } => vec![
                "The generated project does not build".into(),
                "Run ./gradlew clean build in the project to see the failure".into(),
                "Use --skip-verify to finish without the smoke test".into(),
            ],
            Self::CommandSpawnFailed { command, .. } => vec![
                format!("Ensure `{}` exists and is executable", command),
                "Check finalize.build_program in your configuration".into(),
            ],
            Self::ProjectDirNotFound { path } => vec![
                format!("Directory does not exist: {}", path.display()),
                "Run the hook from the generated project or pass --dir".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. }
            | Self::RenameFailed { .. }
            | Self::BuildFailed { .. }
            | Self::CommandSpawnFailed { .. } => ErrorCategory::Internal,
            Self::ProjectDirNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}
