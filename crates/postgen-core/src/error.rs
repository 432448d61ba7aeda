//! Unified error handling for Postgen Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::{ApplicationError, FinalizeStep};
use crate::domain::DomainError;

/// Root error type for Postgen Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PostgenError {
    /// Errors from the domain layer (business logic violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PostgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in postgen".into(),
                "Please report this issue at: https://github.com/cosecruz/postgen/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The finalize step that raised this error, if any.
    pub fn failed_step(&self) -> Option<FinalizeStep> {
        match self {
            Self::Application(ApplicationError::RenameFailed { .. }) => Some(FinalizeStep::Rename),
            Self::Application(
                ApplicationError::BuildFailed { .. } | ApplicationError::CommandSpawnFailed { .. },
            ) => Some(FinalizeStep::Verify),
            _ => None,
        }
    }

    /// `true` for the failures that must stop finalizing (rename, smoke test).
    pub fn is_fatal_step(&self) -> bool {
        self.failed_step().is_some()
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PostgenResult<T> = Result<T, PostgenError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn build_failure_is_fatal_and_internal() {
        let err: PostgenError = ApplicationError::BuildFailed {
            command: "./gradlew clean build".into(),
            code: Some(1),
        }
        .into();
        assert!(err.is_fatal_step());
        assert_eq!(err.failed_step(), Some(FinalizeStep::Verify));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn filesystem_error_is_not_a_fatal_step() {
        let err: PostgenError = ApplicationError::FilesystemError {
            path: PathBuf::from("settings.gradle"),
            reason: "denied".into(),
        }
        .into();
        assert!(!err.is_fatal_step());
    }

    #[test]
    fn empty_feature_name_is_validation() {
        let err: PostgenError = DomainError::EmptyFeatureName.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
