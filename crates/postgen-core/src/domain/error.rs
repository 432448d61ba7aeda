// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside outcomes and reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Feature name is empty")]
    EmptyFeatureName,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Invalid patch rule '{field}': {reason}")]
    InvalidPatchRules { field: &'static str, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyFeatureName => vec![
                "Pass the feature module name, e.g. postgen feature payments".into(),
                "Check that the template substituted feature_name".into(),
            ],
            Self::InvalidPatchRules { field, .. } => vec![
                format!("Set a non-empty value for feature.{}", field),
                "Run 'postgen config list' to inspect the active values".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyFeatureName => ErrorCategory::Validation,
            Self::InvalidPatchRules { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
