//! Value objects: feature names and version-control choices.

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Name of a generated feature module.
///
/// The only rule is that it is non-empty; characters are taken as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureName(String);

impl FeatureName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyFeatureName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Version-control choice made at generation time.
///
/// Only the exact string `git` selects git; anything else disables the
/// version-control step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionControl {
    Git,
    Other(String),
}

impl VersionControl {
    pub fn parse(choice: &str) -> Self {
        match choice {
            "git" => Self::Git,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn is_git(&self) -> bool {
        matches!(self, Self::Git)
    }
}

impl fmt::Display for VersionControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git => write!(f, "git"),
            Self::Other(s) if s.is_empty() => write!(f, "none"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_feature_name_rejected() {
        assert_eq!(FeatureName::new(""), Err(DomainError::EmptyFeatureName));
    }

    #[test]
    fn feature_name_characters_not_validated() {
        let name = FeatureName::new("weird name!").unwrap();
        assert_eq!(name.as_str(), "weird name!");
    }

    #[test]
    fn only_exact_git_selects_git() {
        assert!(VersionControl::parse("git").is_git());
        assert!(!VersionControl::parse("Git").is_git());
        assert!(!VersionControl::parse("none").is_git());
        assert!(!VersionControl::parse("").is_git());
    }

    #[test]
    fn version_control_display() {
        assert_eq!(VersionControl::Git.to_string(), "git");
        assert_eq!(VersionControl::parse("hg").to_string(), "hg");
        assert_eq!(VersionControl::parse("").to_string(), "none");
    }
}
