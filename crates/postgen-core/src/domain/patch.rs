//! Insertion rules for `settings.gradle` and the bootstrap `build.gradle`.
//!
//! Pure functions over [`LineBuffer`]; reading and writing the files is the
//! application layer's job.

use crate::domain::{error::DomainError, lines::LineBuffer, value_objects::FeatureName};

/// Trimmed-line prefix that identifies an include declaration.
pub const INCLUDE_KEYWORD: &str = "include ";

/// Where new lines go and what they look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRules {
    group: String,
    section_marker: String,
    indent: String,
}

impl Default for PatchRules {
    fn default() -> Self {
        Self {
            group: "features".into(),
            section_marker: "/* Features */".into(),
            indent: "    ".into(),
        }
    }
}

impl PatchRules {
    /// Build rules for a Gradle project group (`features` in the template).
    ///
    /// `group` and `section_marker` must be non-empty; an empty marker would
    /// match every line.
    pub fn new(
        group: impl Into<String>,
        section_marker: impl Into<String>,
        indent: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let rules = Self {
            group: group.into(),
            section_marker: section_marker.into(),
            indent: indent.into(),
        };
        if rules.group.trim().is_empty() {
            return Err(DomainError::InvalidPatchRules {
                field: "group",
                reason: "must not be empty".into(),
            });
        }
        if rules.section_marker.trim().is_empty() {
            return Err(DomainError::InvalidPatchRules {
                field: "section_marker",
                reason: "must not be empty".into(),
            });
        }
        Ok(rules)
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn section_marker(&self) -> &str {
        &self.section_marker
    }

    /// `include 'features:payments'`
    pub fn include_line(&self, feature: &FeatureName) -> String {
        format!("include '{}:{}'", self.group, feature)
    }

    /// Substring identifying an existing feature dependency.
    pub fn dependency_pattern(&self) -> String {
        format!("implementation project(':{}:", self.group)
    }

    /// `    implementation project(':features:payments')`
    pub fn dependency_line(&self, feature: &FeatureName) -> String {
        format!(
            "{}implementation project(':{}:{}')",
            self.indent, self.group, feature
        )
    }
}

/// Content after a successful insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub content: String,
    /// 1-based line number of the inserted line.
    pub line: usize,
}

/// Insert the include line after the last `include ` line, or append it.
pub fn insert_include(content: &str, feature: &FeatureName, rules: &PatchRules) -> Patched {
    let mut buf = LineBuffer::parse(content);
    let new_line = rules.include_line(feature);

    let idx = match buf.rposition(|l| l.trim().starts_with(INCLUDE_KEYWORD)) {
        Some(last) => buf.insert_after(last, &new_line),
        None => buf.append(&new_line),
    };

    Patched {
        content: buf.to_content(),
        line: idx + 1,
    }
}

/// Index after which the dependency line belongs.
///
/// Dependency lines count only once the marker has been seen. The last
/// dependency wins over the marker; with no dependency, the last marker line
/// is used. `None` if the marker never appears.
pub fn dependency_anchor(buf: &LineBuffer, rules: &PatchRules) -> Option<usize> {
    let pattern = rules.dependency_pattern();
    let mut in_section = false;
    let mut marker_idx = None;
    let mut last_dependency = None;

    for (idx, line) in buf.lines().iter().enumerate() {
        if line.contains(rules.section_marker()) {
            in_section = true;
            marker_idx = Some(idx);
        }
        if in_section && line.contains(&pattern) {
            last_dependency = Some(idx);
        }
    }

    last_dependency.or(marker_idx)
}

/// Insert the dependency line inside the features section.
///
/// Returns `None` when the section marker is missing.
pub fn insert_dependency(
    content: &str,
    feature: &FeatureName,
    rules: &PatchRules,
) -> Option<Patched> {
    let mut buf = LineBuffer::parse(content);
    let anchor = dependency_anchor(&buf, rules)?;
    let idx = buf.insert_after(anchor, &rules.dependency_line(feature));

    Some(Patched {
        content: buf.to_content(),
        line: idx + 1,
    })
}
