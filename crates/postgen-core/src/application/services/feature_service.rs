//! Feature Service - registers a generated feature module with its parents.
//!
//! Two independent insertions:
//! 1. `include 'features:<name>'` into `settings.gradle`
//! 2. `implementation project(':features:<name>')` into the bootstrap build file
//!
//! Missing inputs (empty name, absent file, absent marker) are soft skips;
//! only real I/O failures on an existing file are errors.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{FeatureName, PatchRules, Patched, insert_dependency, insert_include},
    error::PostgenResult,
};

/// Settings file name at the project root.
pub const SETTINGS_FILE: &str = "settings.gradle";

/// Bootstrap build file, relative to the project root.
pub const BUILD_FILE: [&str; 3] = ["bootstrap", "app", "build.gradle"];

/// Result of one insertion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PatchOutcome {
    /// The line was written (or would be, in a dry run).
    Inserted { path: PathBuf, line: usize },
    /// Nothing was written.
    Skipped { reason: SkipReason },
}

impl PatchOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Why an insertion was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    EmptyFeatureName,
    FileNotFound { path: PathBuf },
    MarkerNotFound { path: PathBuf, marker: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFeatureName => write!(f, "feature name is empty"),
            Self::FileNotFound { path } => write!(f, "{} not found", path.display()),
            Self::MarkerNotFound { path, marker } => {
                write!(f, "could not find {} in {}", marker, path.display())
            }
        }
    }
}

/// The two files a feature is registered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTargets {
    pub settings_file: PathBuf,
    pub build_file: PathBuf,
}

impl FeatureTargets {
    /// Default layout below the project root.
    pub fn under_project_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            settings_file: root.join(SETTINGS_FILE),
            build_file: BUILD_FILE.iter().fold(root.to_path_buf(), |p, c| p.join(c)),
        }
    }

    /// Default layout for a hook running inside `features/<name>`: the
    /// project root is two levels up.
    pub fn from_feature_dir(feature_dir: impl AsRef<Path>) -> Self {
        Self::under_project_root(feature_dir.as_ref().join("..").join(".."))
    }
}

/// Both outcomes of [`FeatureService::register`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureReport {
    pub feature: String,
    pub dry_run: bool,
    pub include: PatchOutcome,
    pub dependency: PatchOutcome,
}

/// Service for registering feature modules.
pub struct FeatureService {
    filesystem: Box<dyn Filesystem>,
    rules: PatchRules,
    dry_run: bool,
}

impl FeatureService {
    pub fn new(filesystem: Box<dyn Filesystem>, rules: PatchRules) -> Self {
        Self {
            filesystem,
            rules,
            dry_run: false,
        }
    }

    /// Compute outcomes without writing anything.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Add the include line to the settings file.
    #[instrument(skip(self), fields(path = %settings_file.display()))]
    pub fn add_include(&self, settings_file: &Path, feature: &str) -> PostgenResult<PatchOutcome> {
        let Some(feature) = self.checked_name(feature) else {
            return Ok(skipped(SkipReason::EmptyFeatureName));
        };
        if !self.filesystem.is_file(settings_file) {
            debug!("Settings file not found, skipping include");
            return Ok(skipped(SkipReason::FileNotFound {
                path: settings_file.to_path_buf(),
            }));
        }

        let content = self.filesystem.read_to_string(settings_file)?;
        let patched = insert_include(&content, &feature, &self.rules);
        self.write(settings_file, &patched)
    }

    /// Add the dependency line to the features section of the build file.
    #[instrument(skip(self), fields(path = %build_file.display()))]
    pub fn add_dependency(&self, build_file: &Path, feature: &str) -> PostgenResult<PatchOutcome> {
        let Some(feature) = self.checked_name(feature) else {
            return Ok(skipped(SkipReason::EmptyFeatureName));
        };
        if !self.filesystem.is_file(build_file) {
            debug!("Build file not found, skipping dependency");
            return Ok(skipped(SkipReason::FileNotFound {
                path: build_file.to_path_buf(),
            }));
        }

        let content = self.filesystem.read_to_string(build_file)?;
        match insert_dependency(&content, &feature, &self.rules) {
            Some(patched) => self.write(build_file, &patched),
            None => {
                debug!(marker = self.rules.section_marker(), "Section marker not found");
                Ok(skipped(SkipReason::MarkerNotFound {
                    path: build_file.to_path_buf(),
                    marker: self.rules.section_marker().to_owned(),
                }))
            }
        }
    }

    /// Run both insertions. A skip in one does not stop the other.
    #[instrument(skip(self, targets))]
    pub fn register(&self, targets: &FeatureTargets, feature: &str) -> PostgenResult<FeatureReport> {
        let include = self.add_include(&targets.settings_file, feature)?;
        let dependency = self.add_dependency(&targets.build_file, feature)?;

        info!(
            include = include.is_inserted(),
            dependency = dependency.is_inserted(),
            "Feature registration finished"
        );

        Ok(FeatureReport {
            feature: feature.to_owned(),
            dry_run: self.dry_run,
            include,
            dependency,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn checked_name(&self, feature: &str) -> Option<FeatureName> {
        match FeatureName::new(feature) {
            Ok(name) => Some(name),
            Err(e) => {
                debug!(error = %e, "Skipping");
                None
            }
        }
    }

    fn write(&self, path: &Path, patched: &Patched) -> PostgenResult<PatchOutcome> {
        if self.dry_run {
            debug!(line = patched.line, "Dry run, not writing");
        } else {
            self.filesystem.write_file(path, &patched.content)?;
            info!(line = patched.line, "Line inserted");
        }
        Ok(PatchOutcome::Inserted {
            path: path.to_path_buf(),
            line: patched.line,
        })
    }
}

fn skipped(reason: SkipReason) -> PatchOutcome {
    PatchOutcome::Skipped { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};
    use crate::error::PostgenError;

    const SETTINGS: &str = "include 'core'\ninclude 'utils'\n";
    const BUILD: &str = "dependencies {\n    /* Features */\n    implementation project(':features:hello')\n}\n";

    fn service(fs: MockFilesystem) -> FeatureService {
        FeatureService::new(Box::new(fs), PatchRules::default())
    }

    #[test]
    fn targets_resolve_two_levels_up() {
        let t = FeatureTargets::from_feature_dir("/p/features/payments");
        assert_eq!(
            t.settings_file,
            PathBuf::from("/p/features/payments/../../settings.gradle")
        );
        assert_eq!(
            t.build_file,
            PathBuf::from("/p/features/payments/../../bootstrap/app/build.gradle")
        );
    }

    #[test]
    fn include_written_after_last_include() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok(SETTINGS.to_string()));
        fs.expect_write_file()
            .withf(|p, c| {
                p == Path::new("settings.gradle")
                    && c == "include 'core'\ninclude 'utils'\ninclude 'features:payments'\n"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let out = service(fs)
            .add_include(Path::new("settings.gradle"), "payments")
            .unwrap();
        assert_eq!(
            out,
            PatchOutcome::Inserted {
                path: PathBuf::from("settings.gradle"),
                line: 3
            }
        );
    }

    #[test]
    fn empty_name_touches_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().times(0);
        fs.expect_read_to_string().times(0);
        fs.expect_write_file().times(0);

        let svc = service(fs);
        let targets = FeatureTargets::under_project_root("/p");
        let report = svc.register(&targets, "").unwrap();
        assert_eq!(
            report.include,
            PatchOutcome::Skipped {
                reason: SkipReason::EmptyFeatureName
            }
        );
        assert_eq!(report.dependency, report.include);
    }

    #[test]
    fn missing_settings_still_patches_build_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file()
            .returning(|p| p.ends_with("build.gradle"));
        fs.expect_read_to_string()
            .returning(|_| Ok(BUILD.to_string()));
        fs.expect_write_file()
            .withf(|p, c| p.ends_with("build.gradle") && c.contains(":features:payments"))
            .times(1)
            .returning(|_, _| Ok(()));

        let report = service(fs)
            .register(&FeatureTargets::under_project_root("/p"), "payments")
            .unwrap();
        assert!(matches!(
            report.include,
            PatchOutcome::Skipped {
                reason: SkipReason::FileNotFound { .. }
            }
        ));
        assert!(report.dependency.is_inserted());
    }

    #[test]
    fn missing_marker_skips_without_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("dependencies {\n}\n".to_string()));
        fs.expect_write_file().times(0);

        let out = service(fs)
            .add_dependency(Path::new("build.gradle"), "payments")
            .unwrap();
        assert_eq!(
            out,
            PatchOutcome::Skipped {
                reason: SkipReason::MarkerNotFound {
                    path: PathBuf::from("build.gradle"),
                    marker: "/* Features */".into()
                }
            }
        );
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok(BUILD.to_string()));
        fs.expect_write_file().times(0);

        let out = service(fs)
            .with_dry_run(true)
            .add_dependency(Path::new("build.gradle"), "payments")
            .unwrap();
        assert_eq!(
            out,
            PatchOutcome::Inserted {
                path: PathBuf::from("build.gradle"),
                line: 4
            }
        );
    }

    #[test]
    fn read_failure_is_an_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(true);
        fs.expect_read_to_string().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "not UTF-8".into(),
            }
            .into())
        });

        let err = service(fs)
            .add_include(Path::new("settings.gradle"), "payments")
            .unwrap_err();
        assert!(matches!(
            err,
            PostgenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn skip_reason_display() {
        let r = SkipReason::MarkerNotFound {
            path: PathBuf::from("b.gradle"),
            marker: "/* Features */".into(),
        };
        assert_eq!(r.to_string(), "could not find /* Features */ in b.gradle");
    }
}
