//! Finalize Service - last step of project generation.
//!
//! Three steps in fixed order:
//! 1. Rename the `github` placeholder directory to `.github` (fatal on error)
//! 2. Smoke test: `./gradlew clean build` (fatal on non-zero exit)
//! 3. `git init`, `git add .`, `git commit` when git was chosen (never fatal)
//!
//! No retries and no rollback of steps that already ran.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, ExecutableLocator, Filesystem, Invocation},
    },
    domain::VersionControl,
    error::{PostgenError, PostgenResult},
};

/// A program plus its fixed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `./gradlew clean build`
    pub fn gradle_smoke_test() -> Self {
        Self::new("./gradlew", ["clean", "build"])
    }
}

/// Everything the finalizer needs, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeSettings {
    pub project_dir: PathBuf,
    /// Directory to rename to its dotted form; `None` disables the step.
    pub placeholder_dir: Option<String>,
    /// Smoke-test command; `None` skips verification.
    pub build: Option<CommandSpec>,
    pub vcs: VersionControl,
    pub vcs_program: String,
    pub vcs_env: String,
    pub commit_message: String,
}

impl FinalizeSettings {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            placeholder_dir: Some("github".into()),
            build: Some(CommandSpec::gradle_smoke_test()),
            vcs: VersionControl::Git,
            vcs_program: "git".into(),
            vcs_env: "GIT".into(),
            commit_message: "Initial commit".into(),
        }
    }

    pub fn validate(&self) -> PostgenResult<()> {
        if matches!(&self.build, Some(build) if build.program.trim().is_empty()) {
            return Err(PostgenError::Configuration {
                message: "finalize.build_program must not be empty".into(),
            });
        }
        if self.vcs.is_git() && self.vcs_program.trim().is_empty() {
            return Err(PostgenError::Configuration {
                message: "finalize.vcs_program must not be empty".into(),
            });
        }
        if matches!(&self.placeholder_dir, Some(d) if d.is_empty() || d.contains(['/', '\\'])) {
            return Err(PostgenError::Configuration {
                message: "finalize.placeholder_dir must be a plain directory name".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    NotPresent { path: PathBuf },
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyOutcome {
    Passed { command: String },
    Skipped,
}

/// A top-level finalize step, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizeStep {
    Rename,
    Verify,
    Vcs,
}

impl fmt::Display for FinalizeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename => write!(f, "rename"),
            Self::Verify => write!(f, "smoke test"),
            Self::Vcs => write!(f, "version control"),
        }
    }
}

/// Progress reported by [`FinalizeService::finalize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeEvent<'a> {
    Renamed(&'a RenameOutcome),
    BuildStarting { command: &'a str },
    Verified(&'a VerifyOutcome),
    VcsDone(&'a VcsOutcome),
}

/// One git invocation in the init sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VcsStep {
    Init,
    Add,
    Commit,
}

impl fmt::Display for VcsStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Add => write!(f, "add"),
            Self::Commit => write!(f, "commit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VcsOutcome {
    NotRequested { choice: String },
    ExecutableMissing { program: String },
    Committed { executable: PathBuf },
    Failed { step: VcsStep, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizeReport {
    pub rename: RenameOutcome,
    pub verify: VerifyOutcome,
    pub vcs: VcsOutcome,
}

/// Runs the finalize steps against the injected ports.
pub struct FinalizeService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    locator: Box<dyn ExecutableLocator>,
    settings: FinalizeSettings,
}

impl FinalizeService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        locator: Box<dyn ExecutableLocator>,
        settings: FinalizeSettings,
    ) -> Self {
        Self {
            filesystem,
            runner,
            locator,
            settings,
        }
    }

    pub fn settings(&self) -> &FinalizeSettings {
        &self.settings
    }

    /// Fail early when the project directory is missing.
    pub fn check_project_dir(&self) -> PostgenResult<()> {
        self.settings.validate()?;
        if self.filesystem.is_dir(&self.settings.project_dir) {
            Ok(())
        } else {
            Err(ApplicationError::ProjectDirNotFound {
                path: self.settings.project_dir.clone(),
            }
            .into())
        }
    }

    /// Step 1: `github` → `.github`.
    #[instrument(skip(self))]
    pub fn rename_placeholder(&self) -> PostgenResult<RenameOutcome> {
        let Some(name) = &self.settings.placeholder_dir else {
            return Ok(RenameOutcome::Disabled);
        };
        let from = self.settings.project_dir.join(name);
        if !self.filesystem.is_dir(&from) {
            debug!(path = %from.display(), "No placeholder directory");
            return Ok(RenameOutcome::NotPresent { path: from });
        }

        let to = self.settings.project_dir.join(format!(".{name}"));
        self.filesystem
            .rename(&from, &to)
            .map_err(|e| ApplicationError::RenameFailed {
                from: from.clone(),
                to: to.clone(),
                reason: match e {
                    PostgenError::Application(ApplicationError::FilesystemError {
                        reason, ..
                    }) => reason,
                    other => other.to_string(),
                },
            })?;

        info!(from = %from.display(), to = %to.display(), "Placeholder renamed");
        Ok(RenameOutcome::Renamed { from, to })
    }

    /// Step 2: run the smoke-test build.
    #[instrument(skip(self))]
    pub fn verify_build(&self) -> PostgenResult<VerifyOutcome> {
        let Some(invocation) = self.build_invocation() else {
            info!("Smoke test disabled");
            return Ok(VerifyOutcome::Skipped);
        };

        let command = invocation.to_string();
        info!(%command, "Running smoke test");

        let status = self.runner.run(&invocation)?;
        if !status.success() {
            error!(%command, code = ?status.code, "Smoke test failed");
            return Err(ApplicationError::BuildFailed {
                command,
                code: status.code,
            }
            .into());
        }

        Ok(VerifyOutcome::Passed { command })
    }

    fn build_invocation(&self) -> Option<Invocation> {
        let build = self.settings.build.as_ref()?;
        Some(
            Invocation::new(&build.program, &self.settings.project_dir)
                .args(build.args.iter().cloned()),
        )
    }

    /// Step 3: initialise a repository and commit everything.
    ///
    /// Never fails; problems are reported through the outcome.
    #[instrument(skip(self))]
    pub fn init_vcs(&self) -> VcsOutcome {
        let settings = &self.settings;
        if !settings.vcs.is_git() {
            debug!(choice = %settings.vcs, "Version control not requested");
            return VcsOutcome::NotRequested {
                choice: settings.vcs.to_string(),
            };
        }

        let Some(executable) = self
            .locator
            .locate(&settings.vcs_program, &settings.vcs_env)
        else {
            debug!(
                program = %settings.vcs_program,
                env = %settings.vcs_env,
                "Executable not found"
            );
            return VcsOutcome::ExecutableMissing {
                program: settings.vcs_program.clone(),
            };
        };

        let program = executable.to_string_lossy().into_owned();
        let steps: [(VcsStep, Vec<&str>); 3] = [
            (VcsStep::Init, vec!["init"]),
            (VcsStep::Add, vec!["add", "."]),
            (
                VcsStep::Commit,
                vec!["commit", "-a", "-m", settings.commit_message.as_str()],
            ),
        ];

        for (step, args) in steps {
            let invocation = Invocation::new(&program, &settings.project_dir).args(args);
            let failure = match self.runner.run(&invocation) {
                Ok(status) if status.success() => continue,
                Ok(status) => match status.code {
                    Some(code) => format!("`{invocation}` exited with code {code}"),
                    None => format!("`{invocation}` was terminated by a signal"),
                },
                Err(e) => e.to_string(),
            };
            error!(%step, reason = %failure, "Git command failed");
            return VcsOutcome::Failed {
                step,
                reason: failure,
            };
        }

        info!(executable = %executable.display(), "Repository initialised");
        VcsOutcome::Committed { executable }
    }

    /// Run all three steps, stopping at the first fatal one.
    pub fn finalize(&self) -> PostgenResult<FinalizeReport> {
        self.finalize_with(|_| {})
    }

    /// Like [`Self::finalize`], calling `on_event` as each step starts or ends.
    #[instrument(skip_all, fields(dir = %self.settings.project_dir.display()))]
    pub fn finalize_with<F>(&self, mut on_event: F) -> PostgenResult<FinalizeReport>
    where
        F: FnMut(FinalizeEvent<'_>),
    {
        self.check_project_dir()?;

        let rename = self.rename_placeholder()?;
        on_event(FinalizeEvent::Renamed(&rename));

        if let Some(invocation) = self.build_invocation() {
            on_event(FinalizeEvent::BuildStarting {
                command: &invocation.to_string(),
            });
        }
        let verify = self.verify_build()?;
        on_event(FinalizeEvent::Verified(&verify));

        let vcs = self.init_vcs();
        on_event(FinalizeEvent::VcsDone(&vcs));

        Ok(FinalizeReport {
            rename,
            verify,
            vcs,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mockall::{Sequence, predicate::eq};

    use super::*;
    use crate::application::ports::{
        CommandStatus, MockCommandRunner, MockExecutableLocator, MockFilesystem,
    };

    fn settings(vcs: &str) -> FinalizeSettings {
        FinalizeSettings {
            vcs: VersionControl::parse(vcs),
            ..FinalizeSettings::new("/proj")
        }
    }

    fn fs_with_dirs(dirs: &'static [&'static str]) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir()
            .returning(move |p| dirs.iter().any(|d| p == Path::new(d)));
        fs
    }

    fn service(
        fs: MockFilesystem,
        runner: MockCommandRunner,
        locator: MockExecutableLocator,
        settings: FinalizeSettings,
    ) -> FinalizeService {
        FinalizeService::new(Box::new(fs), Box::new(runner), Box::new(locator), settings)
    }

    // ── rename ────────────────────────────────────────────────────────────

    #[test]
    fn renames_github_to_dot_github() {
        let mut fs = fs_with_dirs(&["/proj/github"]);
        fs.expect_rename()
            .with(eq(Path::new("/proj/github")), eq(Path::new("/proj/.github")))
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(
            fs,
            MockCommandRunner::new(),
            MockExecutableLocator::new(),
            settings("none"),
        );
        assert_eq!(
            svc.rename_placeholder().unwrap(),
            RenameOutcome::Renamed {
                from: PathBuf::from("/proj/github"),
                to: PathBuf::from("/proj/.github"),
            }
        );
    }

    #[test]
    fn absent_placeholder_is_not_an_error() {
        let mut fs = fs_with_dirs(&[]);
        fs.expect_rename().times(0);
        let svc = service(
            fs,
            MockCommandRunner::new(),
            MockExecutableLocator::new(),
            settings("none"),
        );
        assert!(matches!(
            svc.rename_placeholder().unwrap(),
            RenameOutcome::NotPresent { .. }
        ));
    }

    #[test]
    fn rename_failure_is_fatal() {
        let mut fs = fs_with_dirs(&["/proj", "/proj/github"]);
        fs.expect_rename().returning(|from, _| {
            Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "Directory not empty".into(),
            }
            .into())
        });
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);

        let err = service(fs, runner, MockExecutableLocator::new(), settings("git"))
            .finalize()
            .unwrap_err();
        assert_eq!(err.failed_step(), Some(FinalizeStep::Rename));
        assert_eq!(
            err,
            PostgenError::Application(ApplicationError::RenameFailed {
                from: PathBuf::from("/proj/github"),
                to: PathBuf::from("/proj/.github"),
                reason: "Directory not empty".into(),
            })
        );
    }

    // ── verify ────────────────────────────────────────────────────────────

    #[test]
    fn build_failure_stops_before_vcs() {
        let fs = fs_with_dirs(&["/proj"]);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| inv.program == "./gradlew" && inv.args == ["clean", "build"])
            .times(1)
            .returning(|_| Ok(CommandStatus::exited(1)));
        let mut locator = MockExecutableLocator::new();
        locator.expect_locate().times(0);

        let err = service(fs, runner, locator, settings("git"))
            .finalize()
            .unwrap_err();
        assert_eq!(
            err,
            PostgenError::Application(ApplicationError::BuildFailed {
                command: "./gradlew clean build".into(),
                code: Some(1),
            })
        );
    }

    #[test]
    fn skipped_build_runs_nothing() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);
        let svc = service(
            fs_with_dirs(&[]),
            runner,
            MockExecutableLocator::new(),
            FinalizeSettings {
                build: None,
                ..settings("none")
            },
        );
        assert_eq!(svc.verify_build().unwrap(), VerifyOutcome::Skipped);
    }

    #[test]
    fn build_runs_in_project_dir() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| inv.cwd == Path::new("/proj"))
            .returning(|_| Ok(CommandStatus::exited(0)));
        let svc = service(
            fs_with_dirs(&[]),
            runner,
            MockExecutableLocator::new(),
            settings("none"),
        );
        assert_eq!(
            svc.verify_build().unwrap(),
            VerifyOutcome::Passed {
                command: "./gradlew clean build".into()
            }
        );
    }

    // ── vcs ───────────────────────────────────────────────────────────────

    #[test]
    fn non_git_choice_skips_lookup() {
        let mut locator = MockExecutableLocator::new();
        locator.expect_locate().times(0);
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);

        let svc = service(fs_with_dirs(&[]), runner, locator, settings("none"));
        assert_eq!(
            svc.init_vcs(),
            VcsOutcome::NotRequested {
                choice: "none".into()
            }
        );
    }

    #[test]
    fn missing_git_is_soft() {
        let mut locator = MockExecutableLocator::new();
        locator
            .expect_locate()
            .with(eq("git"), eq("GIT"))
            .times(1)
            .returning(|_, _| None);
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);

        let svc = service(fs_with_dirs(&[]), runner, locator, settings("git"));
        assert_eq!(
            svc.init_vcs(),
            VcsOutcome::ExecutableMissing {
                program: "git".into()
            }
        );
    }

    #[test]
    fn git_sequence_runs_in_order() {
        let mut locator = MockExecutableLocator::new();
        locator
            .expect_locate()
            .returning(|_, _| Some(PathBuf::from("/usr/bin/git")));

        let mut seq = Sequence::new();
        let mut runner = MockCommandRunner::new();
        for expected in [
            vec!["init"],
            vec!["add", "."],
            vec!["commit", "-a", "-m", "Initial commit"],
        ] {
            runner
                .expect_run()
                .withf(move |inv| inv.program == "/usr/bin/git" && inv.args == expected)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(CommandStatus::exited(0)));
        }

        let svc = service(fs_with_dirs(&[]), runner, locator, settings("git"));
        assert_eq!(
            svc.init_vcs(),
            VcsOutcome::Committed {
                executable: PathBuf::from("/usr/bin/git")
            }
        );
    }

    #[test]
    fn git_failure_is_reported_not_raised() {
        let mut locator = MockExecutableLocator::new();
        locator
            .expect_locate()
            .returning(|_, _| Some(PathBuf::from("/usr/bin/git")));
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| inv.args == ["init"])
            .returning(|_| Ok(CommandStatus::exited(0)));
        runner
            .expect_run()
            .withf(|inv| inv.args == ["add", "."])
            .returning(|_| Ok(CommandStatus::exited(128)));
        runner
            .expect_run()
            .withf(|inv| inv.args.first().map(String::as_str) == Some("commit"))
            .times(0);

        let svc = service(fs_with_dirs(&[]), runner, locator, settings("git"));
        match svc.init_vcs() {
            VcsOutcome::Failed { step, reason } => {
                assert_eq!(step, VcsStep::Add);
                assert!(reason.contains("128"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn full_run_reports_every_step() {
        let fs = fs_with_dirs(&["/proj"]);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(CommandStatus::exited(0)));
        let mut locator = MockExecutableLocator::new();
        locator
            .expect_locate()
            .returning(|_, _| Some(PathBuf::from("/usr/bin/git")));

        let report = service(fs, runner, locator, settings("git"))
            .finalize()
            .unwrap();
        assert!(matches!(report.rename, RenameOutcome::NotPresent { .. }));
        assert!(matches!(report.verify, VerifyOutcome::Passed { .. }));
        assert!(matches!(report.vcs, VcsOutcome::Committed { .. }));
    }

    #[test]
    fn events_follow_step_order() {
        let mut fs = fs_with_dirs(&["/proj", "/proj/github"]);
        fs.expect_rename().returning(|_, _| Ok(()));
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(CommandStatus::exited(0)));
        let mut locator = MockExecutableLocator::new();
        locator.expect_locate().returning(|_, _| None);

        let mut seen = Vec::new();
        service(fs, runner, locator, settings("git"))
            .finalize_with(|event| {
                seen.push(match event {
                    FinalizeEvent::Renamed(RenameOutcome::Renamed { .. }) => "renamed".to_string(),
                    FinalizeEvent::BuildStarting { command } => format!("start {command}"),
                    FinalizeEvent::Verified(VerifyOutcome::Passed { .. }) => "passed".into(),
                    FinalizeEvent::VcsDone(VcsOutcome::ExecutableMissing { .. }) => {
                        "no git".into()
                    }
                    other => panic!("unexpected event: {other:?}"),
                })
            })
            .unwrap();
        assert_eq!(
            seen,
            ["renamed", "start ./gradlew clean build", "passed", "no git"]
        );
    }

    #[test]
    fn skipped_build_emits_no_start_event() {
        let mut locator = MockExecutableLocator::new();
        locator.expect_locate().times(0);
        let svc = service(
            fs_with_dirs(&["/proj"]),
            MockCommandRunner::new(),
            locator,
            FinalizeSettings {
                build: None,
                ..settings("none")
            },
        );
        let mut starts = 0;
        svc.finalize_with(|event| {
            if let FinalizeEvent::BuildStarting { .. } = event {
                starts += 1;
            }
        })
        .unwrap();
        assert_eq!(starts, 0);
    }

    #[test]
    fn missing_project_dir_is_not_found() {
        let svc = service(
            fs_with_dirs(&[]),
            MockCommandRunner::new(),
            MockExecutableLocator::new(),
            settings("git"),
        );
        assert!(matches!(
            svc.finalize(),
            Err(PostgenError::Application(
                ApplicationError::ProjectDirNotFound { .. }
            ))
        ));
    }

    #[test]
    fn empty_build_program_is_configuration_error() {
        let s = FinalizeSettings {
            build: Some(CommandSpec::new("  ", ["build"])),
            ..settings("git")
        };
        assert!(matches!(
            s.validate(),
            Err(PostgenError::Configuration { .. })
        ));
    }

    #[test]
    fn nested_placeholder_rejected() {
        let s = FinalizeSettings {
            placeholder_dir: Some("a/b".into()),
            ..settings("git")
        };
        assert!(s.validate().is_err());
    }
}
