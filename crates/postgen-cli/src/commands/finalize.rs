//! `postgen finalize`: finish a freshly generated project.
//!
//! Each step is announced as the service reports it. Rename and build
//! failures abort with exit 1; version control problems are reported and the
//! command still succeeds.

use std::io;

use tracing::instrument;

use postgen_adapters::{LocalFilesystem, ProcessRunner, SystemLocator};
use postgen_core::application::{
    FinalizeEvent, FinalizeService, RenameOutcome, VcsOutcome, VerifyOutcome,
};

use super::current_dir;
use crate::{
    cli::FinalizeArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `postgen finalize` command.
#[instrument(skip_all)]
pub fn execute(args: FinalizeArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = match args.dir {
        // children run with this as cwd, so `./gradlew` must not be re-resolved
        Some(dir) => std::path::absolute(&dir)
            .map_err(CliError::io(format!("Failed to resolve '{}'", dir.display())))?,
        None => current_dir()?,
    };
    let settings = config
        .finalize
        .settings(dir, args.vcs.as_deref(), args.skip_verify);
    let vcs_program = settings.vcs_program.clone();

    let service = FinalizeService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ProcessRunner::new()),
        Box::new(SystemLocator::new()),
        settings,
    );

    let mut written = Ok(());
    let report = service.finalize_with(|event| {
        if written.is_ok() {
            written = announce(&output, &vcs_program, event);
        }
    })?;
    written?;

    output.json(&report)?;
    Ok(())
}

fn announce(output: &OutputManager, vcs_program: &str, event: FinalizeEvent<'_>) -> io::Result<()> {
    match event {
        FinalizeEvent::Renamed(RenameOutcome::Renamed { from, to }) => {
            output.success(&format!("Renamed {} to {}", from.display(), to.display()))
        }
        FinalizeEvent::Renamed(RenameOutcome::NotPresent { path }) => {
            output.info(&format!("No {} directory to rename", path.display()))
        }
        FinalizeEvent::Renamed(RenameOutcome::Disabled) => Ok(()),
        FinalizeEvent::BuildStarting { command } => {
            output.info(&format!("Running smoke test: {command}"))
        }
        FinalizeEvent::Verified(VerifyOutcome::Passed { command }) => {
            output.success(&format!("`{command}` passed"))
        }
        FinalizeEvent::Verified(VerifyOutcome::Skipped) => output.warning("Smoke test skipped"),
        FinalizeEvent::VcsDone(VcsOutcome::NotRequested { choice }) => {
            output.info(&format!("Version control '{choice}' selected, nothing to initialise"))
        }
        FinalizeEvent::VcsDone(VcsOutcome::ExecutableMissing { program }) => output.alert(&format!(
            "{program} requested, but {program} binary not found; repository not initialised"
        )),
        FinalizeEvent::VcsDone(VcsOutcome::Committed { executable }) => output.success(&format!(
            "Initialised repository with {}",
            executable.display()
        )),
        FinalizeEvent::VcsDone(VcsOutcome::Failed { step, reason }) => {
            output.error(&format!("{vcs_program} {step} failed: {reason}"))
        }
    }
}
