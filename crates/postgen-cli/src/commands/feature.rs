//! `postgen feature` — register a generated feature module.
//!
//! Responsibility: resolve the two target files, call the core feature
//! service, and display the outcomes. No patch logic lives here.

use tracing::{debug, instrument};

use postgen_adapters::LocalFilesystem;
use postgen_core::application::{FeatureReport, FeatureService, PatchOutcome};

use super::current_dir;
use crate::{
    cli::FeatureArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `postgen feature` command.
#[instrument(skip_all, fields(feature = %args.name))]
pub fn execute(args: FeatureArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = match args.dir {
        Some(dir) => dir,
        None => current_dir()?,
    };

    let rules = config.feature.rules()?;
    let mut targets = config.feature.targets(&dir);
    if let Some(path) = args.settings_file {
        targets.settings_file = path;
    }
    if let Some(path) = args.build_file {
        targets.build_file = path;
    }
    debug!(
        settings = %targets.settings_file.display(),
        build = %targets.build_file.display(),
        "Targets resolved"
    );

    let service =
        FeatureService::new(Box::new(LocalFilesystem::new()), rules).with_dry_run(args.dry_run);
    let report = service.register(&targets, &args.name)?;

    output.json(&report)?;
    show_report(&report, &output)
}

fn show_report(report: &FeatureReport, output: &OutputManager) -> CliResult<()> {
    let verb = if report.dry_run { "Would add" } else { "Added" };
    let name = &report.feature;

    for (what, outcome) in [
        ("include for", &report.include),
        ("dependency on", &report.dependency),
    ] {
        match outcome {
            PatchOutcome::Inserted { path, line } => output.success(&format!(
                "{verb} {what} '{name}' in {} (line {line})",
                path.display()
            ))?,
            PatchOutcome::Skipped { reason } => {
                output.warning(&format!("Skipped {what} '{name}': {reason}"))?
            }
        }
    }

    if report.dry_run {
        output.info("Dry run: no files were written")?;
    }
    Ok(())
}
