//! Flags accepted by every `postgen` subcommand.
//!
//! Hooks are normally launched by the template engine rather than typed by
//! hand, so colour can also be switched off through `NO_COLOR`.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum, builder::FalseyValueParser};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// More diagnostics on stderr: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Hide step progress; errors and alerts are still printed
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain symbols without ANSI colours (any non-empty NO_COLOR counts)
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Read this config file instead of the per-user one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How step results are reported on stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Rendering of step results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped
    #[default]
    Auto,
    /// Coloured lines with status symbols
    Human,
    /// Status symbols, no colour
    Plain,
    /// A single JSON report (`FeatureReport` / `FinalizeReport`)
    Json,
}
