//! Diagnostics: a `tracing` subscriber writing to stderr.
//!
//! Stdout carries step results and JSON reports, so every event goes to
//! stderr. Only postgen's own crates are enabled; a set `RUST_LOG` replaces
//! the filter entirely.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the selected level.
const CRATES: [&str; 3] = ["postgen", "postgen_core", "postgen_adapters"];

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => crate_filter(level_for(args)).context("invalid log filter")?,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("tracing subscriber already installed")
}

/// `--quiet` wins over any number of `-v`.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `level` for postgen's crates, everything else off.
fn crate_filter(level: LevelFilter) -> Result<EnvFilter, ParseError> {
    let directives = CRATES.map(|krate| format!("{krate}={level}")).join(",");
    EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .parse(directives)
}
