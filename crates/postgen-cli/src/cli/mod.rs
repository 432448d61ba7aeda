//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "postgen",
    bin_name = "postgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Post-generation hooks for the Gradle feature template",
    long_about = "postgen runs after a project or feature module has been generated: \
                  it registers new features in settings.gradle and the bootstrap \
                  build file, and finalizes fresh projects (rename .github, smoke \
                  test the build, initialise git).",
    after_help = "EXAMPLES:\n\
        \x20 postgen feature payments            # from inside features/payments\n\
        \x20 postgen finalize --vcs git          # from the generated project root\n\
        \x20 postgen finalize --skip-verify\n\
        \x20 postgen completions bash > /usr/share/bash-completion/completions/postgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a generated feature module with the project.
    #[command(
        visible_alias = "f",
        about = "Register a feature module in settings.gradle and the bootstrap build",
        after_help = "EXAMPLES:\n\
            \x20 postgen feature payments\n\
            \x20 postgen feature payments --dir features/payments\n\
            \x20 postgen feature payments --settings-file settings.gradle --dry-run"
    )]
    Feature(FeatureArgs),

    /// Finish a freshly generated project.
    #[command(
        about = "Rename github/, run the smoke-test build, initialise git",
        after_help = "EXAMPLES:\n\
            \x20 postgen finalize\n\
            \x20 postgen finalize --vcs none\n\
            \x20 GIT=/opt/git/bin/git postgen finalize --dir my-app"
    )]
    Finalize(FinalizeArgs),

    /// Initialise a postgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 postgen init           # user config location\n\
            \x20 postgen init --local   # .postgen.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 postgen completions bash > ~/.local/share/bash-completion/completions/postgen\n\
            \x20 postgen completions zsh  > ~/.zfunc/_postgen\n\
            \x20 postgen completions fish > ~/.config/fish/completions/postgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 postgen config get finalize.version_control\n\
            \x20 postgen config list\n\
            \x20 postgen config path"
    )]
    Config(ConfigCommands),
}

// ── feature ───────────────────────────────────────────────────────────────────

/// Arguments for `postgen feature`.
#[derive(Debug, Args)]
pub struct FeatureArgs {
    /// Feature module name.  An empty name is accepted and skipped.
    #[arg(value_name = "NAME", help = "Feature module name")]
    pub name: String,

    /// Directory of the generated feature (default: current directory).
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Feature directory; the project root is two levels up"
    )]
    pub dir: Option<PathBuf>,

    #[arg(
        long = "settings-file",
        value_name = "FILE",
        help = "Settings file to patch (default: <DIR>/../../settings.gradle)"
    )]
    pub settings_file: Option<PathBuf>,

    #[arg(
        long = "build-file",
        value_name = "FILE",
        help = "Build file to patch (default: <DIR>/../../bootstrap/app/build.gradle)"
    )]
    pub build_file: Option<PathBuf>,

    /// Preview the insertions without writing any files.
    #[arg(long = "dry-run", help = "Show what would be inserted without writing")]
    pub dry_run: bool,
}

// ── finalize ──────────────────────────────────────────────────────────────────

/// Arguments for `postgen finalize`.
#[derive(Debug, Args)]
pub struct FinalizeArgs {
    /// Generated project root (default: current directory).
    #[arg(short = 'd', long = "dir", value_name = "DIR", help = "Project directory")]
    pub dir: Option<PathBuf>,

    /// Version control chosen at generation time; only `git` acts.
    #[arg(
        long = "vcs",
        value_name = "CHOICE",
        help = "Version control choice (default: finalize.version_control)"
    )]
    pub vcs: Option<String>,

    /// Skip `./gradlew clean build`.
    #[arg(long = "skip-verify", help = "Skip the smoke-test build")]
    pub skip_verify: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `postgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.postgen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `postgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `postgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `finalize.verify`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
