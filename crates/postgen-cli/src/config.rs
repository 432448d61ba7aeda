//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the settings derived
//! from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`POSTGEN_FINALIZE__VERIFY=false`)
//! 3. `.postgen.toml` in the current directory
//! 4. User config file (or the file given with `--config`)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use postgen_core::{
    application::{CommandSpec, FeatureTargets, FinalizeSettings},
    domain::{PatchRules, VersionControl},
    error::PostgenResult,
};

/// Per-directory override file.
pub const LOCAL_CONFIG: &str = ".postgen.toml";

const ENV_PREFIX: &str = "POSTGEN";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Feature registration.
    pub feature: FeatureConfig,
    /// Project finalization.
    pub finalize: FinalizeConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Relative paths are resolved against the feature directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_file: Option<PathBuf>,
    pub group: String,
    pub section_marker: String,
    pub indent: String,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        let rules = PatchRules::default();
        Self {
            settings_file: None,
            build_file: None,
            group: rules.group().to_owned(),
            section_marker: rules.section_marker().to_owned(),
            indent: rules.indent().to_owned(),
        }
    }
}

impl FeatureConfig {
    pub fn rules(&self) -> PostgenResult<PatchRules> {
        Ok(PatchRules::new(
            &self.group,
            &self.section_marker,
            &self.indent,
        )?)
    }

    /// Default targets for `feature_dir`, with configured files applied.
    pub fn targets(&self, feature_dir: &Path) -> FeatureTargets {
        let mut targets = FeatureTargets::from_feature_dir(feature_dir);
        if let Some(path) = &self.settings_file {
            targets.settings_file = feature_dir.join(path);
        }
        if let Some(path) = &self.build_file {
            targets.build_file = feature_dir.join(path);
        }
        targets
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizeConfig {
    /// Used when `--vcs` is not given.
    pub version_control: String,
    pub placeholder_dir: String,
    pub rename_placeholder: bool,
    pub verify: bool,
    pub build_program: String,
    pub build_args: Vec<String>,
    pub vcs_program: String,
    /// Environment variable holding an explicit path to the VCS executable.
    pub vcs_env: String,
    pub commit_message: String,
}

impl Default for FinalizeConfig {
    fn default() -> Self {
        let defaults = FinalizeSettings::new(".");
        let build = CommandSpec::gradle_smoke_test();
        Self {
            version_control: defaults.vcs.to_string(),
            placeholder_dir: defaults.placeholder_dir.unwrap_or_default(),
            rename_placeholder: true,
            verify: true,
            build_program: build.program,
            build_args: build.args,
            vcs_program: defaults.vcs_program,
            vcs_env: defaults.vcs_env,
            commit_message: defaults.commit_message,
        }
    }
}

impl FinalizeConfig {
    /// Settings for one run in `project_dir`, with CLI overrides applied.
    pub fn settings(
        &self,
        project_dir: impl Into<PathBuf>,
        vcs: Option<&str>,
        skip_verify: bool,
    ) -> FinalizeSettings {
        FinalizeSettings {
            project_dir: project_dir.into(),
            placeholder_dir: self
                .rename_placeholder
                .then(|| self.placeholder_dir.clone()),
            build: (self.verify && !skip_verify)
                .then(|| CommandSpec::new(&self.build_program, &self.build_args)),
            vcs: VersionControl::parse(vcs.unwrap_or(&self.version_control)),
            vcs_program: self.vcs_program.clone(),
            vcs_env: self.vcs_env.clone(),
            commit_message: self.commit_message.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path passed via `--config`; it replaces the user
    /// config location and must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let user_file = config_file.cloned().unwrap_or_else(Self::config_path);

        let settings = config::Config::builder()
            .add_source(config::File::from(user_file.as_path()).required(config_file.is_some()))
            .add_source(config::File::from(Path::new(LOCAL_CONFIG)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("finalize.build_args"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.postgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "postgen", "postgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }
}
