//! Executable lookup: environment override first, then `PATH`.

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use postgen_core::application::ports::ExecutableLocator;

/// Looks up programs the way a shell would, with an env-var override.
///
/// An override that points at something unusable is not replaced by a
/// `PATH` search; the lookup fails instead.
#[derive(Debug, Clone, Default)]
pub struct SystemLocator {
    /// `None` reads the process environment at lookup time.
    fixed: Option<FixedEnv>,
}

#[derive(Debug, Clone, Default)]
struct FixedEnv {
    path: Option<OsString>,
    vars: HashMap<String, OsString>,
}

impl SystemLocator {
    /// Locator backed by the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locator with an explicit `PATH` and no override variables.
    pub fn with_path(path: impl Into<OsString>) -> Self {
        Self {
            fixed: Some(FixedEnv {
                path: Some(path.into()),
                vars: HashMap::new(),
            }),
        }
    }

    /// Add an override variable to a fixed environment.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.fixed
            .get_or_insert_with(FixedEnv::default)
            .vars
            .insert(name.into(), value.into());
        self
    }

    fn var(&self, name: &str) -> Option<OsString> {
        match &self.fixed {
            Some(fixed) => fixed.vars.get(name).cloned(),
            None => env::var_os(name),
        }
    }

    fn path_var(&self) -> Option<OsString> {
        match &self.fixed {
            Some(fixed) => fixed.path.clone(),
            None => env::var_os("PATH"),
        }
    }

    fn search_path(&self, program: &str) -> Option<PathBuf> {
        let path_var = self.path_var()?;
        env::split_paths(&path_var)
            .map(|dir| dir.join(program))
            .find(|candidate| is_executable(candidate))
    }
}

impl ExecutableLocator for SystemLocator {
    fn locate(&self, program: &str, env_override: &str) -> Option<PathBuf> {
        let candidate = match self.var(env_override).filter(|v| !v.is_empty()) {
            Some(value) => {
                debug!(var = env_override, "Using executable override");
                PathBuf::from(value)
            }
            None => self.search_path(program)?,
        };

        if is_executable(&candidate) {
            Some(candidate)
        } else {
            debug!(path = %candidate.display(), "Candidate is not an executable file");
            None
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
