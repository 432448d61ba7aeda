//! Blocking subprocess runner using `std::process::Command`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use postgen_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandStatus, Invocation},
    },
    error::PostgenResult,
};

/// Runs commands with inherited stdio and waits for them to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %invocation))]
    fn run(&self, invocation: &Invocation) -> PostgenResult<CommandStatus> {
        let program = resolve_program(&invocation.program, &invocation.cwd);
        debug!(program = %program.display(), cwd = %invocation.cwd.display(), "Spawning");

        let status = Command::new(&program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
            .map_err(|e| ApplicationError::CommandSpawnFailed {
                command: invocation.to_string(),
                reason: e.to_string(),
            })?;

        debug!(code = ?status.code(), "Process exited");
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

/// Relative paths with a separator (`./gradlew`) are resolved against the
/// working directory of the child; bare names go through `PATH`.
fn resolve_program(program: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        cwd.join(path)
    } else {
        path.to_path_buf()
    }
}
