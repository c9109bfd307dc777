use std::process::Command;

use tracing::info;

use crate::domain::AppError;
use crate::ports::{ProcessExit, ProcessRunner, ProcessSpec};

/// Runs processes with `std::process::Command`, inheriting stdio.
#[derive(Debug, Clone, Default)]
pub struct CommandProcessRunner;

impl ProcessRunner for CommandProcessRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessExit, AppError> {
        let program = spec.command.program();

        let mut command = Command::new(program);
        command.args(spec.command.args());
        command.current_dir(&spec.cwd);
        command.envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let status = command.status().map_err(|source| AppError::ProcessLaunch {
            program: program.display().to_string(),
            source,
        })?;

        info!(exit_code = ?status.code(), success = status.success(), "process exited");
        Ok(ProcessExit { code: status.code() })
    }
}
