//! API Facade for the application.
//!
//! Glues together context creation, credential lookup, and task execution.

use crate::app::tasks::{initialize, runtime};
use crate::app::{PlatformContext, workflow};
use crate::domain::{
    AppError, CommandLine, ExecutionContext, ExecutionToken, ParameterTable, ParameterValues,
    TaskConfig, VolumeName,
};

/// Provision shared storage for the current execution.
pub fn provision(config: TaskConfig) -> Result<VolumeName, AppError> {
    let token = ExecutionToken::from_env()?;
    let ctx = PlatformContext::from_config(config)?;
    initialize::execute(ctx.provisioner(), &token)
}

/// Run the pipeline on an already provisioned volume.
pub fn run(
    config: TaskConfig,
    volume: VolumeName,
    parameters: ParameterValues,
) -> Result<(), AppError> {
    let token = ExecutionToken::from_env()?;
    let ctx = PlatformContext::from_config(config)?;
    parameters.ensure_required(ctx.parameters())?;

    runtime::execute(&ctx, &ExecutionContext { token, volume, parameters })
}

/// Provision storage and run the pipeline on it.
pub fn workflow(config: TaskConfig, parameters: ParameterValues) -> Result<(), AppError> {
    let token = ExecutionToken::from_env()?;
    let ctx = PlatformContext::from_config(config)?;
    workflow::execute(&ctx, token, parameters)
}

/// The pipeline command line that would be launched, without side effects.
pub fn preview(config: &TaskConfig, parameters: &ParameterValues) -> Result<CommandLine, AppError> {
    parameters.ensure_required(&self::parameters())?;
    Ok(CommandLine::build(&config.runtime, parameters))
}

/// Declared pipeline parameters.
pub fn parameters() -> ParameterTable {
    ParameterTable::omicsgenetraitassociation()
}
