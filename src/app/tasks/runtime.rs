//! Nextflow runtime task: stage, build, execute, then always finalize.

use tracing::info;

use super::finalize::{FinalizeGuard, LogFinalizer};
use crate::adapters::stage_tree;
use crate::app::AppContext;
use crate::domain::{AppError, CommandLine, ExecutionContext, RuntimeConfig, VolumeName};
use crate::ports::{
    ExecutionNameResolver, LogUploader, ProcessRunner, ProcessSpec, StorageProvisioner,
};

/// Process specification for one launch of the pipeline runner.
pub fn process_spec(
    runtime: &RuntimeConfig,
    command: CommandLine,
    volume: &VolumeName,
) -> ProcessSpec {
    let mut env = runtime.env.clone();
    env.push((runtime.storage_claim_env.clone(), volume.as_str().to_string()));

    ProcessSpec { command, cwd: runtime.shared_dir.clone(), env }
}

/// Run the pipeline for one provisioned volume.
///
/// The log upload attempt happens on every exit path, after which any
/// staging or execution error is returned unchanged.
pub fn execute<P, R, N, U>(
    ctx: &AppContext<P, R, N, U>,
    execution: &ExecutionContext,
) -> Result<(), AppError>
where
    P: StorageProvisioner,
    R: ProcessRunner,
    N: ExecutionNameResolver,
    U: LogUploader,
{
    let runtime = &ctx.config().runtime;
    let _finalize = FinalizeGuard::new(LogFinalizer::new(
        ctx.names(),
        ctx.uploader(),
        runtime,
        &ctx.config().platform,
        &execution.token,
    ));

    let summary = stage_tree(&runtime.source_dir, &runtime.shared_dir, &runtime.ignore)?;
    info!(
        source = %runtime.source_dir.display(),
        destination = %runtime.shared_dir.display(),
        files = summary.files,
        ignored = summary.ignored,
        "staged working tree"
    );

    let command = CommandLine::build(runtime, &execution.parameters);
    info!("Launching Nextflow Runtime");
    info!("{}", command);

    let spec = process_spec(runtime, command, &execution.volume);
    let exit = ctx.runner().run(&spec)?;
    if !exit.success() {
        return Err(AppError::Execution { code: exit.code });
    }

    Ok(())
}
