//! Workflow entry: provision shared storage, then run the pipeline on it.

use crate::app::AppContext;
use crate::app::tasks::{initialize, runtime};
use crate::domain::{AppError, ExecutionContext, ExecutionToken, ParameterValues};
use crate::ports::{ExecutionNameResolver, LogUploader, ProcessRunner, StorageProvisioner};

/// Provision a volume and run the pipeline on it.
///
/// A provisioning failure returns before anything is staged or launched.
pub fn execute<P, R, N, U>(
    ctx: &AppContext<P, R, N, U>,
    token: ExecutionToken,
    parameters: ParameterValues,
) -> Result<(), AppError>
where
    P: StorageProvisioner,
    R: ProcessRunner,
    N: ExecutionNameResolver,
    U: LogUploader,
{
    parameters.ensure_required(ctx.parameters())?;

    let volume = initialize::execute(ctx.provisioner(), &token)?;
    let execution = ExecutionContext { token, volume, parameters };
    runtime::execute(ctx, &execution)
}
