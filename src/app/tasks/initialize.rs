//! Storage provisioning task.

use tracing::info;

use crate::domain::{AppError, ExecutionToken, VolumeName};
use crate::ports::StorageProvisioner;

/// Provision the shared volume for this run.
pub fn execute<P: StorageProvisioner>(
    provisioner: &P,
    token: &ExecutionToken,
) -> Result<VolumeName, AppError> {
    let volume = provisioner.provision(token)?;
    info!(volume = %volume, "Provisioned shared storage volume");
    Ok(volume)
}
