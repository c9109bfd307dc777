//! Shared storage provisioning port.

use crate::domain::{AppError, ExecutionToken, VolumeName};

/// Port for requesting a shared storage volume for the run.
pub trait StorageProvisioner {
    /// Request a volume; a single attempt with no retry.
    fn provision(&self, token: &ExecutionToken) -> Result<VolumeName, AppError>;
}
