//! Remote artifact upload port.

use std::path::Path;

use crate::domain::{AppError, ExecutionToken, RemotePath};

/// Port for copying a local file to remote storage.
pub trait LogUploader {
    fn upload(
        &self,
        token: &ExecutionToken,
        local: &Path,
        remote: &RemotePath,
    ) -> Result<(), AppError>;
}
