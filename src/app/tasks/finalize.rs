//! Post-run log upload.
//!
//! [`FinalizeGuard`] runs the upload when it goes out of scope, so every exit
//! path of the runtime task (success, error return, or unwind) attempts it
//! exactly once. Nothing here returns an error to the caller.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::domain::{ExecutionToken, PlatformConfig, RemotePath, RuntimeConfig};
use crate::ports::{ExecutionNameResolver, LogUploader};

/// Remote file name for the uploaded log.
const REMOTE_LOG_NAME: &str = "nextflow.log";

/// Why the log upload did not happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    LogMissing(PathBuf),
    ExecutionNameUnavailable,
    UploadFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::LogMissing(path) => write!(f, "{} not found", path.display()),
            SkipReason::ExecutionNameUnavailable => f.write_str("failed to get execution name"),
            SkipReason::UploadFailed(details) => write!(f, "upload failed: {}", details),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    Uploaded(RemotePath),
    Skipped(SkipReason),
}

pub struct LogFinalizer<'a, N: ExecutionNameResolver, U: LogUploader> {
    names: &'a N,
    uploader: &'a U,
    runtime: &'a RuntimeConfig,
    platform: &'a PlatformConfig,
    token: &'a ExecutionToken,
}

impl<'a, N: ExecutionNameResolver, U: LogUploader> LogFinalizer<'a, N, U> {
    pub fn new(
        names: &'a N,
        uploader: &'a U,
        runtime: &'a RuntimeConfig,
        platform: &'a PlatformConfig,
        token: &'a ExecutionToken,
    ) -> Self {
        Self { names, uploader, runtime, platform, token }
    }

    /// Locate the log, resolve the run name, and upload.
    pub fn finalize(&self) -> FinalizeOutcome {
        let log_path = self.runtime.log_path();
        if !log_path.is_file() {
            return FinalizeOutcome::Skipped(SkipReason::LogMissing(log_path));
        }

        let Some(name) = self.names.execution_name(self.token) else {
            return FinalizeOutcome::Skipped(SkipReason::ExecutionNameUnavailable);
        };

        let remote = RemotePath::run_log(
            &self.platform.log_base,
            &self.platform.pipeline_name,
            &name,
            REMOTE_LOG_NAME,
        );
        info!(remote = %remote.path(), "Uploading {}", self.runtime.log_file);

        match self.uploader.upload(self.token, &log_path, &remote) {
            Ok(()) => FinalizeOutcome::Uploaded(remote),
            Err(e) => FinalizeOutcome::Skipped(SkipReason::UploadFailed(e.to_string())),
        }
    }
}

/// Runs [`LogFinalizer::finalize`] on drop.
pub struct FinalizeGuard<'a, N: ExecutionNameResolver, U: LogUploader> {
    finalizer: LogFinalizer<'a, N, U>,
}

impl<'a, N: ExecutionNameResolver, U: LogUploader> FinalizeGuard<'a, N, U> {
    pub fn new(finalizer: LogFinalizer<'a, N, U>) -> Self {
        Self { finalizer }
    }
}

impl<N: ExecutionNameResolver, U: LogUploader> Drop for FinalizeGuard<'_, N, U> {
    fn drop(&mut self) {
        match self.finalizer.finalize() {
            FinalizeOutcome::Uploaded(remote) => info!(remote = %remote, "log upload complete"),
            FinalizeOutcome::Skipped(reason) => warn!("Skipping logs upload, {}", reason),
        }
    }
}
