use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, ExecutionToken, RemotePath, VolumeName};
use crate::ports::{
    ExecutionNameResolver, LogUploader, ProcessExit, ProcessRunner, ProcessSpec,
    StorageProvisioner,
};

#[derive(Clone)]
pub struct FakeStorageProvisioner {
    volume: Option<String>,
    failure_status: u16,
    calls: Arc<Mutex<usize>>,
}

impl FakeStorageProvisioner {
    pub fn succeeding(volume: impl Into<String>) -> Self {
        Self { volume: Some(volume.into()), failure_status: 0, calls: Arc::new(Mutex::new(0)) }
    }

    pub fn failing(status: u16) -> Self {
        Self { volume: None, failure_status: status, calls: Arc::new(Mutex::new(0)) }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl StorageProvisioner for FakeStorageProvisioner {
    fn provision(&self, _token: &ExecutionToken) -> Result<VolumeName, AppError> {
        *self.calls.lock().unwrap() += 1;
        match &self.volume {
            Some(volume) => Ok(VolumeName::new(volume.clone())),
            None => Err(AppError::Provisioning {
                message: "fake provisioning failure".into(),
                status: Some(self.failure_status),
            }),
        }
    }
}

#[derive(Clone)]
pub struct FakeProcessRunner {
    exit_code: Option<i32>,
    launchable: bool,
    log_file: Option<String>,
    specs: Arc<Mutex<Vec<ProcessSpec>>>,
}

impl FakeProcessRunner {
    pub fn exiting(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            launchable: true,
            log_file: None,
            specs: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn unlaunchable() -> Self {
        Self { launchable: false, ..Self::exiting(0) }
    }

    /// Write a log file into the working directory when run, as Nextflow does.
    pub fn writing_log(mut self, file_name: impl Into<String>) -> Self {
        self.log_file = Some(file_name.into());
        self
    }

    pub fn specs(&self) -> Vec<ProcessSpec> {
        self.specs.lock().unwrap().clone()
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessExit, AppError> {
        self.specs.lock().unwrap().push(spec.clone());

        if !self.launchable {
            return Err(AppError::ProcessLaunch {
                program: spec.command.program().display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "fake launch failure"),
            });
        }
        if let Some(log_file) = &self.log_file {
            fs::write(spec.cwd.join(log_file), "fake nextflow log\n")?;
        }
        Ok(ProcessExit { code: self.exit_code })
    }
}

#[derive(Clone)]
pub struct FakeExecutionNameResolver {
    name: Option<String>,
    calls: Arc<Mutex<usize>>,
}

impl FakeExecutionNameResolver {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), calls: Arc::new(Mutex::new(0)) }
    }

    pub fn unavailable() -> Self {
        Self { name: None, calls: Arc::new(Mutex::new(0)) }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ExecutionNameResolver for FakeExecutionNameResolver {
    fn execution_name(&self, _token: &ExecutionToken) -> Option<String> {
        *self.calls.lock().unwrap() += 1;
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpload {
    pub local: PathBuf,
    pub remote: RemotePath,
}

#[derive(Clone, Default)]
pub struct FakeLogUploader {
    fail: bool,
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
}

impl FakeLogUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

impl LogUploader for FakeLogUploader {
    fn upload(
        &self,
        _token: &ExecutionToken,
        local: &Path,
        remote: &RemotePath,
    ) -> Result<(), AppError> {
        self.uploads
            .lock()
            .unwrap()
            .push(RecordedUpload { local: local.to_path_buf(), remote: remote.clone() });
        if self.fail {
            return Err(AppError::PlatformApi {
                message: "fake upload failure".into(),
                status: Some(500),
            });
        }
        Ok(())
    }
}
