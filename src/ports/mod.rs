mod execution_name;
mod log_uploader;
mod process_runner;
mod storage_provisioner;

pub use execution_name::ExecutionNameResolver;
pub use log_uploader::LogUploader;
pub use process_runner::{ProcessExit, ProcessRunner, ProcessSpec};
pub use storage_provisioner::StorageProvisioner;
