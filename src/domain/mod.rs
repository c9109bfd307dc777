pub mod command_line;
pub mod config;
pub mod error;
pub mod execution;
pub mod parameters;
pub mod remote_path;

pub use command_line::CommandLine;
pub use config::{EXECUTION_TOKEN_ENV, PlatformConfig, ProvisionConfig, RuntimeConfig, TaskConfig};
pub use error::AppError;
pub use execution::{ExecutionContext, ExecutionToken, VolumeName};
pub use parameters::{ParameterSpec, ParameterTable, ParameterType, ParameterValue, ParameterValues};
pub use remote_path::RemotePath;
