use std::io;

use thiserror::Error;

/// Library-wide error type for task operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// Parameter input could not be interpreted.
    #[error("Invalid value for parameter '{name}': {details}")]
    InvalidParameter { name: String, details: String },

    /// Unknown parameter name.
    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Required parameter has no value.
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    /// Config file could not be parsed.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Shared storage provisioning failed.
    #[error("Storage provisioning failed: {message}")]
    Provisioning { message: String, status: Option<u16> },

    /// Pipeline process could not be started.
    #[error("Failed to launch '{program}': {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Pipeline process exited unsuccessfully.
    #[error("Pipeline exited with {}", describe_exit(.code))]
    Execution { code: Option<i32> },

    /// Platform API request failed.
    #[error("Platform API error: {message}")]
    PlatformApi { message: String, status: Option<u16> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn provisioning<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::Provisioning { message: message.into(), status }
    }

    /// True for the configuration family (missing token, bad config, bad input).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::Configuration(_)
                | AppError::EnvironmentVariableMissing(_)
                | AppError::InvalidParameter { .. }
                | AppError::UnknownParameter(_)
                | AppError::MissingParameter(_)
                | AppError::TomlParseError(_)
        )
    }
}
