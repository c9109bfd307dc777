use std::fmt;

use crate::domain::AppError;
use crate::domain::config::EXECUTION_TOKEN_ENV;
use crate::domain::parameters::ParameterValues;

/// Per-run credential identifying the workflow invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct ExecutionToken(String);

impl ExecutionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read the token from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var(EXECUTION_TOKEN_ENV) {
            Ok(token) if !token.is_empty() => Ok(Self(token)),
            _ => Err(AppError::EnvironmentVariableMissing(EXECUTION_TOKEN_ENV.into())),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header of platform requests.
    pub fn authorization(&self) -> String {
        format!("Latch-Execution-Token {}", self.0)
    }
}

impl fmt::Debug for ExecutionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExecutionToken([REDACTED])")
    }
}

/// Name of a provisioned shared storage volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeName(String);

impl VolumeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VolumeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything one runtime invocation needs.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub token: ExecutionToken,
    pub volume: VolumeName,
    pub parameters: ParameterValues,
}
