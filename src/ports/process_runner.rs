//! Pipeline process port.

use std::path::PathBuf;

use crate::domain::{AppError, CommandLine};

/// A fully specified child process.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSpec {
    pub command: CommandLine,
    pub cwd: PathBuf,
    /// Variables layered over the inherited parent environment.
    pub env: Vec<(String, String)>,
}

impl ProcessSpec {
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for running a process to completion.
pub trait ProcessRunner {
    /// Block until the process exits.
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessExit, AppError>;
}
