//! Shared testing utilities for nf-omics-task CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TOKEN_ENV: &str = "FLYTE_INTERNAL_EXECUTION_ID";

/// Isolated source and shared directories for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    source_dir: PathBuf,
    shared_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let source_dir = root.path().join("source");
        let shared_dir = root.path().join("shared");
        fs::create_dir_all(&source_dir).expect("Failed to create source directory");
        fs::create_dir_all(&shared_dir).expect("Failed to create shared directory");
        fs::write(source_dir.join("main.nf"), "workflow {}\n").expect("Failed to write main.nf");

        Self { root, source_dir, shared_dir }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn shared_dir(&self) -> &Path {
        &self.shared_dir
    }

    /// Build a command for invoking the compiled binary with no execution token.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("nf-omics-task").expect("Failed to locate binary");
        cmd.current_dir(self.root()).env_remove(TOKEN_ENV).env("NF_TASK_LOG", "error");
        cmd
    }

    /// Like [`cli`](Self::cli), with the execution token set.
    pub fn cli_with_token(&self, token: &str) -> Command {
        let mut cmd = self.cli();
        cmd.env(TOKEN_ENV, token);
        cmd
    }

    /// Write a config file whose runtime directories point into this context.
    ///
    /// `runtime_extra` lands in the `[runtime]` table; `extra` is appended
    /// verbatim and may add further tables.
    pub fn write_config(&self, runtime_extra: &str, extra: &str) -> PathBuf {
        let path = self.root().join("task.toml");
        let content = format!(
            "[runtime]\nsource_dir = {:?}\nshared_dir = {:?}\n{}\n\n{}\n",
            self.source_dir.display().to_string(),
            self.shared_dir.display().to_string(),
            runtime_extra,
            extra,
        );
        fs::write(&path, content).expect("Failed to write task config");
        path
    }

    /// Write an executable shell script standing in for the pipeline runner.
    #[cfg(unix)]
    pub fn write_runner(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.root().join("fake-nextflow");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write runner");
        let mut perms = fs::metadata(&path).expect("runner metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to mark runner executable");
        path
    }
}
