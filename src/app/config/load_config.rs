//! Task configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, PlatformConfig, ProvisionConfig, RuntimeConfig, TaskConfig};

/// Load the task configuration, applying file overrides when a path is given.
pub fn load_config(path: Option<&Path>) -> Result<TaskConfig, AppError> {
    let Some(path) = path else {
        return Ok(TaskConfig::default());
    };

    if !path.exists() {
        return Err(AppError::config_error(format!("Config file not found: {}", path.display())));
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse TOML overrides on top of the defaults.
pub fn parse_config(content: &str) -> Result<TaskConfig, AppError> {
    let dto: TaskConfigDto = toml::from_str(content)?;
    dto.try_into()
}

// --- DTOs for TOML deserialization ---

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskConfigDto {
    #[serde(default)]
    provision: ProvisionConfigDto,
    #[serde(default)]
    runtime: RuntimeConfigDto,
    #[serde(default)]
    platform: PlatformConfigDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProvisionConfigDto {
    endpoint: Option<String>,
    storage_gib: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuntimeConfigDto {
    source_dir: Option<PathBuf>,
    shared_dir: Option<PathBuf>,
    ignore: Option<Vec<String>>,
    executable: Option<PathBuf>,
    script: Option<String>,
    profile: Option<String>,
    config_file: Option<String>,
    /// Merged over the default overlay; a key present here replaces the default value.
    #[serde(default)]
    env: IndexMap<String, String>,
    storage_claim_env: Option<String>,
    log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlatformConfigDto {
    graphql_url: Option<String>,
    data_api_url: Option<String>,
    log_base: Option<String>,
    pipeline_name: Option<String>,
    timeout_secs: Option<u64>,
}

fn parse_url(field: &str, value: Option<String>, default: Url) -> Result<Url, AppError> {
    match value {
        Some(raw) => Url::parse(&raw)
            .map_err(|e| AppError::config_error(format!("Invalid URL for {}: {}", field, e))),
        None => Ok(default),
    }
}

fn merge_env(
    defaults: Vec<(String, String)>,
    overrides: IndexMap<String, String>,
) -> Vec<(String, String)> {
    let mut merged: IndexMap<String, String> = defaults.into_iter().collect();
    merged.extend(overrides);
    merged.into_iter().collect()
}

impl TryFrom<TaskConfigDto> for TaskConfig {
    type Error = AppError;

    fn try_from(dto: TaskConfigDto) -> Result<Self, Self::Error> {
        let default_provision = ProvisionConfig::default();
        let provision = ProvisionConfig {
            endpoint: parse_url(
                "provision.endpoint",
                dto.provision.endpoint,
                default_provision.endpoint,
            )?,
            storage_gib: dto.provision.storage_gib.unwrap_or(default_provision.storage_gib),
            timeout_secs: dto.provision.timeout_secs.unwrap_or(default_provision.timeout_secs),
        };
        if provision.storage_gib == 0 {
            return Err(AppError::config_error("provision.storage_gib must be greater than 0"));
        }

        let default_runtime = RuntimeConfig::default();
        let r = dto.runtime;
        let runtime = RuntimeConfig {
            source_dir: r.source_dir.unwrap_or(default_runtime.source_dir),
            shared_dir: r.shared_dir.unwrap_or(default_runtime.shared_dir),
            ignore: r.ignore.unwrap_or(default_runtime.ignore),
            executable: r.executable.unwrap_or(default_runtime.executable),
            script: r.script.unwrap_or(default_runtime.script),
            profile: r.profile.unwrap_or(default_runtime.profile),
            config_file: r.config_file.unwrap_or(default_runtime.config_file),
            env: merge_env(default_runtime.env, r.env),
            storage_claim_env: r.storage_claim_env.unwrap_or(default_runtime.storage_claim_env),
            log_file: r.log_file.unwrap_or(default_runtime.log_file),
        };

        let default_platform = PlatformConfig::default();
        let p = dto.platform;
        let platform = PlatformConfig {
            graphql_url: parse_url(
                "platform.graphql_url",
                p.graphql_url,
                default_platform.graphql_url,
            )?,
            data_api_url: parse_url(
                "platform.data_api_url",
                p.data_api_url,
                default_platform.data_api_url,
            )?,
            log_base: p.log_base.unwrap_or(default_platform.log_base),
            pipeline_name: p.pipeline_name.unwrap_or(default_platform.pipeline_name),
            timeout_secs: p.timeout_secs.unwrap_or(default_platform.timeout_secs),
        };

        Ok(TaskConfig { provision, runtime, platform })
    }
}

// --- End DTOs ---
