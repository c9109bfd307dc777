//! Task configuration.
//!
//! `TaskConfig::default()` reproduces the deployed task exactly; a config
//! file only needs to name the values it overrides.

use std::path::PathBuf;

use url::Url;

/// Environment variable holding the per-run execution token.
pub const EXECUTION_TOKEN_ENV: &str = "FLYTE_INTERNAL_EXECUTION_ID";

/// Settings for the storage provisioning call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionConfig {
    pub endpoint: Url,
    pub storage_gib: u32,
    pub timeout_secs: u64,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(
                "http://nf-dispatcher-service.flyte.svc.cluster.local/provision-storage",
            )
            .expect("default provision endpoint is a valid URL"),
            storage_gib: 100,
            timeout_secs: 60,
        }
    }
}

/// Settings for the Nextflow runtime task.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Directory copied into the shared work directory before launch.
    pub source_dir: PathBuf,
    /// Shared work directory on the provisioned volume.
    pub shared_dir: PathBuf,
    /// Entry names skipped at every depth while staging.
    pub ignore: Vec<String>,
    pub executable: PathBuf,
    /// Pipeline script, relative to `shared_dir`.
    pub script: String,
    pub profile: String,
    pub config_file: String,
    /// Variables layered over the parent environment.
    pub env: Vec<(String, String)>,
    /// Variable receiving the provisioned volume name.
    pub storage_claim_env: String,
    /// Log file name inside `shared_dir`.
    pub log_file: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let ignore = [
            "latch",
            ".latch",
            "nextflow",
            ".nextflow",
            "work",
            "results",
            "miniconda",
            "anaconda3",
            "mambaforge",
        ];
        let env = [
            ("NXF_HOME", "/root/.nextflow"),
            ("NXF_OPTS", "-Xms2048M -Xmx8G -XX:ActiveProcessorCount=4"),
            ("NXF_DISABLE_CHECK_LATEST", "true"),
        ];

        Self {
            source_dir: PathBuf::from("/root"),
            shared_dir: PathBuf::from("/nf-workdir"),
            ignore: ignore.iter().map(|s| s.to_string()).collect(),
            executable: PathBuf::from("/root/nextflow"),
            script: "main.nf".to_string(),
            profile: "docker".to_string(),
            config_file: "latch.config".to_string(),
            env: env.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            storage_claim_env: "K8S_STORAGE_CLAIM_NAME".to_string(),
            log_file: ".nextflow.log".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn log_path(&self) -> PathBuf {
        self.shared_dir.join(&self.log_file)
    }
}

/// Settings for the platform API used after the run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformConfig {
    /// GraphQL endpoint resolving the execution display name.
    pub graphql_url: Url,
    /// Base URL of the data upload service.
    pub data_api_url: Url,
    /// Remote directory receiving run logs.
    pub log_base: String,
    /// Pipeline identifier used to namespace uploaded logs.
    pub pipeline_name: String,
    pub timeout_secs: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            graphql_url: Url::parse("https://vacuole.latch.bio/graphql")
                .expect("default graphql URL is a valid URL"),
            data_api_url: Url::parse("https://nucleus.latch.bio/")
                .expect("default data API URL is a valid URL"),
            log_base: "latch:///your_log_dir".to_string(),
            pipeline_name: "nf_nf_core_omicsgenetraitassociation".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Complete task configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskConfig {
    pub provision: ProvisionConfig,
    pub runtime: RuntimeConfig,
    pub platform: PlatformConfig,
}
