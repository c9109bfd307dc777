use crate::adapters::{
    CommandProcessRunner, GraphqlExecutionNameResolver, HttpLogUploader, HttpStorageProvisioner,
};
use crate::domain::{AppError, ParameterTable, TaskConfig};
use crate::ports::{ExecutionNameResolver, LogUploader, ProcessRunner, StorageProvisioner};

/// Application context holding dependencies for task execution.
pub struct AppContext<P, R, N, U>
where
    P: StorageProvisioner,
    R: ProcessRunner,
    N: ExecutionNameResolver,
    U: LogUploader,
{
    provisioner: P,
    runner: R,
    names: N,
    uploader: U,
    config: TaskConfig,
    parameters: ParameterTable,
}

/// Context wired to the live platform services.
pub type PlatformContext = AppContext<
    HttpStorageProvisioner,
    CommandProcessRunner,
    GraphqlExecutionNameResolver,
    HttpLogUploader,
>;

impl<P, R, N, U> AppContext<P, R, N, U>
where
    P: StorageProvisioner,
    R: ProcessRunner,
    N: ExecutionNameResolver,
    U: LogUploader,
{
    /// Create a new application context.
    pub fn new(provisioner: P, runner: R, names: N, uploader: U, config: TaskConfig) -> Self {
        Self {
            provisioner,
            runner,
            names,
            uploader,
            config,
            parameters: ParameterTable::omicsgenetraitassociation(),
        }
    }

    pub fn provisioner(&self) -> &P {
        &self.provisioner
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn names(&self) -> &N {
        &self.names
    }

    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Declared pipeline parameters.
    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }
}

impl PlatformContext {
    pub fn from_config(config: TaskConfig) -> Result<Self, AppError> {
        Ok(Self::new(
            HttpStorageProvisioner::new(&config.provision)?,
            CommandProcessRunner,
            GraphqlExecutionNameResolver::new(&config.platform)?,
            HttpLogUploader::new(&config.platform)?,
            config,
        ))
    }
}
