pub mod command_runner;
pub mod execution_name_graphql;
mod http;
pub mod log_uploader_http;
pub mod provisioner_http;
pub mod working_tree;

pub use command_runner::CommandProcessRunner;
pub use execution_name_graphql::GraphqlExecutionNameResolver;
pub use log_uploader_http::HttpLogUploader;
pub use provisioner_http::HttpStorageProvisioner;
pub use working_tree::{StageSummary, stage_tree};
