//! nf-omics-task: provision shared storage and run the
//! nf-core/omicsgenetraitassociation Nextflow pipeline on it, uploading the
//! run log afterwards.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod logging;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{parameters, preview, provision, run, workflow};
pub use app::config::{load_config, parse_config};
pub use app::tasks::{FinalizeOutcome, SkipReason};
pub use domain::{
    AppError, CommandLine, ParameterSpec, ParameterTable, ParameterType, ParameterValue,
    ParameterValues, TaskConfig, VolumeName,
};
