//! CLI Adapter.

mod params;

pub use params::{PipelineArgs, render_parameters};

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::api;
use crate::app::config::load_config;
use crate::domain::{AppError, TaskConfig, VolumeName};
use crate::logging::{LogLevel, init_logging};

#[derive(Parser)]
#[command(name = "nf-omics-task")]
#[command(version)]
#[command(
    about = "Provision shared storage and run the nf-core/omicsgenetraitassociation pipeline",
    long_about = None
)]
struct Cli {
    /// TOML file overriding the built-in task configuration
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log verbosity (overrides NF_TASK_LOG)
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a shared storage volume and print its name
    #[clap(visible_alias = "p")]
    Provision,
    /// Launch the pipeline on an already provisioned volume
    #[clap(visible_alias = "r")]
    Run {
        /// Provisioned volume name
        #[arg(long, required_unless_present = "dry_run")]
        pvc_name: Option<String>,
        /// Print the pipeline command line and exit
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        params: PipelineArgs,
    },
    /// Provision storage, then launch the pipeline on it
    #[clap(visible_alias = "wf")]
    Workflow {
        /// Print the pipeline command line and exit
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        params: PipelineArgs,
    },
    /// List the pipeline parameters
    Params {
        /// Emit the declarations as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result = init_logging(cli.log_level).and_then(|_| dispatch(cli));
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Provision => {
            let volume = api::provision(config)?;
            println!("{}", volume);
            Ok(())
        }
        Commands::Run { pvc_name, dry_run, params } => {
            if dry_run {
                return run_preview(&config, &params);
            }
            let volume = pvc_name.map(VolumeName::new).ok_or_else(|| {
                AppError::config_error("--pvc-name is required unless --dry-run is given")
            })?;
            api::run(config, volume, params.resolve(&api::parameters())?)
        }
        Commands::Workflow { dry_run, params } => {
            if dry_run {
                return run_preview(&config, &params);
            }
            api::workflow(config, params.resolve(&api::parameters())?)
        }
        Commands::Params { json } => run_params(json),
    }
}

fn run_preview(config: &TaskConfig, params: &PipelineArgs) -> Result<(), AppError> {
    let values = params.resolve(&api::parameters())?;
    println!("{}", api::preview(config, &values)?);
    Ok(())
}

fn run_params(json: bool) -> Result<(), AppError> {
    let table = api::parameters();
    if json {
        let rendered = serde_json::to_string_pretty(&table).map_err(|e| {
            AppError::config_error(format!("Failed to serialize parameters: {}", e))
        })?;
        println!("{}", rendered);
    } else {
        print!("{}", render_parameters(&table));
    }
    Ok(())
}
