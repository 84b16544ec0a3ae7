use anyhow::Context;
use clap::Parser;
use cli::{Commands, GlobalArgs, LogLevel};
use commands::{disable_quota::disable_quota, enable_quota::enable_quota, export_crds::export_crds};
use env_logger::Target;
use k8s_warden_core::kubernetes::operations::create_local_client;
use kube::Client;
use log::LevelFilter;

use crate::cli::Cli;

mod cli;
mod commands;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    configure_logging(&cli.global_args);

    if let Some(command) = cli.command {
        match command {
            Commands::ExportCrds => export_crds()?,
            Commands::EnableQuota(args) => {
                let client = create_client(&cli.global_args).await?;
                enable_quota(&cli.global_args, &args, &client).await?
            }
            Commands::DisableQuota(args) => {
                let client = create_client(&cli.global_args).await?;
                disable_quota(&cli.global_args, &args, &client).await?
            }
        }
    }

    Ok(())
}

async fn create_client(global_args: &GlobalArgs) -> anyhow::Result<Client> {
    create_local_client(&global_args.kube_config, &global_args.kube_context)
        .await
        .context("Couldn't initialize k8s API client!")
}

fn configure_logging(global_args: &GlobalArgs) {
    let log_level = global_args.get_log_level();
    let mut logger = env_logger::builder();

    logger
        .format_timestamp(None)
        .format_module_path(matches!(log_level, LogLevel::Trace))
        .format_target(false)
        .format_level(false)
        .target(Target::Stderr);

    if let LogLevel::Normal = log_level {
        logger.filter(Some("k8s_warden"), LevelFilter::Info);
        logger.filter(Some("k8s_warden_core"), LevelFilter::Info);
    }

    if let LogLevel::Verbose = log_level {
        logger.filter(Some("k8s_warden"), LevelFilter::Debug);
        logger.filter(Some("k8s_warden_core"), LevelFilter::Debug);
    }

    if let LogLevel::Trace = log_level {
        logger.filter(None, LevelFilter::Debug);
    }

    logger.init();
}
