use clap::{Args, Parser, Subcommand};
use k8s_warden_core::DEFAULT_WARDEN_NAME;

pub const DEFAULT_NAMESPACE: &str = "k8s-warden";

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// kubernetes namespace to work with
    #[arg(short = 'n', long, global = true, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
    /// override default kubeconfig
    #[arg(long, global = true)]
    pub kube_config: Option<String>,
    /// override default kubeconfig context
    #[arg(long, global = true)]
    pub kube_context: Option<String>,
    /// enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose_logging: bool,
    /// enable trace output (more detailed than verbose, overrides it if present)
    #[arg(long = "trace", global = true)]
    pub trace_logging: bool,
}

impl GlobalArgs {
    pub fn get_log_level(&self) -> LogLevel {
        if self.trace_logging {
            return LogLevel::Trace;
        }

        if self.verbose_logging {
            return LogLevel::Verbose;
        }

        LogLevel::Normal
    }
}

pub enum LogLevel {
    Normal,
    Verbose,
    Trace,
}

#[derive(Debug, Subcommand)]
#[command(arg_required_else_help = true)]
pub enum Commands {
    /// print the CRDs required by k8s-warden to stdout
    #[command(alias = "e")]
    ExportCrds,
    /// enable the tenant quota subsystem for a warden instance
    EnableQuota(QuotaArgs),
    /// disable the tenant quota subsystem for a warden instance
    DisableQuota(QuotaArgs),
}

#[derive(Debug, Args)]
pub struct QuotaArgs {
    /// name of the warden instance
    #[arg(long, default_value = DEFAULT_WARDEN_NAME)]
    pub name: String,
    /// how long to wait for the subsystem to converge, in seconds
    #[arg(long, default_value_t = 300)]
    pub wait_timeout: u64,
}
