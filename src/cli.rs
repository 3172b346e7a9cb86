/// CLI argument parsing and command handling

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::stats::Metric;

// Build timestamp injected at compile time
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

#[derive(Parser)]
#[command(name = "servmon")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {
    /// Backend API base URL (overrides SERVMON_BACKEND_URL and the config file)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Host name passed to the reachability probe
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe backend reachability for the configured host
    Ping,

    /// Print a one-shot snapshot of server health
    Status,

    /// Open the detail screen for a single metric
    Stats {
        /// Metric to drill into
        metric: MetricArg,
    },
}

/// Route keys accepted by `servmon stats <metric>`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Cpu,
    Memory,
    Storage,
    Containers,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Cpu => Metric::Cpu,
            MetricArg::Memory => Metric::Memory,
            MetricArg::Storage => Metric::Storage,
            MetricArg::Containers => Metric::Containers,
        }
    }
}
