use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vks-audit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Audit supervisor-namespace storage against vSphere CNS")]
#[command(
    long_about = "Correlates the persistent volume claims of one supervisor namespace with the vSphere CNS volumes backing them, reporting per volume which guest cluster owns it, which claim or pod consumes it, and its datastore placement and capacity."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit one supervisor namespace
    Audit {
        /// Supervisor namespace to audit
        #[arg(value_name = "NAMESPACE")]
        namespace: String,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Override the kubectl binary
        #[arg(long, value_name = "PATH")]
        kubectl_bin: Option<String>,

        /// Override the govc binary
        #[arg(long, value_name = "PATH")]
        govc_bin: Option<String>,
    },

    /// Verify that kubectl and govc are installed and the vSphere session
    /// environment is configured
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
