//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod policy;
pub mod scan;
pub mod status;

pub use args::{ConnectionArgs, OutputFormat, ScanArgs};
pub use context::CommandContext;

/// ctscan - run CodeThreat scans from CI and gate the build on the results
#[derive(Parser, Debug)]
#[command(name = "ctscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "CTSCAN_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, global = true, env = "CTSCAN_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the repository, run a scan, gate and publish the result
    Scan(Box<ScanArgs>),

    /// Show the current status of a scan
    Status {
        /// Scan ID returned when the scan was started
        scan_id: String,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Print the normalized findings policy
    Policy {
        /// Findings policy as YAML (a map or a list of maps)
        #[arg(long, env = "FAILED_ARGS", default_value = "")]
        failed_args: String,
    },

    /// Display version information
    Version,
}
