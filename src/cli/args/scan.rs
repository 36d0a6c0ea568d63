//! Flags for the `scan` command

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use super::ConnectionArgs;
use crate::config::{DEFAULT_SARIF_PATH, PollSettings, ScanSettings};

#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// GitHub token for project registration and report publishing
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Findings policy as YAML (a map or a list of maps)
    #[arg(long, env = "FAILED_ARGS", default_value = "")]
    pub failed_args: String,

    /// Where to write the SARIF report
    #[arg(long, default_value = DEFAULT_SARIF_PATH)]
    pub sarif_path: PathBuf,

    /// Seconds between status checks
    #[arg(long, default_value_t = 30)]
    pub poll_interval: u64,

    /// Seconds before the first status check
    #[arg(long, default_value_t = 5)]
    pub initial_delay: u64,

    /// Give up after this many status checks (unbounded by default)
    #[arg(long)]
    pub max_polls: Option<u32>,
}

impl ScanArgs {
    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            sarif_path: self.sarif_path.clone(),
            poll: PollSettings {
                initial_delay: Duration::from_secs(self.initial_delay),
                interval: Duration::from_secs(self.poll_interval),
                max_polls: self.max_polls,
            },
            github_token: self
                .github_token
                .clone()
                .filter(|t| !t.trim().is_empty()),
        }
    }
}
