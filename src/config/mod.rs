//! Runtime configuration for ctscan
//!
//! Everything arrives through the CI environment (or the matching CLI
//! flags); nothing is persisted between runs.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};

pub mod github;
pub mod policy;

pub use github::{GitHubContext, Visibility};
pub use policy::{Condition, PolicyConfig};

/// Default location of the SARIF artifact
pub const DEFAULT_SARIF_PATH: &str = "codethreat.sarif";

/// Raw credential inputs; which one is used is decided at login
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(
        token: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            token: non_empty(token),
            username: non_empty(username),
            password: non_empty(password),
        }
    }

    /// Fail unless a username/password pair or a token is present
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let has_pair = self.username.is_some() && self.password.is_some();
        if has_pair || self.token.is_some() {
            Ok(())
        } else {
            Err(ConfigError::MissingCredentials)
        }
    }
}

/// Polling cadence for the scan status loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Wait before the first status check
    pub initial_delay: Duration,
    /// Wait between subsequent status checks
    pub interval: Duration,
    /// Optional cap on status checks; unbounded when `None`
    pub max_polls: Option<u32>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(5),
            interval: Duration::from_secs(30),
            max_polls: None,
        }
    }
}

/// Connection settings for the CodeThreat server
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub server: String,
    pub org: String,
    pub credentials: Credentials,
}

impl ServerSettings {
    /// Validate that server and organization are present
    pub fn new(
        server: Option<String>,
        org: Option<String>,
        credentials: Credentials,
    ) -> Result<Self> {
        let server = non_empty(server).ok_or(ConfigError::MissingServer)?;
        if !server.starts_with("http://") && !server.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "CT_SERVER must be an http(s) URL, got '{}'",
                server
            ))
            .into());
        }
        let org = non_empty(org).ok_or(ConfigError::MissingOrg)?;

        Ok(Self {
            server,
            org,
            credentials,
        })
    }
}

/// Output options for the scan run
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub sarif_path: PathBuf,
    pub poll: PollSettings,
    pub github_token: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
