//! CodeThreat connection flags

use clap::Args;

use crate::config::{Credentials, ServerSettings};
use crate::error::Result;

/// Server, organization and credentials, each backed by its CI variable
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// CodeThreat server URL
    #[arg(long, env = "CT_SERVER")]
    pub server: Option<String>,

    /// Organization name sent with every request
    #[arg(long, env = "ORGNAME")]
    pub org: Option<String>,

    /// Access token (used when no username/password pair is given)
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Username for the sign-in exchange
    #[arg(long, env = "USERNAME")]
    pub username: Option<String>,

    /// Password for the sign-in exchange
    #[arg(long, env = "PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl ConnectionArgs {
    /// Validate into server settings
    pub fn to_settings(&self) -> Result<ServerSettings> {
        ServerSettings::new(
            self.server.clone(),
            self.org.clone(),
            Credentials::new(
                self.token.clone(),
                self.username.clone(),
                self.password.clone(),
            ),
        )
    }
}
