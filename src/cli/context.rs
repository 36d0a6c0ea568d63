//! Command execution context
//!
//! Builds the API client from connection flags and logs in, so commands
//! start from an authenticated client.

use std::sync::Arc;

use log::debug;

use crate::cli::{ConnectionArgs, OutputFormat};
use crate::client::CodeThreatClient;
use crate::error::Result;
use crate::pipeline::authenticate;

/// Authenticated client and the output format
pub struct CommandContext {
    pub client: Arc<CodeThreatClient>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Validate the connection flags, create the client and log in.
    ///
    /// Configuration problems surface before any network call.
    pub async fn new(format: OutputFormat, connection: &ConnectionArgs) -> Result<Self> {
        let settings = connection.to_settings()?;
        let client = Arc::new(CodeThreatClient::new(&settings.server)?);

        let session = authenticate(client.as_ref(), &settings).await?;
        debug!(
            "Authenticated to {} (API version {:?})",
            settings.org, session.api_version
        );

        Ok(Self {
            client,
            format,
        })
    }
}
