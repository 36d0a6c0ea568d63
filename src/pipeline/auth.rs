//! Credential resolution and organization login

use log::debug;

use crate::client::AuthApi;
use crate::config::ServerSettings;
use crate::error::{ConfigError, Result};

/// An authenticated session against one organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub org: String,
    /// Version from the `x-ct-api-version` header, if the backend sent one
    pub api_version: Option<String>,
}

/// Resolve a usable token and validate organization membership.
///
/// A complete username/password pair is exchanged for a token; otherwise a
/// static token is used as-is. Either way the organization is looked up with
/// the resulting token, which also reports the API version.
pub async fn authenticate<A: AuthApi + ?Sized>(api: &A, settings: &ServerSettings) -> Result<Session> {
    let creds = &settings.credentials;

    let (token, signin_version) = match (&creds.username, &creds.password, &creds.token) {
        (Some(username), Some(password), _) => {
            debug!("Signing in as {}", username);
            let access = api.sign_in(username, password).await?;
            (access.token, access.api_version)
        }
        (_, _, Some(token)) => {
            debug!("Using static access token");
            (token.clone(), None)
        }
        _ => return Err(ConfigError::MissingCredentials.into()),
    };

    api.authorize(&token, &settings.org).await;
    let membership = api.get_org(&settings.org).await?;
    debug!("Organization lookup returned {:?}", membership.name);

    Ok(Session {
        token,
        org: settings.org.clone(),
        api_version: membership.api_version.or(signin_version),
    })
}
