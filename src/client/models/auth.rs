//! Authentication models

use serde::{Deserialize, Serialize};

/// Sign-in request body for the username/password exchange
#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Sign-in response carrying the issued access token
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Access token returned by a sign-in, plus the API version header if sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Token value sent verbatim in the `Authorization` header
    pub token: String,

    /// Value of the `x-ct-api-version` response header
    pub api_version: Option<String>,
}
