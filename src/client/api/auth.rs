//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{AccessToken, OrgMembership};
use crate::error::Result;

/// Authentication operations for the CodeThreat API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange a username/password pair for an access token
    async fn sign_in(&self, username: &str, password: &str) -> Result<AccessToken>;

    /// Install the token and organization sent with every later request
    async fn authorize(&self, token: &str, org: &str);

    /// Look up the organization using the installed token.
    ///
    /// Confirms membership and reports the backend's API version header.
    async fn get_org(&self, org: &str) -> Result<OrgMembership>;
}
