//! Project API trait

use async_trait::async_trait;

use crate::client::models::CreateProjectRequest;
use crate::error::Result;

/// Project operations for the CodeThreat API
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Look up a project by repository key.
    ///
    /// Returns the raw body: its interpretation (empty body, error codes)
    /// differs between backend versions and is left to the caller.
    async fn lookup_project(&self, key: &str) -> Result<serde_json::Value>;

    /// Register a new project bound to a repository and branch
    async fn create_project(&self, request: &CreateProjectRequest) -> Result<()>;
}
