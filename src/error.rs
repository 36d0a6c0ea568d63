//! Error types for ctscan

use std::time::Duration;
use thiserror::Error;

/// Result type alias for ctscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The findings policy tripped, either mid-scan or at completion
    #[error("!! FAILED_ARGS : {}", .reasons.join("; "))]
    PolicyViolation { reasons: Vec<String> },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Unauthorized. Check ACCESS_TOKEN or USERNAME/PASSWORD.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors, raised before any network call
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Please enter username and password or token.")]
    MissingCredentials,

    #[error("Server not configured. Set CT_SERVER or pass --server.")]
    MissingServer,

    #[error("Organization not configured. Set ORGNAME or pass --org.")]
    MissingOrg,

    #[error("Failed to parse FAILED_ARGS: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("GitHub context unavailable: {0}")]
    MissingGitHubContext(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Scan lifecycle errors that are not policy decisions
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan Failed. The backend reported state 'failure' for scan {0}.")]
    Failed(String),

    #[error("Scan could not be started: response did not contain a scan id")]
    MissingScanId,

    #[error("There is a project with this name, but its type is {0}, not github.")]
    ProjectKindMismatch(String),

    #[error("Scan {scan_id} did not finish within {polls} status checks")]
    TimedOut { scan_id: String, polls: u32 },
}
