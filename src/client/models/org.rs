//! Organization models

use serde::{Deserialize, Serialize};

/// Organization membership lookup result
///
/// Only the version header matters to the pipeline; the body is kept for
/// debug logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrgMembership {
    /// Organization name as reported by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Negotiated API version from the `x-ct-api-version` header
    #[serde(skip)]
    pub api_version: Option<String>,
}
