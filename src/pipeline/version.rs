//! API version negotiation
//!
//! Backends older than 1.7.8 answer a lookup for a missing project with an
//! error, newer ones with an empty 200 body. The check strategy is chosen
//! once per run from the version header seen at login.

use std::cmp::Ordering;

use log::debug;

use crate::client::ProjectApi;
use crate::client::models::Project;
use crate::error::{ApiError, Error, Result};

/// First backend version that reports missing projects with an empty body
pub const THRESHOLD: &str = "1.7.8";

/// Result of comparing two versions; equality resolves to `Newer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOrdering {
    Newer,
    Older,
}

fn parse(version: &str) -> [u64; 3] {
    let mut parts = [0u64; 3];
    for (slot, piece) in parts.iter_mut().zip(version.trim().split('.')) {
        *slot = piece
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect::<String>()
            .parse()
            .unwrap_or(0);
    }
    parts
}

/// Compare `left` against `right`.
///
/// Missing components count as 0. An absent `right` always yields `Newer`.
pub fn compare_versions(left: &str, right: Option<&str>) -> VersionOrdering {
    let Some(right) = right else {
        return VersionOrdering::Newer;
    };
    match parse(left).cmp(&parse(right)) {
        Ordering::Less => VersionOrdering::Older,
        Ordering::Equal | Ordering::Greater => VersionOrdering::Newer,
    }
}

/// Wire-compatible variant of the "does this project exist" check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectCheck {
    /// Pre-1.7.8: 404/400 means not found
    Legacy,
    /// 1.7.8 and later: an empty body means not found
    Current,
}

/// Pick the project check for the negotiated API version.
///
/// No version header routes to `Current`.
pub fn select_check_strategy(api_version: Option<&str>) -> ProjectCheck {
    let strategy = match api_version {
        Some(version) if compare_versions(version, Some(THRESHOLD)) == VersionOrdering::Older => {
            ProjectCheck::Legacy
        }
        _ => ProjectCheck::Current,
    };
    debug!(
        "API version {:?} -> {:?} project check",
        api_version, strategy
    );
    strategy
}

impl ProjectCheck {
    /// Look up a project; `Ok(None)` when the backend says it does not exist
    pub async fn check<A: ProjectApi + ?Sized>(&self, api: &A, key: &str) -> Result<Option<Project>> {
        match self {
            ProjectCheck::Legacy => match api.lookup_project(key).await {
                Ok(body) => Ok(Some(decode_project(body)?)),
                Err(Error::Api(ApiError::NotFound(_) | ApiError::BadRequest(_))) => Ok(None),
                Err(e) => Err(e),
            },
            ProjectCheck::Current => {
                let body = api.lookup_project(key).await?;
                if is_empty_body(&body) {
                    return Ok(None);
                }
                Ok(Some(decode_project(body)?))
            }
        }
    }
}

fn is_empty_body(body: &serde_json::Value) -> bool {
    match body {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn decode_project(body: serde_json::Value) -> Result<Project> {
    match body {
        // Legacy backends may answer 200 with no body; it decodes as a kindless record
        serde_json::Value::Null => Ok(Project::default()),
        body => serde_json::from_value(body).map_err(|e| {
            ApiError::InvalidResponse(format!("unexpected project lookup body: {}", e)).into()
        }),
    }
}
