//! Project models

use serde::{Deserialize, Serialize};

/// The only project kind this tool may scan under
pub const GITHUB_PROJECT_KIND: &str = "github";

/// Existing project record returned by the lookup endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// Integration kind (`github`, `gitlab`, ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Project key (repository name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Repository identity used to look up or register a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectKey {
    /// Repository name
    pub repo: String,

    /// Numeric repository/owner id from the hosting platform
    pub repo_id: String,
}

impl ProjectKey {
    pub fn new(repo: impl Into<String>, repo_id: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            repo_id: repo_id.into(),
        }
    }

    /// Composite `repo:id` key expected by the registration endpoint
    pub fn composite(&self) -> String {
        format!("{}:{}", self.repo, self.repo_id)
    }
}

/// Body of the project registration call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub repo_id: String,
    pub project: String,
    pub branch: String,
    pub account: String,
    pub action: bool,
    #[serde(rename = "type")]
    pub visibility: String,
    pub githubtoken: String,
    #[serde(rename = "policy_id")]
    pub policy_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_key() {
        let key = ProjectKey::new("demo", "4242");
        assert_eq!(key.composite(), "demo:4242");
    }

    #[test]
    fn test_project_kind_from_type_field() {
        let project: Project = serde_json::from_str(r#"{"type":"github","key":"demo"}"#).unwrap();
        assert_eq!(project.kind.as_deref(), Some("github"));
        assert_eq!(project.key.as_deref(), Some("demo"));
    }

    #[test]
    fn test_create_request_wire_names() {
        let request = CreateProjectRequest {
            repo_id: "demo:1".to_string(),
            project: "demo".to_string(),
            branch: "main".to_string(),
            account: "acme".to_string(),
            action: true,
            visibility: "private".to_string(),
            githubtoken: "gh".to_string(),
            policy_name: "Advanced Security".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["repoId"], "demo:1");
        assert_eq!(json["type"], "private");
        assert_eq!(json["policy_id"], "Advanced Security");
    }
}
