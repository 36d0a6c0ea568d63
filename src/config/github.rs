//! GitHub Actions run context
//!
//! Repository identity, branch and commit metadata come from the runner
//! environment and the webhook payload at `GITHUB_EVENT_PATH`.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default REST endpoint when `GITHUB_API_URL` is unset
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Repository visibility as sent to the scanning backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the pipeline needs to know about the triggering repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubContext {
    pub owner: String,
    pub repo: String,
    /// Owner id for pull requests, repository id for pushes
    pub repo_id: String,
    pub branch: String,
    pub visibility: Visibility,
    pub commit_id: String,
    pub committer: String,
    pub commit_message: String,
    /// Set only for `pull_request` events
    pub pr_number: Option<u64>,
    pub api_url: String,
    pub event_name: String,
}

// ============================================================================
// Event payload (only the fields we read)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    #[serde(default)]
    repository: Option<RepositoryPayload>,
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
    #[serde(default)]
    head_commit: Option<CommitPayload>,
    #[serde(default)]
    after: Option<String>,
    #[serde(default)]
    sender: Option<AccountPayload>,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    #[serde(default)]
    title: Option<String>,
    head: PullRequestHead,
}

#[derive(Debug, Deserialize)]
struct PullRequestHead {
    #[serde(rename = "ref")]
    branch: String,
    #[serde(default)]
    sha: Option<String>,
    #[serde(default)]
    repo: Option<HeadRepoPayload>,
}

#[derive(Debug, Deserialize)]
struct HeadRepoPayload {
    owner: AccountPayload,
}

#[derive(Debug, Deserialize)]
struct AccountPayload {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitPayload {
    #[serde(default)]
    message: Option<String>,
}

impl GitHubContext {
    /// Read the context from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the context through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let repository = var("GITHUB_REPOSITORY").ok_or_else(|| {
            ConfigError::MissingGitHubContext("GITHUB_REPOSITORY is not set".to_string())
        })?;
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(o, r)| !o.is_empty() && !r.is_empty())
            .ok_or_else(|| {
                ConfigError::MissingGitHubContext(format!(
                    "GITHUB_REPOSITORY must be owner/repo, got '{}'",
                    repository
                ))
            })?;

        let payload = match var("GITHUB_EVENT_PATH") {
            Some(path) => read_payload(Path::new(&path))?,
            None => EventPayload::default(),
        };
        let event_name = var("GITHUB_EVENT_NAME").unwrap_or_else(|| "push".to_string());

        let visibility = match payload.repository.as_ref() {
            Some(r) if r.private => Visibility::Private,
            _ => Visibility::Public,
        };
        let committer = var("GITHUB_ACTOR")
            .or_else(|| payload.sender.as_ref().and_then(|s| s.login.clone()))
            .unwrap_or_default();

        let (branch, repo_id, commit_id, commit_message, pr_number) =
            match (event_name.as_str(), payload.pull_request.as_ref()) {
                ("pull_request" | "pull_request_target", Some(pr)) => (
                    pr.head.branch.clone(),
                    pr.head
                        .repo
                        .as_ref()
                        .and_then(|r| r.owner.id)
                        .map(|id| id.to_string()),
                    pr.head.sha.clone().or_else(|| var("GITHUB_SHA")),
                    pr.title.clone(),
                    Some(pr.number),
                ),
                _ => {
                    let branch = var("GITHUB_REF_NAME")
                        .or_else(|| {
                            var("GITHUB_REF")
                                .and_then(|r| r.strip_prefix("refs/heads/").map(str::to_string))
                        })
                        .or_else(|| {
                            payload
                                .repository
                                .as_ref()
                                .and_then(|r| r.default_branch.clone())
                        })
                        .ok_or_else(|| {
                            ConfigError::MissingGitHubContext(
                                "cannot determine the branch (set GITHUB_REF_NAME)".to_string(),
                            )
                        })?;
                    (
                        branch,
                        payload
                            .repository
                            .as_ref()
                            .and_then(|r| r.id)
                            .map(|id| id.to_string()),
                        payload.after.clone().or_else(|| var("GITHUB_SHA")),
                        payload.head_commit.as_ref().and_then(|c| c.message.clone()),
                        None,
                    )
                }
            };

        let repo_id = repo_id.or_else(|| var("GITHUB_REPOSITORY_ID")).ok_or_else(|| {
            ConfigError::MissingGitHubContext("repository id not found in event payload".to_string())
        })?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            repo_id,
            branch,
            visibility,
            commit_id: commit_id.unwrap_or_default(),
            committer,
            commit_message: commit_message.unwrap_or_default(),
            pr_number,
            api_url: var("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            event_name,
        })
    }
}

fn read_payload(path: &Path) -> Result<EventPayload, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::MissingGitHubContext(format!(
            "cannot read event payload {}: {}",
            path.display(),
            e
        ))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ConfigError::MissingGitHubContext(format!("invalid event payload: {}", e))
    })
}
