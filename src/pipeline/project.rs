//! Project registration

use log::debug;

use crate::client::ProjectApi;
use crate::client::models::{CreateProjectRequest, GITHUB_PROJECT_KIND, ProjectKey};
use crate::config::Visibility;
use crate::error::{Result, ScanError};

use super::version::ProjectCheck;

/// Outcome of [`ensure_project`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Existing,
    Created,
}

/// Repository details needed to register a project
#[derive(Debug, Clone)]
pub struct ProjectSpec<'a> {
    pub key: &'a ProjectKey,
    pub branch: &'a str,
    pub owner: &'a str,
    pub visibility: Visibility,
    pub github_token: &'a str,
    pub policy_name: &'a str,
}

/// Make sure a github project exists for the repository.
///
/// An existing project of any other kind is an error, never a reason to
/// create a second one.
pub async fn ensure_project<A: ProjectApi + ?Sized>(
    api: &A,
    check: ProjectCheck,
    spec: &ProjectSpec<'_>,
) -> Result<ProjectStatus> {
    if let Some(project) = check.check(api, &spec.key.repo).await? {
        return match project.kind.as_deref() {
            Some(GITHUB_PROJECT_KIND) => {
                debug!("Project {} already registered", spec.key.repo);
                Ok(ProjectStatus::Existing)
            }
            other => Err(ScanError::ProjectKindMismatch(other.unwrap_or("unknown").to_string()).into()),
        };
    }

    let request = CreateProjectRequest {
        repo_id: spec.key.composite(),
        project: spec.key.repo.clone(),
        branch: spec.branch.to_string(),
        account: spec.owner.to_string(),
        action: true,
        visibility: spec.visibility.as_str().to_string(),
        githubtoken: spec.github_token.to_string(),
        policy_name: spec.policy_name.to_string(),
    };
    api.create_project(&request).await?;
    Ok(ProjectStatus::Created)
}
