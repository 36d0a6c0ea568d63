//! The scan pipeline
//!
//! Login, project registration, then the scan itself. Every stage takes the
//! API through a trait so the whole flow runs against the mock client in
//! tests.

pub mod auth;
pub mod gate;
pub mod orchestrator;
pub mod project;
pub mod version;

use log::debug;

use crate::client::CodeThreatApi;
use crate::client::models::{ProjectKey, ScanStatus};
use crate::config::{GitHubContext, PolicyConfig, ScanSettings, ServerSettings};
use crate::error::Result;
use crate::publish::ReportPublisher;

pub use auth::{Session, authenticate};
pub use orchestrator::{ScanOrchestrator, ScanOutcome};
pub use project::{ProjectSpec, ProjectStatus, ensure_project};
pub use version::select_check_strategy;

/// Inputs to a full pipeline run
pub struct PipelineInputs<'a> {
    pub server: &'a ServerSettings,
    pub github: &'a GitHubContext,
    pub scan: &'a ScanSettings,
    pub policy: &'a PolicyConfig,
}

/// Authenticate, ensure the project, then run the scan to a terminal state
pub async fn run_pipeline<A, P, F>(
    api: &A,
    publisher: &P,
    inputs: &PipelineInputs<'_>,
    on_status: F,
) -> Result<ScanOutcome>
where
    A: CodeThreatApi + ?Sized,
    P: ReportPublisher + ?Sized,
    F: FnMut(&ScanStatus) + Send,
{
    let session = authenticate(api, inputs.server).await?;
    let check = select_check_strategy(session.api_version.as_deref());

    let ctx = inputs.github;
    let github_token = inputs.scan.github_token.as_deref().unwrap_or_default();
    let key = ProjectKey::new(ctx.repo.clone(), ctx.repo_id.clone());
    let status = ensure_project(
        api,
        check,
        &ProjectSpec {
            key: &key,
            branch: &ctx.branch,
            owner: &ctx.owner,
            visibility: ctx.visibility,
            github_token,
            policy_name: &inputs.policy.policy_name,
        },
    )
    .await?;
    debug!("Project {}: {:?}", key.repo, status);

    ScanOrchestrator::new(
        api,
        publisher,
        inputs.policy,
        inputs.scan.poll,
        &inputs.scan.sarif_path,
    )
    .run(ctx, github_token, on_status)
    .await
}
