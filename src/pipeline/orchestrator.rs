//! Scan lifecycle: start, poll, finalize
//!
//! ```text
//! Starting ──start──▶ Polling ──end──▶ finalize ──▶ Completed / NoReport
//!                        │  ▲                 └──▶ PolicyViolation (after publish)
//!                        │  └─ sleep ─┘
//!                        ├─ in-flight gate tripped ──▶ PolicyViolation
//!                        ├─ state "failure" ────────▶ ScanError::Failed
//!                        └─ max_polls reached ──────▶ ScanError::TimedOut
//! ```

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::client::ScanApi;
use crate::client::models::{ScanState, ScanStatus, StartScanRequest};
use crate::config::{GitHubContext, PollSettings, PolicyConfig};
use crate::error::{Error, Result, ScanError};
use crate::publish::{Publication, PublishAction, ReportPublisher, sarif};

use super::gate::{self, Verdict};

/// How a scan run ended, when it did not end in an error
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// `sync_scan` is off: returned after the first status check
    Detached { scan_id: String, status: ScanStatus },
    /// The backend produced no report; nothing was gated or published
    NoReport { scan_id: String, status: ScanStatus },
    /// Report published and SARIF saved; the completion gate passed
    Completed {
        scan_id: String,
        status: ScanStatus,
        verdict: Verdict,
        action: PublishAction,
    },
}

impl ScanOutcome {
    pub fn scan_id(&self) -> &str {
        match self {
            ScanOutcome::Detached { scan_id, .. }
            | ScanOutcome::NoReport { scan_id, .. }
            | ScanOutcome::Completed { scan_id, .. } => scan_id,
        }
    }

    pub fn status(&self) -> &ScanStatus {
        match self {
            ScanOutcome::Detached { status, .. }
            | ScanOutcome::NoReport { status, .. }
            | ScanOutcome::Completed { status, .. } => status,
        }
    }
}

/// Decide how to publish: merge only a clean, passing scan with automerge on
pub fn publish_action(policy: &PolicyConfig, status: &ScanStatus, verdict: &Verdict) -> PublishAction {
    let clean = status.severities.total() == 0 && status.weaknesses.is_empty();
    if policy.automerge && clean && !verdict.violated {
        PublishAction::Merge
    } else {
        PublishAction::Comment
    }
}

/// Drives one scan from start to a terminal state
pub struct ScanOrchestrator<'a, A: ?Sized, P: ?Sized> {
    api: &'a A,
    publisher: &'a P,
    policy: &'a PolicyConfig,
    poll: PollSettings,
    sarif_path: PathBuf,
}

impl<'a, A, P> ScanOrchestrator<'a, A, P>
where
    A: ScanApi + ?Sized,
    P: ReportPublisher + ?Sized,
{
    pub fn new(
        api: &'a A,
        publisher: &'a P,
        policy: &'a PolicyConfig,
        poll: PollSettings,
        sarif_path: impl AsRef<Path>,
    ) -> Self {
        Self {
            api,
            publisher,
            policy,
            poll,
            sarif_path: sarif_path.as_ref().to_path_buf(),
        }
    }

    /// Start a scan and return its id
    pub async fn start(&self, ctx: &GitHubContext, github_token: &str) -> Result<String> {
        let request = StartScanRequest {
            project: ctx.repo.clone(),
            branch: ctx.branch.clone(),
            account: ctx.owner.clone(),
            id: ctx.repo_id.clone(),
            action: true,
            commit_id: ctx.commit_id.clone(),
            committer: ctx.committer.clone(),
            commit_message: ctx.commit_message.clone(),
            visibility: ctx.visibility.as_str().to_string(),
            githubtoken: github_token.to_string(),
            policy_name: self.policy.policy_name.clone(),
        };
        let response = self.api.start_scan(&request).await?;
        let scan_id = response
            .scan_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ScanError::MissingScanId)?;
        info!("Scan started: {}", scan_id);
        Ok(scan_id)
    }

    /// One status fetch; a backend-reported failure is an error
    pub async fn poll(&self, scan_id: &str) -> Result<ScanStatus> {
        let status = self.api.scan_status(scan_id).await?;
        if status.state == ScanState::Failure {
            return Err(ScanError::Failed(scan_id.to_string()).into());
        }
        Ok(status)
    }

    /// Poll until the scan ends, checking the in-flight gate on every
    /// snapshot. Returns the last snapshot seen.
    pub async fn await_completion<F>(&self, scan_id: &str, mut on_status: F) -> Result<ScanStatus>
    where
        F: FnMut(&ScanStatus) + Send,
    {
        tokio::time::sleep(self.poll.initial_delay).await;

        let mut polls: u32 = 0;
        loop {
            let status = self.poll(scan_id).await?;
            polls += 1;
            debug!(
                "Poll {} for {}: state={} progress={}%",
                polls,
                scan_id,
                status.state,
                status.progress()
            );
            on_status(&status);

            if status.state == ScanState::End || !self.policy.sync_scan {
                return Ok(status);
            }

            let verdict = gate::evaluate(&status.severities, &status.weaknesses, None, self.policy);
            if verdict.violated {
                return Err(Error::PolicyViolation {
                    reasons: verdict.reasons,
                });
            }

            if self.poll.max_polls.is_some_and(|max| polls >= max) {
                return Err(ScanError::TimedOut {
                    scan_id: scan_id.to_string(),
                    polls,
                }
                .into());
            }

            tokio::time::sleep(self.poll.interval).await;
        }
    }

    /// Fetch the report of an ended scan, gate it, publish, save SARIF
    pub async fn finalize(
        &self,
        scan_id: &str,
        status: ScanStatus,
        ctx: &GitHubContext,
    ) -> Result<ScanOutcome> {
        let Some(report) = self.api.scan_report(scan_id, &ctx.branch, &ctx.repo).await? else {
            info!("No report available for scan {}", scan_id);
            return Ok(ScanOutcome::NoReport {
                scan_id: scan_id.to_string(),
                status,
            });
        };

        let verdict = gate::evaluate(
            &status.severities,
            &status.weaknesses,
            report.sca.as_ref(),
            self.policy,
        );
        let action = publish_action(self.policy, &status, &verdict);
        debug!("Completion verdict: {:?}, action: {}", verdict, action);

        let publication = Publication {
            scan_id,
            report: &report,
            status: &status,
            verdict: &verdict,
        };
        self.publisher.publish(&publication, action).await?;

        let document = self.api.export_sarif(scan_id, &ctx.branch, &ctx.repo).await?;
        sarif::write_sarif(&self.sarif_path, &document)?;

        if verdict.violated {
            return Err(Error::PolicyViolation {
                reasons: verdict.reasons,
            });
        }

        Ok(ScanOutcome::Completed {
            scan_id: scan_id.to_string(),
            status,
            verdict,
            action,
        })
    }

    /// Start, poll and finalize a scan
    pub async fn run<F>(&self, ctx: &GitHubContext, github_token: &str, on_status: F) -> Result<ScanOutcome>
    where
        F: FnMut(&ScanStatus) + Send,
    {
        let scan_id = self.start(ctx, github_token).await?;
        let status = self.await_completion(&scan_id, on_status).await?;

        // Fire-and-forget stops after the first fetch, even on an ended scan
        if !self.policy.sync_scan || status.state != ScanState::End {
            return Ok(ScanOutcome::Detached { scan_id, status });
        }
        self.finalize(&scan_id, status, ctx).await
    }
}
