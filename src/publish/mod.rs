//! Delivery of the finished scan report
//!
//! The orchestrator hands a [`Publication`] to a [`ReportPublisher`] along
//! with the action it decided on. GitHub is the real target; the console
//! publisher covers local runs without a GitHub token.

use async_trait::async_trait;

use crate::client::models::{Report, ScanStatus};
use crate::error::Result;
use crate::output::formatters::{format_risk_score, scan_duration};
use crate::pipeline::gate::Verdict;

pub mod console;
pub mod github;
#[cfg(test)]
pub mod mock;
pub mod sarif;

pub use console::ConsolePublisher;
pub use github::GitHubPublisher;

/// What the publisher should do with the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    /// Post the report as a review or commit comment
    Comment,
    /// Merge the pull request (clean scan with automerge enabled)
    Merge,
}

impl std::fmt::Display for PublishAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishAction::Comment => write!(f, "comment"),
            PublishAction::Merge => write!(f, "merge"),
        }
    }
}

/// Final scan artifact handed to a publisher
#[derive(Debug, Clone, Copy)]
pub struct Publication<'a> {
    pub scan_id: &'a str,
    pub report: &'a Report,
    pub status: &'a ScanStatus,
    pub verdict: &'a Verdict,
}

impl Publication<'_> {
    /// Markdown body: backend summary, severity table, then the verdict
    pub fn render_body(&self) -> String {
        let sev = &self.status.severities;
        let mut body = String::new();

        if !self.report.summary.trim().is_empty() {
            body.push_str(self.report.summary.trim_end());
            body.push_str("\n\n");
        }

        body.push_str("### CodeThreat scan summary\n\n");
        body.push_str("| Critical | High | Medium | Low |\n");
        body.push_str("|---|---|---|---|\n");
        body.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            sev.critical, sev.high, sev.medium, sev.low
        ));

        if let Some(sca) = &self.report.sca {
            body.push_str(&format!(
                "\nSCA: {} critical, {} high, {} medium, {} low\n",
                sca.critical, sca.high, sca.medium, sca.low
            ));
        }

        body.push_str(&format!("\nScan ID: `{}`", self.scan_id));
        if let Some(duration) =
            scan_duration(self.status.started_at.as_deref(), self.status.ended_at.as_deref())
        {
            body.push_str(&format!(" | Duration: {}", duration));
        }
        if let Some(score) = &self.status.riskscore {
            body.push_str(&format!(" | Risk score: {}", format_risk_score(score)));
        }
        body.push('\n');

        if self.verdict.violated {
            body.push_str("\n**Result: FAILED_ARGS conditions were met**\n");
            for reason in &self.verdict.reasons {
                body.push_str(&format!("- {}\n", reason));
            }
        } else {
            body.push_str("\n**Result: passed**\n");
        }

        body
    }
}

/// Destination for finished scan reports
#[async_trait]
pub trait ReportPublisher: Send + Sync {
    async fn publish(&self, publication: &Publication<'_>, action: PublishAction) -> Result<()>;
}
