//! GitHub REST publisher
//!
//! Pull request runs get a review comment (or a merge when the scan is clean
//! and automerge is on). Push runs get a commit comment.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::Serialize;

use super::{Publication, PublishAction, ReportPublisher};
use crate::client::codethreat::classify_failure;
use crate::config::GitHubContext;
use crate::error::{ApiError, Result};

#[derive(Debug, Serialize)]
struct ReviewRequest<'a> {
    event: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct MergeRequest<'a> {
    commit_title: &'a str,
}

/// Publishes reports through the GitHub REST API
pub struct GitHubPublisher {
    http: HttpClient,
    api_url: String,
    token: String,
    owner: String,
    repo: String,
    pr_number: Option<u64>,
    commit_sha: String,
}

impl GitHubPublisher {
    pub fn new(token: &str, ctx: &GitHubContext) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("ctscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_url: ctx.api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            owner: ctx.owner.clone(),
            repo: ctx.repo.clone(),
            pr_number: ctx.pr_number,
            commit_sha: ctx.commit_id.clone(),
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_url, self.owner, self.repo, path)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &body, None).into())
    }

    async fn review(&self, number: u64, body: &str) -> Result<()> {
        let url = self.repo_url(&format!("/pulls/{}/reviews", number));
        debug!("POST {}", url);
        self.send(self.http.post(url).json(&ReviewRequest {
            event: "COMMENT",
            body,
        }))
        .await
    }

    async fn merge(&self, number: u64, scan_id: &str) -> Result<()> {
        let url = self.repo_url(&format!("/pulls/{}/merge", number));
        debug!("PUT {}", url);
        let title = format!("Merge #{} (CodeThreat scan {} clean)", number, scan_id);
        self.send(self.http.put(url).json(&MergeRequest {
            commit_title: &title,
        }))
        .await
    }

    async fn commit_comment(&self, body: &str) -> Result<()> {
        if self.commit_sha.is_empty() {
            return Err(ApiError::BadRequest(
                "no commit sha available for a commit comment".to_string(),
            )
            .into());
        }
        let url = self.repo_url(&format!("/commits/{}/comments", self.commit_sha));
        debug!("POST {}", url);
        self.send(self.http.post(url).json(&CommentRequest { body }))
            .await
    }
}

#[async_trait]
impl ReportPublisher for GitHubPublisher {
    async fn publish(&self, publication: &Publication<'_>, action: PublishAction) -> Result<()> {
        let body = publication.render_body();
        match (self.pr_number, action) {
            (Some(number), PublishAction::Merge) => self.merge(number, publication.scan_id).await,
            (Some(number), PublishAction::Comment) => self.review(number, &body).await,
            // Nothing to merge on a push; fall back to a commit comment
            (None, _) => self.commit_comment(&body).await,
        }
    }
}
