//! Recording publisher for testing

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Publication, PublishAction, ReportPublisher};
use crate::error::{ApiError, Result};

/// A publish call captured for assertions
#[derive(Debug, Clone)]
pub struct PublishedReport {
    pub scan_id: String,
    pub body: String,
    pub action: PublishAction,
}

/// Publisher that records every call instead of delivering it
#[derive(Default, Clone)]
pub struct RecordingPublisher {
    published: Arc<Mutex<Vec<PublishedReport>>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn published(&self) -> Vec<PublishedReport> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl ReportPublisher for RecordingPublisher {
    async fn publish(&self, publication: &Publication<'_>, action: PublishAction) -> Result<()> {
        if self.fail {
            return Err(ApiError::Forbidden.into());
        }
        self.published.lock().await.push(PublishedReport {
            scan_id: publication.scan_id.to_string(),
            body: publication.render_body(),
            action,
        });
        Ok(())
    }
}
