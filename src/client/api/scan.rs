//! Scan API trait

use async_trait::async_trait;

use crate::client::models::{Report, ScanStatus, StartScanRequest, StartScanResponse};
use crate::error::Result;

/// Scan lifecycle operations for the CodeThreat API
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// Start a scan for a branch and commit
    async fn start_scan(&self, request: &StartScanRequest) -> Result<StartScanResponse>;

    /// Fetch the current status snapshot of a scan
    async fn scan_status(&self, scan_id: &str) -> Result<ScanStatus>;

    /// Fetch the report for a finished scan.
    ///
    /// `None` when the backend produced no report (404 or a null type).
    async fn scan_report(
        &self,
        scan_id: &str,
        branch: &str,
        project: &str,
    ) -> Result<Option<Report>>;

    /// Export the scan results as a SARIF document
    async fn export_sarif(
        &self,
        scan_id: &str,
        branch: &str,
        project: &str,
    ) -> Result<serde_json::Value>;
}
