//! Mock CodeThreat API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{AuthApi, ProjectApi, ScanApi};
use super::models::{
    AccessToken, CreateProjectRequest, OrgMembership, Report, ScanStatus, StartScanRequest,
    StartScanResponse,
};
use crate::error::{ApiError, Result};

/// How the mock answers a lookup for a project it does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingProject {
    /// 200 with an empty body
    EmptyBody,
    /// 404 error
    NotFound,
    /// 400 error
    BadRequest,
}

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockCodeThreatClient::new()
///     .with_statuses(vec![ScanStatusBuilder::running().build()])
///     .await;
///
/// let status = mock.scan_status("sid").await?;
/// ```
pub struct MockCodeThreatClient {
    /// Token to return from sign_in
    sign_in_token: Arc<Mutex<Option<String>>>,
    /// API version header reported by sign_in and get_org
    api_version: Arc<Mutex<Option<String>>>,
    /// Token installed via authorize
    token: Arc<Mutex<Option<String>>>,
    /// Known projects keyed by repository name (raw lookup bodies)
    projects: Arc<Mutex<HashMap<String, serde_json::Value>>>,
    /// Lookup behaviour for unknown projects
    missing_project: Arc<Mutex<MissingProject>>,
    /// Response to return from start_scan
    start_response: Arc<Mutex<StartScanResponse>>,
    /// Scripted status responses; the last one repeats
    statuses: Arc<Mutex<VecDeque<ScanStatus>>>,
    /// Report to return from scan_report (None = "no report")
    report: Arc<Mutex<Option<Report>>>,
    /// SARIF document to return from export_sarif
    sarif: Arc<Mutex<serde_json::Value>>,
    /// Errors keyed by operation name, each consumed on first use
    failures: Arc<Mutex<HashMap<&'static str, ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockCodeThreatClient {
    fn default() -> Self {
        Self {
            sign_in_token: Arc::new(Mutex::new(None)),
            api_version: Arc::new(Mutex::new(None)),
            token: Arc::new(Mutex::new(None)),
            projects: Arc::new(Mutex::new(HashMap::new())),
            missing_project: Arc::new(Mutex::new(MissingProject::EmptyBody)),
            start_response: Arc::new(Mutex::new(StartScanResponse {
                scan_id: Some("mock-scan-id".to_string()),
            })),
            statuses: Arc::new(Mutex::new(VecDeque::new())),
            report: Arc::new(Mutex::new(Some(Report {
                summary: "Mock Report".to_string(),
                sca: None,
            }))),
            sarif: Arc::new(Mutex::new(serde_json::json!({
                "version": "2.1.0",
                "runs": []
            }))),
            failures: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub sign_in: usize,
    pub get_org: usize,
    pub lookup_project: usize,
    pub create_project: usize,
    pub start_scan: usize,
    pub scan_status: usize,
    pub scan_report: usize,
    pub export_sarif: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.sign_in
            + self.get_org
            + self.lookup_project
            + self.create_project
            + self.start_scan
            + self.scan_status
            + self.scan_report
            + self.export_sarif
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "get_org", "start_scan")
    pub method: String,
    /// Token installed at the time of the call
    pub token: Option<String>,
    /// Primary argument (org name, project key, scan id, ...)
    pub subject: String,
}

impl MockCodeThreatClient {
    /// Create a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the token returned by sign_in.
    pub async fn with_sign_in_token(self, token: &str) -> Self {
        *self.sign_in_token.lock().await = Some(token.to_string());
        self
    }

    /// Configure the API version header reported at login.
    pub async fn with_api_version(self, version: &str) -> Self {
        *self.api_version.lock().await = Some(version.to_string());
        self
    }

    /// Register an existing project with the given kind.
    pub async fn with_project(self, key: &str, kind: &str) -> Self {
        self.projects.lock().await.insert(
            key.to_string(),
            serde_json::json!({ "type": kind, "key": key }),
        );
        self
    }

    /// Configure how lookups of unknown projects respond.
    pub async fn with_missing_project(self, behaviour: MissingProject) -> Self {
        *self.missing_project.lock().await = behaviour;
        self
    }

    /// Configure the start_scan response.
    pub async fn with_start_response(self, response: StartScanResponse) -> Self {
        *self.start_response.lock().await = response;
        self
    }

    /// Script the sequence of status snapshots returned by scan_status.
    pub async fn with_statuses(self, statuses: Vec<ScanStatus>) -> Self {
        *self.statuses.lock().await = statuses.into();
        self
    }

    /// Configure the report returned by scan_report (None = no report).
    pub async fn with_report(self, report: Option<Report>) -> Self {
        *self.report.lock().await = report;
        self
    }

    /// Configure an error for the next call of the named operation.
    pub async fn with_failure(self, operation: &'static str, error: ApiError) -> Self {
        self.failures.lock().await.insert(operation, error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Record the call and return any configured failure for it.
    async fn record(&self, method: &'static str, subject: &str) -> Result<()> {
        let token = self.token.lock().await.clone();
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            token,
            subject: subject.to_string(),
        });

        if let Some(e) = self.failures.lock().await.remove(method) {
            return Err(e.into());
        }
        Ok(())
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockCodeThreatClient {
    async fn sign_in(&self, username: &str, _password: &str) -> Result<AccessToken> {
        self.call_count.lock().await.sign_in += 1;
        self.record("sign_in", username).await?;

        let token = self
            .sign_in_token
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| "mock-signed-token".to_string());
        Ok(AccessToken {
            token,
            api_version: self.api_version.lock().await.clone(),
        })
    }

    async fn authorize(&self, token: &str, _org: &str) {
        *self.token.lock().await = Some(token.to_string());
    }

    async fn get_org(&self, org: &str) -> Result<OrgMembership> {
        self.call_count.lock().await.get_org += 1;
        self.record("get_org", org).await?;

        Ok(OrgMembership {
            name: Some(org.to_string()),
            api_version: self.api_version.lock().await.clone(),
        })
    }
}

// ============================================================================
// ProjectApi Implementation
// ============================================================================

#[async_trait]
impl ProjectApi for MockCodeThreatClient {
    async fn lookup_project(&self, key: &str) -> Result<serde_json::Value> {
        self.call_count.lock().await.lookup_project += 1;
        self.record("lookup_project", key).await?;

        if let Some(project) = self.projects.lock().await.get(key) {
            return Ok(project.clone());
        }

        match *self.missing_project.lock().await {
            MissingProject::EmptyBody => Ok(serde_json::json!([])),
            MissingProject::NotFound => Err(ApiError::NotFound(format!("project {}", key)).into()),
            MissingProject::BadRequest => {
                Err(ApiError::BadRequest(format!("unknown project {}", key)).into())
            }
        }
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<()> {
        self.call_count.lock().await.create_project += 1;
        self.record("create_project", &request.project).await?;

        self.projects.lock().await.insert(
            request.project.clone(),
            serde_json::json!({ "type": "github", "key": request.project }),
        );
        Ok(())
    }
}

// ============================================================================
// ScanApi Implementation
// ============================================================================

#[async_trait]
impl ScanApi for MockCodeThreatClient {
    async fn start_scan(&self, request: &StartScanRequest) -> Result<StartScanResponse> {
        self.call_count.lock().await.start_scan += 1;
        self.record("start_scan", &request.project).await?;

        Ok(self.start_response.lock().await.clone())
    }

    async fn scan_status(&self, scan_id: &str) -> Result<ScanStatus> {
        self.call_count.lock().await.scan_status += 1;
        self.record("scan_status", scan_id).await?;

        let mut statuses = self.statuses.lock().await;
        let status = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        status.ok_or_else(|| ApiError::NotFound(format!("scan {}", scan_id)).into())
    }

    async fn scan_report(
        &self,
        scan_id: &str,
        _branch: &str,
        _project: &str,
    ) -> Result<Option<Report>> {
        self.call_count.lock().await.scan_report += 1;
        self.record("scan_report", scan_id).await?;

        Ok(self.report.lock().await.clone())
    }

    async fn export_sarif(
        &self,
        scan_id: &str,
        _branch: &str,
        _project: &str,
    ) -> Result<serde_json::Value> {
        self.call_count.lock().await.export_sarif += 1;
        self.record("export_sarif", scan_id).await?;

        Ok(self.sarif.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::ScanStatusBuilder;
    use crate::client::models::ScanState;

    #[tokio::test]
    async fn test_mock_statuses_advance_and_repeat_last() {
        let mock = MockCodeThreatClient::new()
            .with_statuses(vec![
                ScanStatusBuilder::running().progress(10).build(),
                ScanStatusBuilder::ended().build(),
            ])
            .await;

        assert_eq!(mock.scan_status("s").await.unwrap().state, ScanState::Running);
        assert_eq!(mock.scan_status("s").await.unwrap().state, ScanState::End);
        assert_eq!(mock.scan_status("s").await.unwrap().state, ScanState::End);
        assert_eq!(mock.call_counts().await.scan_status, 3);
    }

    #[tokio::test]
    async fn test_mock_failure_consumed_once() {
        let mock = MockCodeThreatClient::new()
            .with_failure("get_org", ApiError::Forbidden)
            .await;

        assert!(mock.get_org("acme").await.is_err());
        assert!(mock.get_org("acme").await.is_ok());
        assert_eq!(mock.call_counts().await.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_create_makes_project_visible() {
        let mock = MockCodeThreatClient::new();
        assert_eq!(mock.lookup_project("demo").await.unwrap(), serde_json::json!([]));

        let request = CreateProjectRequest {
            repo_id: "demo:1".to_string(),
            project: "demo".to_string(),
            branch: "main".to_string(),
            account: "acme".to_string(),
            action: true,
            visibility: "public".to_string(),
            githubtoken: String::new(),
            policy_name: "Advanced Security".to_string(),
        };
        mock.create_project(&request).await.unwrap();

        let found = mock.lookup_project("demo").await.unwrap();
        assert_eq!(found["type"], "github");
    }

    #[tokio::test]
    async fn test_mock_captures_installed_token() {
        let mock = MockCodeThreatClient::new();
        mock.authorize("tok-9", "acme").await;
        mock.get_org("acme").await.unwrap();

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "get_org");
        assert_eq!(requests[0].token.as_deref(), Some("tok-9"));
    }
}
