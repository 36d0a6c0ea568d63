//! CodeThreat API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::api::{AuthApi, ProjectApi, ScanApi};
use super::models::{
    AccessToken, CreateProjectRequest, OrgMembership, Report, ReportResponse, ScanStatus,
    SignInRequest, SignInResponse, StartScanRequest, StartScanResponse,
};
use crate::error::{ApiError, Error, Result};

/// Response header carrying the negotiated API version
pub const API_VERSION_HEADER: &str = "x-ct-api-version";

/// Request header naming the organization
const ORG_HEADER: &str = "x-ct-organization";

/// Rate limit: 6 requests per second
const RATE_LIMIT_PER_SECOND: u32 = 6;

/// CodeThreat API client
pub struct CodeThreatClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    auth_state: Arc<RwLock<AuthState>>,
}

/// Internal authentication state
#[derive(Debug, Clone, Default)]
struct AuthState {
    token: Option<String>,
    org: Option<String>,
}

/// Error body shape used by the backend (`{"code": 404, "message": "..."}`)
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Status code embedded in the body, if it names an error status
    fn status(&self) -> Option<StatusCode> {
        let code = match self.code.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64()?,
            serde_json::Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        let code = u16::try_from(code).ok()?;
        StatusCode::from_u16(code)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
    }
}

impl CodeThreatClient {
    /// Create a new client for the given server URL
    pub fn new(server: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: server.trim_end_matches('/').to_string(),
            rate_limiter,
            auth_state: Arc::new(RwLock::new(AuthState::default())),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach token and organization headers, failing if not authorized yet
    async fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let state = self.auth_state.read().await;
        let token = state.token.as_deref().ok_or(ApiError::Unauthorized)?;
        let org = state.org.as_deref().unwrap_or_default();
        Ok(builder
            .header("Authorization", token)
            .header(ORG_HEADER, org))
    }

    /// Send a request and map any non-2xx status to an [`ApiError`]
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        self.rate_limiter.until_ready().await;

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &body, retry_after).into())
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}. Body was: {}", e, text))
                .into()
        })
    }
}

/// Map a failed response onto the error taxonomy.
///
/// The backend mirrors the status in a `code` body field; when present it
/// takes precedence over the HTTP status.
pub(crate) fn classify_failure(status: StatusCode, body: &str, retry_after: Option<u64>) -> ApiError {
    let detail = ErrorBody::parse(body);
    let effective = detail.status().unwrap_or(status);
    let message = detail
        .message
        .clone()
        .filter(|m| !m.trim().is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| status.to_string());

    match effective {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => {
            ApiError::RateLimit(Duration::from_secs(retry_after.unwrap_or(60)))
        }
        StatusCode::BAD_REQUEST => ApiError::BadRequest(message),
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
        s if s.is_server_error() => ApiError::ServerError(message),
        s => ApiError::InvalidResponse(format!("Unexpected status code {}: {}", s, message)),
    }
}

/// Sign-in and org lookup rejections surface as authentication failures
fn as_auth_failure(err: Error) -> Error {
    match err {
        Error::Api(ApiError::Network(msg)) => ApiError::Network(msg).into(),
        Error::Api(api) => ApiError::Authentication(api.to_string()).into(),
        other => other,
    }
}

fn api_version(response: &Response) -> Option<String> {
    response
        .headers()
        .get(API_VERSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl AuthApi for CodeThreatClient {
    async fn sign_in(&self, username: &str, password: &str) -> Result<AccessToken> {
        debug!("POST /api/signin");
        let builder = self.http.post(self.url("/api/signin")).json(&SignInRequest {
            client_id: username,
            client_secret: password,
        });
        let response = self.send(builder).await.map_err(as_auth_failure)?;
        let api_version = api_version(&response);

        let body: SignInResponse = Self::read_json(response).await?;
        let token = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Authentication("sign-in returned no access token".into()))?;

        Ok(AccessToken { token, api_version })
    }

    async fn authorize(&self, token: &str, org: &str) {
        let mut state = self.auth_state.write().await;
        state.token = Some(token.to_string());
        state.org = Some(org.to_string());
    }

    async fn get_org(&self, org: &str) -> Result<OrgMembership> {
        debug!("GET /api/organization?key={}", org);
        let builder = self
            .authorized(self.http.get(self.url("/api/organization")))
            .await?
            .query(&[("key", org)]);
        let response = self.send(builder).await.map_err(as_auth_failure)?;
        let api_version = api_version(&response);

        // The body shape varies across backend versions; only the header matters
        let text = response.text().await.unwrap_or_default();
        let mut membership: OrgMembership = serde_json::from_str(&text).unwrap_or_default();
        membership.api_version = api_version;
        Ok(membership)
    }
}

#[async_trait]
impl ProjectApi for CodeThreatClient {
    async fn lookup_project(&self, key: &str) -> Result<serde_json::Value> {
        debug!("GET /api/project?key={}", key);
        let builder = self
            .authorized(self.http.get(self.url("/api/project")))
            .await?
            .query(&[("key", key)]);
        let response = self.send(builder).await?;

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse project lookup: {}", e)).into()
        })
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<()> {
        debug!("POST /api/integration/github/set ({})", request.repo_id);
        let builder = self
            .authorized(self.http.post(self.url("/api/integration/github/set")))
            .await?
            .json(request);
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl ScanApi for CodeThreatClient {
    async fn start_scan(&self, request: &StartScanRequest) -> Result<StartScanResponse> {
        debug!("POST /api/integration/github/start ({}@{})", request.project, request.branch);
        let builder = self
            .authorized(self.http.post(self.url("/api/integration/github/start")))
            .await?
            .json(request);
        let response = self.send(builder).await?;
        Self::read_json(response).await
    }

    async fn scan_status(&self, scan_id: &str) -> Result<ScanStatus> {
        let path = format!("/api/scan/status/{}", scan_id);
        debug!("GET {}", path);
        let builder = self.authorized(self.http.get(self.url(&path))).await?;
        let response = self.send(builder).await?;
        Self::read_json(response).await
    }

    async fn scan_report(
        &self,
        scan_id: &str,
        branch: &str,
        project: &str,
    ) -> Result<Option<Report>> {
        debug!("GET /api/plugins/helper?sid={}", scan_id);
        let builder = self
            .authorized(self.http.get(self.url("/api/plugins/helper")))
            .await?
            .header("x-ct-from", "github")
            .query(&[("sid", scan_id), ("branch", branch), ("project", project)]);

        match self.send(builder).await {
            Ok(response) => {
                let body: ReportResponse = Self::read_json(response).await?;
                Ok(body.into_report())
            }
            Err(Error::Api(ApiError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn export_sarif(
        &self,
        scan_id: &str,
        branch: &str,
        project: &str,
    ) -> Result<serde_json::Value> {
        debug!("GET /api/report/scan/sarif?sid={}", scan_id);
        let builder = self
            .authorized(self.http.get(self.url("/api/report/scan/sarif")))
            .await?
            .query(&[("sid", scan_id), ("branch", branch), ("project", project)]);
        let response = self.send(builder).await?;
        Self::read_json(response).await
    }
}
