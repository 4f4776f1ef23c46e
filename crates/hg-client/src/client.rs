use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ClientError, Result};
use crate::types::{
    parse_submit_response, AssessmentList, AssessmentRequest, AssessmentStatus,
    CompletedAssessment, HealthReport,
};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The two calls an assessment run needs. Implemented over HTTP by
/// [`AssessmentClient`]; tests substitute scripted fakes.
#[async_trait::async_trait]
pub trait AssessmentApi: Send + Sync {
    /// Start an assessment and return its job identifier.
    async fn submit(&self, request: &AssessmentRequest) -> Result<String>;

    /// Fetch the current status of a job.
    async fn status(&self, job_id: &str) -> Result<AssessmentStatus>;
}

/// HTTP client for the assessment service.
#[derive(Debug, Clone)]
pub struct AssessmentClient {
    http: reqwest::Client,
    base_url: String,
}

impl AssessmentClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(agent) = HeaderValue::from_str(&format!("hardgates/{VERSION}")) {
            headers.insert(USER_AGENT, agent);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Run an assessment synchronously on the service. May take minutes.
    pub async fn analyze_sync(&self, request: &AssessmentRequest) -> Result<CompletedAssessment> {
        info!(repo = %request.repo_url, branch = %request.branch, "running synchronous assessment");
        let res = self
            .http
            .post(self.url("/analyze/sync"))
            .timeout(Duration::from_secs(30 * 60))
            .json(request)
            .send()
            .await?;
        let body = read_json(res).await?;
        Ok(CompletedAssessment::from_value(&body))
    }

    pub async fn list(&self) -> Result<AssessmentList> {
        let res = self.http.get(self.url("/analyze")).send().await?;
        let body = read_json(res).await?;
        serde_json::from_value(body)
            .map_err(|e| ClientError::Protocol(format!("malformed assessment list: {e}")))
    }

    pub async fn delete(&self, job_id: &str) -> Result<()> {
        let res = self
            .http
            .delete(self.url(&format!("/analyze/{job_id}")))
            .send()
            .await?;
        read_json(res).await?;
        Ok(())
    }

    pub async fn health(&self) -> Result<HealthReport> {
        let res = self.http.get(self.url("/health")).send().await?;
        let body = read_json(res).await?;
        serde_json::from_value(body)
            .map_err(|e| ClientError::Protocol(format!("malformed health response: {e}")))
    }
}

#[async_trait::async_trait]
impl AssessmentApi for AssessmentClient {
    async fn submit(&self, request: &AssessmentRequest) -> Result<String> {
        info!(repo = %request.repo_url, branch = %request.branch, "submitting assessment");
        let res = self
            .http
            .post(self.url("/analyze"))
            .json(request)
            .send()
            .await?;
        let body = read_json(res).await?;
        let job_id = parse_submit_response(&body)?;
        info!(job_id = %job_id, "assessment started");
        Ok(job_id)
    }

    async fn status(&self, job_id: &str) -> Result<AssessmentStatus> {
        let res = self
            .http
            .get(self.url(&format!("/analyze/{job_id}")))
            .send()
            .await?;
        let body = read_json(res).await?;
        let status = AssessmentStatus::from_value(&body)?;
        debug!(job_id = %job_id, status = status.label(), "status checked");
        Ok(status)
    }
}

async fn read_json(res: reqwest::Response) -> Result<Value> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(service_error(status, &body));
    }
    res.json::<Value>()
        .await
        .map_err(|e| ClientError::Protocol(format!("response is not JSON: {e}")))
}

/// Build a [`ClientError::Service`] from a non-success response, preferring
/// the service's `detail` field over the HTTP reason phrase.
pub fn service_error(status: StatusCode, body: &str) -> ClientError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned())
        .and_then(|detail| match detail {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });

    ClientError::Service {
        status: status.as_u16(),
        detail,
    }
}
