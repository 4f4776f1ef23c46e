use hg_core::Report;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Body of `POST /analyze`.
#[derive(Clone, Serialize)]
pub struct AssessmentRequest {
    pub repo_url: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
}

impl AssessmentRequest {
    /// Build a request; an empty token is treated as absent.
    pub fn new(
        repo_url: impl Into<String>,
        branch: impl Into<String>,
        github_token: Option<String>,
    ) -> Self {
        Self {
            repo_url: repo_url.into(),
            branch: branch.into(),
            github_token: github_token.filter(|t| !t.trim().is_empty()),
        }
    }
}

impl std::fmt::Debug for AssessmentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentRequest")
            .field("repo_url", &self.repo_url)
            .field("branch", &self.branch)
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Pull the job identifier out of a `POST /analyze` response.
pub fn parse_submit_response(body: &Value) -> Result<String> {
    match body.get("assessment_id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ClientError::Protocol(
            "submission response has no assessment_id".to_string(),
        )),
    }
}

/// A finished assessment as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedAssessment {
    pub assessment_id: Option<String>,
    pub project_name: String,
    pub assessment_date: Option<String>,
    pub assessment_type: Option<String>,
    /// Raw, loosely structured results. See [`hg_core::normalize`].
    pub results: Value,
}

impl CompletedAssessment {
    pub fn from_value(body: &Value) -> Self {
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            assessment_id: text("assessment_id"),
            project_name: text("project_name").unwrap_or_else(|| "Unknown".to_string()),
            assessment_date: text("assessment_date"),
            assessment_type: text("assessment_type"),
            results: body
                .get("results")
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default())),
        }
    }

    pub fn report(&self) -> Report {
        hg_core::normalize(&self.results)
    }
}

/// One answer from `GET /analyze/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentStatus {
    Running,
    Failed(String),
    Completed(CompletedAssessment),
}

impl AssessmentStatus {
    pub fn from_value(body: &Value) -> Result<Self> {
        if !body.is_object() {
            return Err(ClientError::Protocol(format!(
                "status response is not an object: {body}"
            )));
        }

        if body.get("status").and_then(Value::as_str) == Some("running") {
            return Ok(Self::Running);
        }

        let errored = match body.get("error") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(s)) => !s.is_empty(),
            _ => false,
        };
        if errored {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("assessment failed");
            return Ok(Self::Failed(message.to_string()));
        }

        Ok(Self::Completed(CompletedAssessment::from_value(body)))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Failed(_) => "failed",
            Self::Completed(_) => "completed",
        }
    }
}

/// Entry of `GET /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub assessment_id: String,
    pub status: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentList {
    #[serde(default)]
    pub assessments: Vec<AssessmentSummary>,
    #[serde(default)]
    pub total: usize,
}

/// `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub llm_configured: Option<bool>,
    #[serde(default)]
    pub active_assessments: Option<u64>,
}

/// What a full submit → poll → normalize run hands to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub assessment_id: String,
    pub project_name: String,
    pub assessment_date: Option<String>,
    pub report: Report,
}

impl AssessmentOutcome {
    pub fn new(assessment_id: String, completed: &CompletedAssessment) -> Self {
        Self {
            assessment_id: completed.assessment_id.clone().unwrap_or(assessment_id),
            project_name: completed.project_name.clone(),
            assessment_date: completed.assessment_date.clone(),
            report: completed.report(),
        }
    }
}
