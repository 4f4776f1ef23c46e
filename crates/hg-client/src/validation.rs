use reqwest::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_BRANCH: &str = "main";

/// Which repository URLs the service is allowed to fetch.
///
/// Hosts are matched by substring rather than by domain so that
/// enterprise instances such as `github.corp.example` pass.
#[derive(Debug, Clone)]
pub struct RepositoryPolicy {
    pub scheme: String,
    pub host_marker: String,
}

impl Default for RepositoryPolicy {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host_marker: "github".to_string(),
        }
    }
}

impl RepositoryPolicy {
    pub fn validate(&self, repo_url: &str) -> Result<Url> {
        let trimmed = repo_url.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidRepositoryUrl(
                "repository URL is empty".to_string(),
            ));
        }

        let url = Url::parse(trimmed)
            .map_err(|e| ClientError::InvalidRepositoryUrl(format!("{trimmed}: {e}")))?;

        if url.scheme() != self.scheme {
            return Err(ClientError::InvalidRepositoryUrl(format!(
                "{trimmed}: URL must start with {}://",
                self.scheme
            )));
        }

        let host = url.host_str().unwrap_or_default();
        if !host.contains(&self.host_marker) {
            return Err(ClientError::InvalidRepositoryUrl(format!(
                "{trimmed}: host '{host}' is not a recognised {} host",
                self.host_marker
            )));
        }

        Ok(url)
    }
}

/// Validate with the default `https` + `github` policy.
pub fn validate_repository_url(repo_url: &str) -> Result<Url> {
    RepositoryPolicy::default().validate(repo_url)
}

pub fn validate_branch(branch: &str) -> Result<String> {
    let branch = branch.trim();
    if branch.is_empty() {
        return Err(ClientError::InvalidBranch("branch name is empty".to_string()));
    }
    if branch.chars().any(char::is_whitespace) {
        return Err(ClientError::InvalidBranch(format!(
            "'{branch}' contains whitespace"
        )));
    }
    Ok(branch.to_string())
}
