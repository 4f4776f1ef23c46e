use std::future::Future;

use anyhow::{Context, Result};
use hg_client::AssessmentClient;
use tracing::debug;

use crate::config::Config;

/// Resolves the service URL and builds the typed client.
pub fn from_config(config: &Config, api_url: Option<String>) -> Result<AssessmentClient> {
    let url = config.service_url(api_url);
    debug!(%url, "using assessment service");
    AssessmentClient::new(&url).with_context(|| format!("invalid service URL '{url}'"))
}

/// Run one command body on a fresh multi-threaded runtime.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let rt = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    rt.block_on(future)
}
