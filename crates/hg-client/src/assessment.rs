use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::cancel::CancellationToken;
use crate::client::AssessmentApi;
use crate::clock::{Clock, TokioClock};
use crate::error::{ClientError, Result};
use crate::poll::{PollConfig, PollCoordinator, PollEvent};
use crate::types::{AssessmentOutcome, AssessmentRequest};
use crate::validation::{validate_branch, RepositoryPolicy};

/// Knobs for one end-to-end run.
#[derive(Clone)]
pub struct AssessmentOptions {
    pub policy: RepositoryPolicy,
    pub poll: PollConfig,
    pub clock: Arc<dyn Clock>,
    pub cancel: CancellationToken,
    pub events: Option<mpsc::Sender<PollEvent>>,
}

impl Default for AssessmentOptions {
    fn default() -> Self {
        Self {
            policy: RepositoryPolicy::default(),
            poll: PollConfig::default(),
            clock: Arc::new(TokioClock),
            cancel: CancellationToken::new(),
            events: None,
        }
    }
}

/// Validate, submit, poll to completion and normalize the results.
///
/// Nothing is polled unless submission returned a job identifier. A
/// cancellation before or during submission stops the run at once.
pub async fn run_assessment(
    api: Arc<dyn AssessmentApi>,
    request: AssessmentRequest,
    options: AssessmentOptions,
) -> Result<AssessmentOutcome> {
    options.policy.validate(&request.repo_url)?;
    let branch = validate_branch(&request.branch)?;
    let request = AssessmentRequest {
        repo_url: request.repo_url.trim().to_string(),
        branch,
        ..request
    };

    if options.cancel.is_cancelled() {
        return Err(ClientError::Cancelled);
    }
    let job_id = tokio::select! {
        biased;
        _ = options.cancel.cancelled() => return Err(ClientError::Cancelled),
        submitted = api.submit(&request) => submitted?,
    };

    let mut poller = PollCoordinator::new(api, job_id.clone())
        .with_config(options.poll)
        .with_clock(options.clock)
        .with_cancellation(options.cancel);
    if let Some(events) = options.events {
        poller = poller.with_events(events);
    }

    let completed = poller.run().await?;
    let outcome = AssessmentOutcome::new(job_id, &completed);
    info!(
        job_id = %outcome.assessment_id,
        compliance = outcome.report.statistics.compliance,
        "assessment normalized"
    );
    Ok(outcome)
}
