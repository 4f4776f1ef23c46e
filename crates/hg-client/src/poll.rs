//! Job status polling.
//!
//! A [`PollCoordinator`] owns the state of exactly one job. It waits
//! `initial_delay`, then issues one status request at a time, sleeping
//! `interval` between "running" answers, until the job completes, fails,
//! the attempt cap or deadline is reached, or the run is cancelled.
//! Transport and HTTP failures end polling immediately; they are never
//! retried.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::client::AssessmentApi;
use crate::clock::{Clock, TokioClock};
use crate::error::{ClientError, Result};
use crate::types::{AssessmentStatus, CompletedAssessment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub initial_delay: Duration,
    pub interval: Duration,
    /// Status requests allowed before giving up. Values below 1 act as 1.
    pub max_attempts: u32,
    /// Optional wall-clock ceiling measured from the start of polling.
    pub deadline: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            interval: Duration::from_secs(5),
            max_attempts: 60,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Running,
    Succeeded,
    Failed,
    TimedOut,
    Cancelled,
}

impl PollStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    pub job_id: String,
    pub attempts: u32,
    pub status: PollStatus,
}

/// Progress notifications for a UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    Started { job_id: String },
    Running { attempt: u32, elapsed: Duration },
    Finished { state: PollState },
}

pub struct PollCoordinator {
    api: Arc<dyn AssessmentApi>,
    clock: Arc<dyn Clock>,
    config: PollConfig,
    cancel: CancellationToken,
    events: Option<mpsc::Sender<PollEvent>>,
    state: PollState,
}

impl PollCoordinator {
    pub fn new(api: Arc<dyn AssessmentApi>, job_id: impl Into<String>) -> Self {
        Self {
            api,
            clock: Arc::new(TokioClock),
            config: PollConfig::default(),
            cancel: CancellationToken::new(),
            events: None,
            state: PollState {
                job_id: job_id.into(),
                attempts: 0,
                status: PollStatus::Running,
            },
        }
    }

    pub fn with_config(mut self, config: PollConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_events(mut self, events: mpsc::Sender<PollEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run on a tokio task so the caller keeps control.
    pub fn spawn(mut self) -> JoinHandle<Result<CompletedAssessment>> {
        tokio::spawn(async move { self.run().await })
    }

    /// Poll until a terminal state. `Ok` only for [`PollStatus::Succeeded`].
    pub async fn run(&mut self) -> Result<CompletedAssessment> {
        self.emit(PollEvent::Started {
            job_id: self.state.job_id.clone(),
        })
        .await;

        let result = self.poll_loop().await;

        match &result {
            Ok(_) => info!(job_id = %self.state.job_id, attempts = self.state.attempts, "assessment completed"),
            Err(e) if e.is_warning() => warn!(job_id = %self.state.job_id, "{e}"),
            Err(e) => warn!(job_id = %self.state.job_id, error = %e, "polling stopped"),
        }

        self.emit(PollEvent::Finished {
            state: self.state.clone(),
        })
        .await;
        result
    }

    async fn poll_loop(&mut self) -> Result<CompletedAssessment> {
        let start = self.clock.now();
        let max_attempts = self.config.max_attempts.max(1);

        self.pause(self.config.initial_delay, start).await?;

        loop {
            if self.cancel.is_cancelled() {
                return Err(self.cancelled());
            }
            if let Some(deadline) = self.config.deadline {
                if self.clock.now().duration_since(start) >= deadline {
                    return Err(self.timed_out());
                }
            }

            self.state.attempts += 1;
            debug!(job_id = %self.state.job_id, attempt = self.state.attempts, "checking status");

            let answer = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                answer = self.api.status(&self.state.job_id) => Some(answer),
            };
            let Some(answer) = answer else {
                return Err(self.cancelled());
            };

            match answer {
                Err(e) => {
                    self.state.status = PollStatus::Failed;
                    return Err(e);
                }
                Ok(AssessmentStatus::Failed(message)) => {
                    self.state.status = PollStatus::Failed;
                    return Err(ClientError::JobFailed(message));
                }
                Ok(AssessmentStatus::Completed(done)) => {
                    self.state.status = PollStatus::Succeeded;
                    return Ok(done);
                }
                Ok(AssessmentStatus::Running) if self.state.attempts >= max_attempts => {
                    return Err(self.timed_out());
                }
                Ok(AssessmentStatus::Running) => {
                    let elapsed = self.clock.now().duration_since(start);
                    self.emit(PollEvent::Running {
                        attempt: self.state.attempts,
                        elapsed,
                    })
                    .await;
                    self.pause(self.config.interval, start).await?;
                }
            }
        }
    }

    /// Sleep for `duration`, cut short by cancellation or by the deadline.
    async fn pause(&mut self, duration: Duration, start: Instant) -> Result<()> {
        let remaining = self
            .config
            .deadline
            .map(|deadline| deadline.saturating_sub(self.clock.now().duration_since(start)));
        let nap = remaining.map_or(duration, |left| left.min(duration));

        let interrupted = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => true,
            _ = self.clock.sleep(nap) => false,
        };
        if interrupted {
            return Err(self.cancelled());
        }
        if nap < duration {
            return Err(self.timed_out());
        }
        Ok(())
    }

    fn cancelled(&mut self) -> ClientError {
        self.state.status = PollStatus::Cancelled;
        ClientError::Cancelled
    }

    fn timed_out(&mut self) -> ClientError {
        self.state.status = PollStatus::TimedOut;
        ClientError::JobTimedOut {
            job_id: self.state.job_id.clone(),
            attempts: self.state.attempts,
        }
    }

    async fn emit(&self, event: PollEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event).await;
        }
    }
}
