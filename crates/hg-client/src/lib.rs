//! # hg-client
//!
//! Typed Rust client for the hard gate assessment service.
//!
//! The service runs assessments asynchronously: a job is submitted, its
//! status is polled until it completes, and the raw results are normalized
//! into a [`hg_core::Report`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hg_client::{run_assessment, AssessmentClient, AssessmentOptions, AssessmentRequest};
//!
//! # async fn example() -> hg_client::Result<()> {
//! let client = Arc::new(AssessmentClient::new("http://localhost:8000")?);
//! let request = AssessmentRequest::new("https://github.com/org/repo", "main", None);
//!
//! let outcome = run_assessment(client, request, AssessmentOptions::default()).await?;
//! println!("{}: {}%", outcome.project_name, outcome.report.statistics.compliance);
//! # Ok(())
//! # }
//! ```

pub mod assessment;
pub mod cancel;
pub mod client;
pub mod clock;
pub mod error;
pub mod poll;
pub mod types;
pub mod validation;

pub use assessment::{run_assessment, AssessmentOptions};
pub use cancel::CancellationToken;
pub use client::{AssessmentApi, AssessmentClient, DEFAULT_SERVICE_URL};
pub use clock::{Clock, TokioClock};
pub use error::{ClientError, Result};
pub use poll::{PollConfig, PollCoordinator, PollEvent, PollState, PollStatus};
pub use types::*;
pub use validation::{validate_branch, validate_repository_url, RepositoryPolicy, DEFAULT_BRANCH};
