use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use hg_client::{
    run_assessment, validate_branch, validate_repository_url, AssessmentOptions,
    AssessmentOutcome, AssessmentRequest, CancellationToken, ClientError, PollEvent,
};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::debug;

use crate::client;
use crate::config::Config;
use crate::render;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// GitHub repository URL (https://github.com/owner/repo)
    pub repo_url: String,

    /// Branch to assess (default: config `service.default_branch`, then "main")
    #[arg(short, long)]
    pub branch: Option<String>,

    /// GitHub token for private repositories
    #[arg(long, env = "HARDGATES_GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Read the GitHub token from the terminal (overrides --token)
    #[arg(long)]
    pub prompt_token: bool,

    /// Run on the service's synchronous endpoint instead of polling
    #[arg(long)]
    pub sync: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Only show rows containing this text (case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,

    /// Give up after this many status checks
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Seconds between status checks
    #[arg(long)]
    pub interval: Option<u64>,

    /// Give up after this many seconds in total
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub fn run(api_url: Option<String>, args: AnalyzeArgs) -> Result<()> {
    // Reject bad input before touching the network.
    validate_repository_url(&args.repo_url)?;

    let config = Config::load()?;
    let branch = validate_branch(&config.branch(args.branch.clone()))?;
    let token = if args.prompt_token {
        let token = rpassword::prompt_password("GitHub token: ")
            .context("failed to read token")?;
        Some(token)
    } else {
        config.github_token(args.token.clone())
    };
    let request = AssessmentRequest::new(&args.repo_url, &branch, token);

    if !args.json {
        eprintln!(
            "Starting hard gate assessment of {} ({})...",
            args.repo_url.trim().bold(),
            branch
        );
    }

    let result = if args.sync {
        let api = client::from_config(&config, api_url)?;
        client::block_on(async move {
            let completed = api.analyze_sync(&request).await?;
            let id = completed.assessment_id.clone().unwrap_or_else(|| "sync".to_string());
            anyhow::Ok(AssessmentOutcome::new(id, &completed))
        })
    } else {
        let api = client::from_config(&config, api_url)?;
        let mut poll = config.poll_config();
        if let Some(n) = args.max_attempts {
            poll.max_attempts = n;
        }
        if let Some(secs) = args.interval {
            poll.interval = Duration::from_secs(secs);
        }
        if let Some(secs) = args.timeout {
            poll.deadline = Some(Duration::from_secs(secs));
        }
        debug!(?poll, "polling configuration");
        client::block_on(poll_to_completion(Arc::new(api), request, poll, !args.json))
    };

    match result {
        Ok(outcome) => {
            if args.json {
                render::print_json(&outcome)
            } else {
                render::print_outcome(&outcome, args.filter.as_deref());
                Ok(())
            }
        }
        Err(err) => match err.downcast::<ClientError>() {
            Ok(ClientError::JobTimedOut { job_id, attempts }) => {
                if args.json {
                    render::print_json(&json!({
                        "assessment_id": job_id,
                        "status": "running",
                        "attempts": attempts,
                    }))?;
                }
                eprintln!(
                    "{} assessment {} is still running after {} status checks.",
                    "warning:".yellow().bold(),
                    job_id,
                    attempts
                );
                eprintln!("Check on it later with `hardgates status {job_id}`.");
                Ok(())
            }
            Ok(other) => Err(other.into()),
            Err(other) => Err(other),
        },
    }
}

async fn poll_to_completion(
    api: Arc<hg_client::AssessmentClient>,
    request: AssessmentRequest,
    poll: hg_client::PollConfig,
    show_progress: bool,
) -> Result<AssessmentOutcome> {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let (tx, mut rx) = mpsc::channel(16);
    let progress = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if !show_progress {
                continue;
            }
            match event {
                PollEvent::Started { job_id } => eprintln!("Submitted assessment {job_id}"),
                PollEvent::Running { elapsed, .. } => {
                    eprintln!("Assessment in progress... ({}s)", elapsed.as_secs())
                }
                PollEvent::Finished { .. } => {}
            }
        }
    });

    let options = AssessmentOptions {
        poll,
        cancel,
        events: Some(tx),
        ..Default::default()
    };
    let result = run_assessment(api, request, options).await;
    let _ = progress.await;
    Ok(result?)
}
