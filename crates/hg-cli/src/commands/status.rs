use anyhow::{bail, Result};
use colored::Colorize;
use hg_client::{AssessmentApi, AssessmentOutcome, AssessmentStatus};
use serde_json::json;

use crate::client;
use crate::config::Config;
use crate::render;

pub fn run(api_url: Option<String>, id: String, json: bool, filter: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let api = client::from_config(&config, api_url)?;
    let status = client::block_on(async { anyhow::Ok(api.status(&id).await?) })?;

    match status {
        AssessmentStatus::Running if json => {
            render::print_json(&json!({ "assessment_id": id, "status": "running" }))
        }
        AssessmentStatus::Running => {
            println!("Assessment {} is {}.", id, "still running".yellow());
            Ok(())
        }
        AssessmentStatus::Failed(message) => bail!("assessment {id} failed: {message}"),
        AssessmentStatus::Completed(completed) => {
            let outcome = AssessmentOutcome::new(id, &completed);
            if json {
                render::print_json(&outcome)
            } else {
                render::print_outcome(&outcome, filter.as_deref());
                Ok(())
            }
        }
    }
}
