use anyhow::Result;
use colored::Colorize;

use crate::client;
use crate::config::Config;
use crate::render;

pub fn list(api_url: Option<String>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let api = client::from_config(&config, api_url)?;
    let list = client::block_on(async { anyhow::Ok(api.list().await?) })?;

    if json {
        return render::print_json(&list);
    }
    if list.assessments.is_empty() {
        println!("No assessments.");
        return Ok(());
    }

    println!("{:<38} {:<11} {:<17} {:<17}", "ID", "Status", "Started", "Completed");
    println!("{}", "-".repeat(86));
    for a in &list.assessments {
        let status = format!("{:<11}", a.status);
        let status = match a.status.as_str() {
            "completed" => status.green(),
            "running" => status.yellow(),
            "failed" => status.red(),
            _ => status.normal(),
        };
        println!(
            "{:<38} {} {:<17} {:<17}",
            a.assessment_id,
            status,
            render::short_timestamp(a.started_at.as_deref()),
            render::short_timestamp(a.completed_at.as_deref()),
        );
    }
    println!();
    println!("{} assessment(s)", list.total);
    Ok(())
}

pub fn delete(api_url: Option<String>, id: String) -> Result<()> {
    let config = Config::load()?;
    let api = client::from_config(&config, api_url)?;
    client::block_on(async { anyhow::Ok(api.delete(&id).await?) })?;
    println!("Deleted assessment '{}'", id);
    Ok(())
}
