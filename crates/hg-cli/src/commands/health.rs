use anyhow::Result;
use colored::Colorize;

use crate::client;
use crate::config::Config;

pub fn run(api_url: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let api = client::from_config(&config, api_url)?;
    let health = client::block_on(async { anyhow::Ok(api.health().await?) })?;

    let status = if health.status == "healthy" {
        health.status.green().bold()
    } else {
        health.status.yellow().bold()
    };
    println!("Service:            {}", api.base_url());
    println!("Status:             {}", status);
    match health.llm_configured {
        Some(true) => println!("LLM configured:     yes"),
        Some(false) => println!("LLM configured:     {}", "no".red()),
        None => println!("LLM configured:     unknown"),
    }
    if let Some(active) = health.active_assessments {
        println!("Active assessments: {}", active);
    }
    if let Some(ts) = &health.timestamp {
        println!("Checked at:         {}", ts);
    }
    Ok(())
}
