use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective config file (token masked)
    Show,
    /// Print the config file location
    Path,
    /// Set a value, e.g. `polling.interval_secs 10`
    Set { key: String, value: String },
    /// Remove a value so the default applies again
    Unset { key: String },
}

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show(),
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if key == "service.github_token" {
                println!("Set {}", key);
            } else {
                println!("Set {} = {}", key, value);
            }
            Ok(())
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load()?;
            config.unset(&key)?;
            config.save()?;
            println!("Unset {}", key);
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let mut config = Config::load()?;
    if config.service.github_token.is_some() {
        config.service.github_token = Some("***".to_string());
    }
    let content = toml::to_string_pretty(&config).context("failed to serialize config")?;
    println!("# {}", Config::path()?.display());
    print!("{}", content);
    Ok(())
}
