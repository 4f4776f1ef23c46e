use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use hg_client::{PollConfig, DEFAULT_BRANCH, DEFAULT_SERVICE_URL};
use serde::{Deserialize, Serialize};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "HARDGATES_CONFIG";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub url: Option<String>,
    pub github_token: Option<String>,
    pub default_branch: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PollingConfig {
    pub initial_delay_secs: Option<u64>,
    pub interval_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub deadline_secs: Option<u64>,
}

/// Keys accepted by `hardgates config set`.
pub const KEYS: &[&str] = &[
    "service.url",
    "service.github_token",
    "service.default_branch",
    "polling.initial_delay_secs",
    "polling.interval_secs",
    "polling.max_attempts",
    "polling.deadline_secs",
];

impl Config {
    /// `$HARDGATES_CONFIG` when set, else `<config_dir>/hardgates/config.toml`.
    pub fn path() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(dirs::config_dir()
                .context("could not determine config directory")?
                .join("hardgates")
                .join("config.toml")),
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// A missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("failed to parse config file {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read config file {}", path.display())),
        }
    }

    /// The file may hold a GitHub token, so it is created owner-only.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(path)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("failed to write config file {}", path.display()))?;

        // Tighten files created before this version or by hand.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .context("failed to restrict config file permissions")?;
        }
        Ok(())
    }

    /// Flag or environment value first, then the config file, then the default.
    pub fn service_url(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.service.url.clone())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
    }

    pub fn branch(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.service.default_branch.clone())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string())
    }

    pub fn github_token(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.service.github_token.clone())
            .filter(|t| !t.is_empty())
    }

    pub fn poll_config(&self) -> PollConfig {
        let defaults = PollConfig::default();
        let p = &self.polling;
        PollConfig {
            initial_delay: p.initial_delay_secs.map(Duration::from_secs).unwrap_or(defaults.initial_delay),
            interval: p.interval_secs.map(Duration::from_secs).unwrap_or(defaults.interval),
            max_attempts: p.max_attempts.unwrap_or(defaults.max_attempts),
            deadline: p.deadline_secs.map(Duration::from_secs).or(defaults.deadline),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let secs = || -> Result<u64> {
            value.parse().with_context(|| format!("{key} expects a whole number of seconds"))
        };
        match key {
            "service.url" => self.service.url = Some(value.trim_end_matches('/').to_string()),
            "service.github_token" => self.service.github_token = Some(value.to_string()),
            "service.default_branch" => {
                self.service.default_branch = Some(hg_client::validate_branch(value)?)
            }
            "polling.initial_delay_secs" => self.polling.initial_delay_secs = Some(secs()?),
            "polling.interval_secs" => self.polling.interval_secs = Some(secs()?),
            "polling.deadline_secs" => self.polling.deadline_secs = Some(secs()?),
            "polling.max_attempts" => {
                let attempts: u32 = value
                    .parse()
                    .with_context(|| format!("{key} expects a positive number"))?;
                if attempts == 0 {
                    bail!("{key} must be at least 1");
                }
                self.polling.max_attempts = Some(attempts);
            }
            other => bail!("unknown config key '{}'. Known keys: {}", other, KEYS.join(", ")),
        }
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "service.url" => self.service.url = None,
            "service.github_token" => self.service.github_token = None,
            "service.default_branch" => self.service.default_branch = None,
            "polling.initial_delay_secs" => self.polling.initial_delay_secs = None,
            "polling.interval_secs" => self.polling.interval_secs = None,
            "polling.max_attempts" => self.polling.max_attempts = None,
            "polling.deadline_secs" => self.polling.deadline_secs = None,
            other => bail!("unknown config key '{}'. Known keys: {}", other, KEYS.join(", ")),
        }
        Ok(())
    }
}
