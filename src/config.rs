use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::activity::DEFAULT_WINDOW_DAYS;
use crate::error::{ActiveReposError, Result};
use crate::github::DEFAULT_API_BASE;

pub const DEFAULT_REVALIDATE_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Repository URLs shaped like `https://github.com/<owner>/<name>/...`
    pub repos: Vec<String>,
    pub token_env: Option<String>,
    pub token_command: Option<String>,
    pub api_base: String,
    pub revalidate_secs: u64,
    pub active_window_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            token_env: Some("GITHUB_TOKEN".to_string()),
            token_command: Some("gh auth token".to_string()),
            api_base: DEFAULT_API_BASE.to_string(),
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
            active_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("active-repos").join("config.toml"))
}

impl Config {
    /// Load from an explicit path (must exist) or from the default location
    /// (falls back to defaults when absent).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Config::default()),
            },
        };

        let content = std::fs::read_to_string(&path).inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "cannot read config");
        })?;
        Self::parse(&content)
            .map_err(|e| ActiveReposError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Replace the configured list when repositories are given on the command line.
    pub fn with_repos(mut self, repos: Vec<String>) -> Self {
        if !repos.is_empty() {
            self.repos = repos;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.repos.is_empty() {
            return Err(ActiveReposError::Config(
                "no repositories configured; add `repos = [...]` to the config file or pass --repo"
                    .to_string(),
            ));
        }
        if self.active_window_days == 0 {
            return Err(ActiveReposError::Config(
                "active_window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn revalidate_window(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    pub fn active_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.active_window_days as i64)
    }
}
