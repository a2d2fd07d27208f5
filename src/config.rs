use chrono::{DateTime, Utc};
use std::env;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub org: Option<String>,
    pub api_url: String,
    pub concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .map_err(|_| Error::Config("GITHUB_TOKEN environment variable not set".to_string()))?;

        let org = env::var("GITHUB_ORG").ok().filter(|v| !v.is_empty());

        let api_url = env::var("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let concurrency_limit = env::var("CONCURRENCY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(5);

        Ok(Self {
            github_token,
            org,
            api_url,
            concurrency_limit,
        })
    }

    /// Organization login, failing when neither the environment nor the
    /// command line supplied one.
    pub fn require_org(&self) -> Result<&str> {
        self.org
            .as_deref()
            .ok_or_else(|| Error::Config("GITHUB_ORG not set and no --org given".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Assignment prefix; repositories are named `<assignment>-<student>`.
    pub assignment: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub concurrency_limit: usize,
    pub with_jobs: bool,
}

impl From<&Config> for SyncConfig {
    fn from(config: &Config) -> Self {
        Self {
            assignment: None,
            since: None,
            concurrency_limit: config.concurrency_limit,
            with_jobs: false,
        }
    }
}
