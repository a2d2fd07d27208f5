use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Projection of `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub default_branch: Option<String>,
    pub owner: RepoOwner,
    pub private: bool,
    pub html_url: String,
    pub pushed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
}
