use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Projection of one entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub html_url: String,
    pub sha: String,
    /// Null when the git identity is not linked to a GitHub account.
    pub author: Option<CommitAccount>,
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitAccount {
    pub login: String,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDetails {
    pub author: Option<GitAuthor>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl CommitRecord {
    /// GitHub login of the author, if the commit is linked to an account.
    pub fn author_login(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.login.as_str())
    }
}
