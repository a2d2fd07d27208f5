use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::commit::CommitRecord;
use super::repo::RepoSummary;
use super::user::UserInfo;
use super::workflow::{CiInfo, Job};

/// Everything gathered for one classroom repository.
#[derive(Debug, Clone, Serialize)]
pub struct RepoSnapshot {
    pub name: String,
    pub repo: Option<RepoSummary>,
    pub student: Option<String>,
    pub student_info: Option<UserInfo>,
    pub branches: Vec<Value>,
    pub contributors: Vec<Value>,
    pub languages: Vec<String>,
    pub commits: Vec<CommitRecord>,
    pub ci: Option<CiInfo>,
    pub latest_jobs: Vec<Job>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomReport {
    pub org: String,
    pub assignment: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub request_count: usize,
    pub repositories: Vec<RepoSnapshot>,
}
