use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowList {
    pub workflows: Vec<Workflow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRunList {
    pub workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobList {
    pub jobs: Vec<Job>,
}

/// Projection of one entry of the workflow runs listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub name: Option<String>,
    pub path: Option<String>,
    pub event: String,
    pub head_branch: Option<String>,
    pub conclusion: Option<String>,
    pub status: Option<String>,
    pub check_suite_id: Option<u64>,
    pub html_url: String,
    pub run_started_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub triggering_actor: Option<Actor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
}

/// The narrower run shape reported by CI info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CiRun {
    pub id: u64,
    pub name: Option<String>,
    pub event: String,
    pub conclusion: Option<String>,
    pub status: Option<String>,
    pub check_suite_id: Option<u64>,
    pub head_branch: Option<String>,
    pub html_url: String,
    pub run_started_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<WorkflowRun> for CiRun {
    fn from(run: WorkflowRun) -> Self {
        Self {
            id: run.id,
            name: run.name,
            event: run.event,
            conclusion: run.conclusion,
            status: run.status,
            check_suite_id: run.check_suite_id,
            head_branch: run.head_branch,
            html_url: run.html_url,
            run_started_at: run.run_started_at,
            created_at: run.created_at,
            updated_at: run.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CiInfo {
    pub workflow_id: u64,
    pub runs: Vec<CiRun>,
}

impl CiInfo {
    /// Most recently created run, if any.
    pub fn latest_run(&self) -> Option<&CiRun> {
        self.runs.iter().max_by_key(|r| (r.created_at, r.id))
    }
}

/// Projection of one entry of `GET .../actions/runs/{run_id}/jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub name: String,
    pub html_url: Option<String>,
    pub conclusion: Option<String>,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub steps: Vec<JobStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStep {
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub number: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}
