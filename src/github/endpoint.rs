use std::fmt;

/// Query string parameters sent alongside an endpoint.
pub type Query = Vec<(&'static str, String)>;

/// The REST resources the client knows how to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    AuthenticatedUser,
    OrgRepos { org: String },
    Repo { owner: String, repo: String },
    Branches { owner: String, repo: String },
    Contributors { owner: String, repo: String },
    Languages { owner: String, repo: String },
    Commits { owner: String, repo: String },
    User { username: String },
    Workflows { owner: String, repo: String },
    WorkflowRuns { owner: String, repo: String, workflow_id: u64 },
    RunJobs { owner: String, repo: String, run_id: u64 },
}

impl Endpoint {
    /// Every supported request is a read.
    pub fn method(&self) -> reqwest::Method {
        reqwest::Method::GET
    }

    pub fn template(&self) -> &'static str {
        match self {
            Endpoint::AuthenticatedUser => "GET /user",
            Endpoint::OrgRepos { .. } => "GET /orgs/{org}/repos",
            Endpoint::Repo { .. } => "GET /repos/{owner}/{repo}",
            Endpoint::Branches { .. } => "GET /repos/{owner}/{repo}/branches",
            Endpoint::Contributors { .. } => "GET /repos/{owner}/{repo}/contributors",
            Endpoint::Languages { .. } => "GET /repos/{owner}/{repo}/languages",
            Endpoint::Commits { .. } => "GET /repos/{owner}/{repo}/commits",
            Endpoint::User { .. } => "GET /users/{username}",
            Endpoint::Workflows { .. } => "GET /repos/{owner}/{repo}/actions/workflows",
            Endpoint::WorkflowRuns { .. } => {
                "GET /repos/{owner}/{repo}/actions/workflows/{workflow_id}/runs"
            }
            Endpoint::RunJobs { .. } => "GET /repos/{owner}/{repo}/actions/runs/{run_id}/jobs",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::AuthenticatedUser => "/user".to_string(),
            Endpoint::OrgRepos { org } => format!("/orgs/{}/repos", org),
            Endpoint::Repo { owner, repo } => format!("/repos/{}/{}", owner, repo),
            Endpoint::Branches { owner, repo } => format!("/repos/{}/{}/branches", owner, repo),
            Endpoint::Contributors { owner, repo } => {
                format!("/repos/{}/{}/contributors", owner, repo)
            }
            Endpoint::Languages { owner, repo } => format!("/repos/{}/{}/languages", owner, repo),
            Endpoint::Commits { owner, repo } => format!("/repos/{}/{}/commits", owner, repo),
            Endpoint::User { username } => format!("/users/{}", username),
            Endpoint::Workflows { owner, repo } => {
                format!("/repos/{}/{}/actions/workflows", owner, repo)
            }
            Endpoint::WorkflowRuns {
                owner,
                repo,
                workflow_id,
            } => format!(
                "/repos/{}/{}/actions/workflows/{}/runs",
                owner, repo, workflow_id
            ),
            Endpoint::RunJobs {
                owner,
                repo,
                run_id,
            } => format!("/repos/{}/{}/actions/runs/{}/jobs", owner, repo, run_id),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
