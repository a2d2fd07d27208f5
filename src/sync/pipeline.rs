use std::sync::Arc;
use chrono::Utc;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::config::SyncConfig;
use crate::github::ClassroomClient;
use crate::models::{ClassroomReport, RepoSnapshot};

/// Collects a [`RepoSnapshot`] for every classroom repository of an organization.
pub struct ClassroomSync {
    client: Arc<ClassroomClient>,
    config: SyncConfig,
}

/// Student login of a repository named `<assignment>-<student>`.
pub fn student_of<'a>(repo: &'a str, assignment: &str) -> Option<&'a str> {
    repo.strip_prefix(assignment)
        .and_then(|rest| rest.strip_prefix('-'))
        .filter(|student| !student.is_empty())
}

impl ClassroomSync {
    pub fn new(client: ClassroomClient, config: SyncConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
        }
    }

    pub fn client(&self) -> &ClassroomClient {
        &self.client
    }

    /// Names of the organization's repositories that belong to the configured
    /// assignment (all of them when no assignment is set).
    pub async fn repo_names(&self) -> Vec<String> {
        let repos = self.client.list_all_org_repos().await;
        tracing::info!("Found {} repositories in {}", repos.len(), self.client.org());

        repos
            .iter()
            .filter_map(|r| r.get("name").and_then(Value::as_str))
            .filter(|name| match &self.config.assignment {
                Some(assignment) => student_of(name, assignment).is_some(),
                None => true,
            })
            .map(str::to_string)
            .collect()
    }

    pub async fn run(&self) -> ClassroomReport {
        let names = self.repo_names().await;
        tracing::info!("Collecting data for {} repositories", names.len());

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));

        let pb = ProgressBar::new(names.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let snapshot_futures = names.iter().map(|name| {
            let sem = semaphore.clone();
            let pb = pb.clone();
            async move {
                // the semaphore is never closed
                let _permit = sem.acquire().await.ok();
                let snapshot = self.snapshot(name).await;
                pb.inc(1);
                snapshot
            }
        });

        let repositories = join_all(snapshot_futures).await;
        pb.finish_with_message("Collected all repositories");

        ClassroomReport {
            org: self.client.org().to_string(),
            assignment: self.config.assignment.clone(),
            generated_at: Utc::now(),
            request_count: self.client.request_count(),
            repositories,
        }
    }

    /// Gathers everything for one repository. Never fails; missing pieces
    /// show up as empty fields.
    pub async fn snapshot(&self, name: &str) -> RepoSnapshot {
        let client = &self.client;
        let student = self
            .config
            .assignment
            .as_deref()
            .and_then(|assignment| student_of(name, assignment))
            .map(str::to_string);
        let language_key = self.config.assignment.as_deref().unwrap_or(name);

        let (repo, branches, contributors, languages, commits) = tokio::join!(
            client.get_repo(name),
            client.get_branches(name),
            client.get_contributors(name),
            client.get_languages(name, language_key),
            client.get_commits(name, self.config.since),
        );

        let student_info = match &student {
            Some(login) => Some(client.get_user_info(login).await),
            None => None,
        };

        let ci = client.get_ci_info(name, None).await;

        let latest_jobs = match ci.as_ref().and_then(|info| info.latest_run()) {
            Some(run) if self.config.with_jobs => client.get_run_jobs(name, run.id).await,
            _ => Vec::new(),
        };

        tracing::debug!(
            "{}: {} branches, {} commits, ci: {}",
            name,
            branches.len(),
            commits.len(),
            ci.is_some()
        );

        RepoSnapshot {
            name: name.to_string(),
            repo,
            student,
            student_info,
            branches,
            contributors,
            languages,
            commits,
            ci,
            latest_jobs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::testing::{not_found, raw_repo, raw_run, StubTransport};
    use crate::github::Endpoint;
    use crate::models::UserInfo;
    use serde_json::json;

    fn classroom_stub() -> StubTransport {
        StubTransport::new(|endpoint, _| match endpoint {
            Endpoint::OrgRepos { .. } => Ok(json!([
                { "id": 1, "name": "hw1-alice" },
                { "id": 2, "name": "hw1-bob" },
                { "id": 3, "name": "course-site" }
            ])),
            Endpoint::Repo { .. } => Ok(raw_repo()),
            Endpoint::Branches { .. } => Ok(json!([{ "name": "main" }])),
            Endpoint::Contributors { .. } => Ok(json!([{ "login": "alice", "contributions": 4 }])),
            Endpoint::Languages { .. } => Ok(json!({ "Python": 100 })),
            Endpoint::Commits { .. } => Ok(json!([])),
            Endpoint::User { username } if username == "alice" => {
                Ok(json!({ "avatar_url": "https://avatars.example/u/5" }))
            }
            Endpoint::Workflows { repo, .. } if repo == "hw1-alice" => Ok(json!({
                "workflows": [{ "id": 8, "name": "GitHub Classroom Workflow", "path": ".github/workflows/classroom.yml" }]
            })),
            Endpoint::Workflows { .. } => Ok(json!({ "workflows": [] })),
            Endpoint::WorkflowRuns { .. } => Ok(json!({
                "workflow_runs": [
                    raw_run(31, "failure", "2024-03-01T10:00:00Z"),
                    raw_run(32, "success", "2024-03-03T10:00:00Z")
                ]
            })),
            Endpoint::RunJobs { run_id: 32, .. } => Ok(json!({
                "jobs": [{ "id": 1, "name": "build", "status": "completed", "steps": [] }]
            })),
            _ => Err(not_found(endpoint)),
        })
    }

    fn sync_config(assignment: Option<&str>) -> SyncConfig {
        SyncConfig {
            assignment: assignment.map(str::to_string),
            since: None,
            concurrency_limit: 1,
            with_jobs: true,
        }
    }

    #[test]
    fn test_student_of() {
        assert_eq!(student_of("hw1-alice", "hw1"), Some("alice"));
        assert_eq!(student_of("hw1-bob-smith", "hw1"), Some("bob-smith"));
        assert_eq!(student_of("hw1-", "hw1"), None);
        assert_eq!(student_of("hw10-alice", "hw1"), None);
        assert_eq!(student_of("course-site", "hw1"), None);
    }

    #[tokio::test]
    async fn test_run_collects_assignment_repos() {
        let stub = Arc::new(classroom_stub());
        let client = ClassroomClient::new(stub.clone(), "cs101").await;
        let sync = ClassroomSync::new(client, sync_config(Some("hw1")));

        let report = sync.run().await;

        assert_eq!(report.org, "cs101");
        let names: Vec<_> = report.repositories.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["hw1-alice", "hw1-bob"]);

        let alice = &report.repositories[0];
        assert_eq!(alice.student.as_deref(), Some("alice"));
        assert_eq!(
            alice.student_info.as_ref().and_then(|u| u.avatar_url()),
            Some("https://avatars.example/u/5")
        );
        assert_eq!(alice.languages, vec!["Python".to_string()]);
        assert_eq!(alice.ci.as_ref().map(|c| c.workflow_id), Some(8));
        assert_eq!(alice.latest_jobs.len(), 1);

        let bob = &report.repositories[1];
        assert_eq!(bob.student_info, Some(UserInfo::NotFound));
        assert!(bob.ci.is_none());
        assert!(bob.latest_jobs.is_empty());
        assert_eq!(bob.languages, alice.languages);

        // both repositories share the assignment's language cache entry
        assert_eq!(stub.count(|e| matches!(e, Endpoint::Languages { .. })), 1);
        assert_eq!(report.request_count, sync.client().request_count());
    }

    #[tokio::test]
    async fn test_without_assignment_keys_languages_by_repo() {
        let stub = Arc::new(classroom_stub());
        let client = ClassroomClient::new(stub.clone(), "cs101").await;
        let sync = ClassroomSync::new(client, sync_config(None));

        let report = sync.run().await;

        assert_eq!(report.repositories.len(), 3);
        assert!(report.repositories.iter().all(|r| r.student.is_none()));
        assert_eq!(stub.count(|e| matches!(e, Endpoint::Languages { .. })), 3);
        assert_eq!(stub.count(|e| matches!(e, Endpoint::User { .. })), 0);
    }
}
