use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::cache::{LanguageCache, UserCache};
use crate::github::endpoint::{Endpoint, Query};
use crate::github::facade::ApiFacade;
use crate::github::http::HttpTransport;
use crate::github::paginator::{Paginator, MAX_PER_PAGE};
use crate::github::rate_limit::RateLimitStatus;
use crate::github::transport::{ApiResponse, Transport};
use crate::models::{
    AuthenticatedUser, CommitRecord, Job, JobList, RepoSummary, UserAvatar, UserInfo,
    WorkflowRun, WorkflowRunList,
};

/// GitHub client scoped to one organization.
///
/// Every public method except construction is total: remote failures are
/// logged and turned into an empty value (`Vec::new()`, `None` or
/// [`UserInfo::NotFound`]) so a bad repository never aborts a larger run.
pub struct ClassroomClient {
    api: ApiFacade,
    org: String,
    users: UserCache,
    languages: LanguageCache,
}

impl ClassroomClient {
    /// Builds the HTTP transport from `config` and connects. Failing to build
    /// the transport is the only error surfaced here.
    pub async fn connect(config: &Config, org: &str) -> Result<Self> {
        let transport = HttpTransport::new(&config.github_token, &config.api_url)?;
        Ok(Self::new(Arc::new(transport), org).await)
    }

    /// Wraps `transport` and checks the credential once. A failed check is
    /// logged and otherwise ignored.
    pub async fn new(transport: Arc<dyn Transport>, org: impl Into<String>) -> Self {
        let client = Self {
            api: ApiFacade::new(transport),
            org: org.into(),
            users: UserCache::new(),
            languages: LanguageCache::new(),
        };
        client.verify_credentials().await;
        client
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    /// Number of remote calls issued so far.
    pub fn request_count(&self) -> usize {
        self.api.count()
    }

    async fn verify_credentials(&self) {
        match self.fetch_authenticated().await {
            Ok((login, rate)) => {
                tracing::info!(
                    "Authenticated as {} (x-ratelimit-remaining: {})",
                    login,
                    rate.remaining
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "unknown".to_string())
                );
            }
            Err(e) => tracing::warn!("Credential check failed: {}", e),
        }
    }

    async fn fetch_authenticated(&self) -> Result<(String, RateLimitStatus)> {
        let response = self.send(Endpoint::AuthenticatedUser, Vec::new()).await?;
        let rate = RateLimitStatus::from_headers(&response.headers);
        let user: AuthenticatedUser = serde_json::from_value(response.data)?;
        Ok((user.login, rate))
    }

    /// Login of the token's owner.
    pub async fn authenticated_login(&self) -> Option<String> {
        match self.fetch_authenticated().await {
            Ok((login, _)) => Some(login),
            Err(e) => {
                tracing::warn!("Fetching authenticated user failed: {}", e);
                None
            }
        }
    }

    async fn send(&self, endpoint: Endpoint, query: Query) -> Result<ApiResponse> {
        self.api.call().request(&endpoint, &query).await
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint, query: Query) -> Result<T> {
        let response = self.send(endpoint, query).await?;
        Ok(serde_json::from_value(response.data)?)
    }

    /// Like [`fetch`](Self::fetch) for list resources; an empty body is an empty list.
    async fn fetch_list<T: DeserializeOwned>(&self, endpoint: Endpoint, query: Query) -> Result<Vec<T>> {
        let response = self.send(endpoint, query).await?;
        if response.data.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(response.data)?)
    }

    fn repo_endpoint(&self, repo: &str, make: fn(String, String) -> Endpoint) -> Endpoint {
        make(self.org.clone(), repo.to_string())
    }

    /// Raw repository records of the organization, starting at `page` and
    /// following full pages. A failing page ends the walk; records from the
    /// pages before it are still returned.
    pub async fn list_org_repos(&self, page: u32) -> Vec<Value> {
        let endpoint = Endpoint::OrgRepos {
            org: self.org.clone(),
        };
        let paged = Paginator::new(&self.api)
            .fetch_all(&endpoint, MAX_PER_PAGE, page)
            .await;

        if let Some(e) = paged.error {
            tracing::warn!(
                "Fetching repos of {} failed after {} page(s): {}",
                self.org,
                paged.pages_fetched,
                e
            );
        }
        paged.items
    }

    pub async fn list_all_org_repos(&self) -> Vec<Value> {
        self.list_org_repos(1).await
    }

    pub async fn get_repo(&self, repo: &str) -> Option<RepoSummary> {
        let endpoint = self.repo_endpoint(repo, |owner, repo| Endpoint::Repo { owner, repo });
        match self.fetch(endpoint, Vec::new()).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("Fetching repo {} failed: {}", repo, e);
                None
            }
        }
    }

    pub async fn get_branches(&self, repo: &str) -> Vec<Value> {
        let endpoint = self.repo_endpoint(repo, |owner, repo| Endpoint::Branches { owner, repo });
        self.fetch_list(endpoint, Vec::new())
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("get_branches: {} in {}", e, repo);
                Vec::new()
            })
    }

    pub async fn get_contributors(&self, repo: &str) -> Vec<Value> {
        let endpoint =
            self.repo_endpoint(repo, |owner, repo| Endpoint::Contributors { owner, repo });
        self.fetch_list(endpoint, Vec::new())
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("get_contributors: {} in {}", e, repo);
                Vec::new()
            })
    }

    /// Language names of `repo`, most used first.
    ///
    /// Cached under `cache_key`, not the repository name: every repository
    /// asked for with the same key gets the languages of the first one that
    /// was fetched successfully.
    pub async fn get_languages(&self, repo: &str, cache_key: &str) -> Vec<String> {
        let key = cache_key.to_string();
        if let Some(languages) = self.languages.get(&key).await {
            return languages;
        }

        let endpoint = self.repo_endpoint(repo, |owner, repo| Endpoint::Languages { owner, repo });
        match self.fetch::<Map<String, Value>>(endpoint, Vec::new()).await {
            Ok(bytes_by_language) => {
                let languages = bytes_by_language.keys().cloned().collect();
                self.languages.insert(key, languages).await
            }
            Err(e) => {
                tracing::warn!("get_languages: {} in {}", e, repo);
                Vec::new()
            }
        }
    }

    /// One page (up to 100) of commits on the default branch, newest first.
    pub async fn get_commits(&self, repo: &str, since: Option<DateTime<Utc>>) -> Vec<CommitRecord> {
        let endpoint = self.repo_endpoint(repo, |owner, repo| Endpoint::Commits { owner, repo });
        let mut query: Query = vec![("per_page", MAX_PER_PAGE.to_string())];
        if let Some(since) = since {
            query.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }

        self.fetch_list(endpoint, query).await.unwrap_or_else(|e| {
            tracing::warn!("get_commits: {} in {}", e, repo);
            Vec::new()
        })
    }

    /// Avatar of `username`. Looked up remotely at most once per client;
    /// a failed lookup is remembered as [`UserInfo::NotFound`].
    pub async fn get_user_info(&self, username: &str) -> UserInfo {
        let key = username.to_string();
        if let Some(info) = self.users.get(&key).await {
            return info;
        }

        let endpoint = Endpoint::User {
            username: username.to_string(),
        };
        let info = match self.fetch::<UserAvatar>(endpoint, Vec::new()).await {
            Ok(avatar) => UserInfo::Found(avatar),
            Err(Error::NotFound(_)) => {
                tracing::warn!("NotFound account: {}", username);
                UserInfo::NotFound
            }
            Err(e) => {
                tracing::warn!("Looking up account {} failed: {}", username, e);
                UserInfo::NotFound
            }
        };
        self.users.insert(key, info).await
    }

    pub async fn get_workflow_runs(&self, repo: &str, workflow_id: u64) -> Vec<WorkflowRun> {
        let endpoint = Endpoint::WorkflowRuns {
            owner: self.org.clone(),
            repo: repo.to_string(),
            workflow_id,
        };
        match self.fetch::<WorkflowRunList>(endpoint, Vec::new()).await {
            Ok(list) => list.workflow_runs,
            Err(e) => {
                tracing::warn!("get_workflow_runs: {} in {} {}", e, repo, workflow_id);
                Vec::new()
            }
        }
    }

    pub async fn get_run_jobs(&self, repo: &str, run_id: u64) -> Vec<Job> {
        let endpoint = Endpoint::RunJobs {
            owner: self.org.clone(),
            repo: repo.to_string(),
            run_id,
        };
        match self.fetch::<JobList>(endpoint, Vec::new()).await {
            Ok(list) => list.jobs,
            Err(e) => {
                tracing::warn!("get_run_jobs: {} in {}, {}", e, repo, run_id);
                Vec::new()
            }
        }
    }
}
