//! In-memory transport for exercising the client without a network.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::github::endpoint::{Endpoint, Query};
use crate::github::transport::{ApiResponse, Transport};

type Handler = Box<dyn Fn(&Endpoint, &Query) -> Result<Value> + Send + Sync>;

pub struct StubTransport {
    handler: Handler,
    requests: Mutex<Vec<(Endpoint, Query)>>,
}

impl StubTransport {
    pub fn new(handler: impl Fn(&Endpoint, &Query) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A transport on which every request fails.
    pub fn failing() -> Self {
        Self::new(|endpoint, _| Err(server_error(endpoint)))
    }

    pub fn requests(&self) -> Vec<(Endpoint, Query)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Endpoint) -> bool) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| matches(e))
            .count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn request(&self, endpoint: &Endpoint, query: &Query) -> Result<ApiResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.clone(), query.clone()));
        (self.handler)(endpoint, query).map(ApiResponse::new)
    }
}

pub fn server_error(endpoint: &Endpoint) -> Error {
    Error::GitHubApi(format!("500 {}: boom", endpoint.template()))
}

pub fn not_found(endpoint: &Endpoint) -> Error {
    Error::NotFound(endpoint.path())
}

pub fn query_value<'q>(query: &'q Query, name: &str) -> Option<&'q str> {
    query
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.as_str())
}

pub fn page_of(query: &Query) -> u32 {
    query_value(query, "page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
}

pub fn repo_records(count: usize, offset: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| json!({ "id": offset + i, "name": format!("repo-{}", offset + i) }))
            .collect(),
    )
}

pub fn raw_repo() -> Value {
    json!({
        "id": 1296269,
        "node_id": "MDEwOlJlcG9zaXRvcnkxMjk2MjY5",
        "name": "hw1-alice",
        "full_name": "cs101/hw1-alice",
        "private": true,
        "description": "Homework 1",
        "fork": false,
        "default_branch": "main",
        "html_url": "https://github.com/cs101/hw1-alice",
        "pushed_at": "2024-03-01T10:00:00Z",
        "created_at": "2024-02-01T09:00:00Z",
        "updated_at": "2024-03-01T10:05:00Z",
        "size": 108,
        "owner": {
            "login": "cs101",
            "id": 1,
            "avatar_url": "https://avatars.example/u/1",
            "html_url": "https://github.com/cs101",
            "type": "Organization",
            "site_admin": false
        },
        "permissions": { "admin": true, "push": true, "pull": true }
    })
}

pub fn raw_run(id: u64, conclusion: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "name": "GitHub Classroom Workflow",
        "path": ".github/workflows/classroom.yml",
        "event": "push",
        "head_branch": "main",
        "head_sha": "acb5820ced9479c074f688cc328bf03f341a511d",
        "conclusion": conclusion,
        "status": "completed",
        "check_suite_id": id * 10,
        "html_url": format!("https://github.com/cs101/hw1-alice/actions/runs/{}", id),
        "run_started_at": created_at,
        "updated_at": created_at,
        "created_at": created_at,
        "run_attempt": 1,
        "triggering_actor": { "login": "alice", "id": 5 },
        "actor": { "login": "alice", "id": 5 }
    })
}
