use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::github::endpoint::{Endpoint, Query};
use crate::github::rate_limit::RateLimitStatus;
use crate::github::transport::{ApiResponse, Transport};

/// [`Transport`] over the GitHub REST API using a token-authenticated reqwest client.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("classroomsync/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, endpoint: &Endpoint, query: &Query) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        tracing::debug!("{} {:?}", endpoint, query);

        let response = self
            .client
            .request(endpoint.method(), &url)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let rate = RateLimitStatus::from_headers(&headers);
            if rate.is_exhausted()
                && (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
            {
                let now = chrono::Utc::now().timestamp().max(0) as u64;
                return Err(Error::RateLimited(rate.seconds_until_reset(now)));
            }

            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(endpoint.path()));
            }

            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "{} {}: {}",
                status.as_u16(),
                endpoint.template(),
                body
            )));
        }

        // 204 No Content (e.g. contributors of an empty repository)
        let text = response.text().await?;
        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ApiResponse { data, headers })
    }
}
