use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::Result;
use crate::github::endpoint::{Endpoint, Query};

/// Body and headers of a successful remote call.
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    pub data: Value,
    pub headers: HeaderMap,
}

impl ApiResponse {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            headers: HeaderMap::new(),
        }
    }
}

/// The authenticated request capability the client is built on.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, endpoint: &Endpoint, query: &Query) -> Result<ApiResponse>;
}
