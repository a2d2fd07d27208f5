use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::github::endpoint::Endpoint;
use crate::github::facade::ApiFacade;

/// Maximum page size GitHub accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Records gathered by a pagination run, plus the error that cut it short.
#[derive(Debug)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    pub error: Option<Error>,
}

pub struct Paginator<'a> {
    api: &'a ApiFacade,
}

impl<'a> Paginator<'a> {
    pub fn new(api: &'a ApiFacade) -> Self {
        Self { api }
    }

    /// Fetches `start_page`, then each following page for as long as the
    /// previous one came back full. Pages are requested one at a time.
    ///
    /// A remote that keeps returning exactly `per_page` records keeps this
    /// going; a final page of exactly `per_page` records costs one extra
    /// request which comes back empty. A `per_page` of zero is treated as one.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        per_page: u32,
        start_page: u32,
    ) -> Paged<T> {
        let mut items = Vec::new();
        let mut pages_fetched = 0;
        let mut page = start_page.max(1);
        let per_page = per_page.max(1);

        loop {
            match self.fetch_page::<T>(endpoint, per_page, page).await {
                Ok(batch) => {
                    let batch_len = batch.len();
                    items.extend(batch);
                    pages_fetched += 1;

                    if batch_len != per_page as usize {
                        break;
                    }
                    page += 1;
                }
                Err(e) => {
                    return Paged {
                        items,
                        pages_fetched,
                        error: Some(e),
                    };
                }
            }
        }

        Paged {
            items,
            pages_fetched,
            error: None,
        }
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<T>> {
        tracing::debug!("Fetching {} page {}", endpoint, page);
        let query = vec![("per_page", per_page.to_string()), ("page", page.to_string())];
        let response = self.api.call().request(endpoint, &query).await?;
        Ok(serde_json::from_value(response.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::testing::{page_of, repo_records, server_error, StubTransport};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn org_repos() -> Endpoint {
        Endpoint::OrgRepos {
            org: "cs101".to_string(),
        }
    }

    #[tokio::test]
    async fn test_zero_page_size_stops_on_empty_page() {
        let stub = Arc::new(StubTransport::new(|_, query| {
            assert_eq!(query[0], ("per_page", "1".to_string()));
            Ok(json!([]))
        }));
        let api = ApiFacade::new(stub.clone());

        let paged: Paged<Value> = Paginator::new(&api).fetch_all(&org_repos(), 0, 1).await;

        assert!(paged.items.is_empty());
        assert_eq!(paged.pages_fetched, 1);
        assert!(paged.error.is_none());
        assert_eq!(stub.requests().len(), 1);
        assert_eq!(api.count(), 1);
    }

    #[tokio::test]
    async fn test_failure_reports_pages_fetched() {
        let stub = Arc::new(StubTransport::new(|endpoint, query| match page_of(query) {
            1 => Ok(repo_records(2, 0)),
            _ => Err(server_error(endpoint)),
        }));
        let api = ApiFacade::new(stub);

        let paged: Paged<Value> = Paginator::new(&api).fetch_all(&org_repos(), 2, 0).await;

        assert_eq!(paged.items.len(), 2);
        assert_eq!(paged.pages_fetched, 1);
        assert!(matches!(paged.error, Some(Error::GitHubApi(_))));
    }
}
