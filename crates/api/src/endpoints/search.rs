//! Typed call for the global `/search` endpoint.

use portal_client::HttpClient;
use portal_core::{ApiError, ApiResult};
use portal_models::search::{SearchQuery, SearchResults};

/// ```text
/// GET    /search/?q=..&types=..&limit=..   -> search
/// ```
#[derive(Debug, Clone)]
pub struct SearchApi {
    client: HttpClient,
}

impl SearchApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Search across projects, tasks, volunteers and posts. A blank query is
    /// rejected without calling the backend.
    pub async fn search(&self, query: &SearchQuery) -> ApiResult<SearchResults> {
        if query.q.trim().is_empty() {
            return Err(ApiError::validation("search query must not be empty"));
        }
        self.client.get_query("/search/", query).await
    }
}
