//! # Search Client
//!
//! Typed wrapper over the AI search endpoint.

use crate::model::Course;
use serde_json::json;
use std::sync::Arc;
use store_sync::{FetchRequest, ResourceFetcher, ResourceResult};
use tracing::{debug, instrument};

pub const SEARCH_PATH: &str = "/api/ai/search";
pub const SEARCH_FAILED: &str = "Search failed";

/// Client for the course search endpoint.
#[derive(Clone)]
pub struct SearchClient {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl SearchClient {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self { fetcher }
    }

    /// Runs one search. The backend answers with a bare course array; entries
    /// that are not courses are skipped.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> ResourceResult<Vec<Course>> {
        debug!("Sending request");
        let request = FetchRequest::post(SEARCH_PATH, json!({ "input": query }))
            .fallback_message(SEARCH_FAILED);
        self.fetcher.fetch(request).await.decode_each()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_sync::mock::MockFetcher;

    #[tokio::test]
    async fn test_search_posts_input() {
        let mut mock = MockFetcher::new();
        mock.expect_post(SEARCH_PATH)
            .return_ok(json!([{"_id": "1", "title": "Intro to AI", "category": "AI"}]));

        let client = SearchClient::new(mock.fetcher());
        let result = client.search("AI").await;

        let courses = result.into_result().unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].title, "Intro to AI");
        assert_eq!(mock.calls()[0].body, Some(json!({"input": "AI"})));
        assert_eq!(mock.calls()[0].fallback_message, SEARCH_FAILED);
        mock.verify();
    }

    #[tokio::test]
    async fn test_search_rejects_non_list_body() {
        let mut mock = MockFetcher::new();
        mock.expect_post(SEARCH_PATH)
            .return_ok(json!({"message": "unexpected"}));

        let result = SearchClient::new(mock.fetcher()).search("AI").await;
        assert_eq!(result.error_message(), Some(store_sync::MALFORMED_RESPONSE));
    }
}
