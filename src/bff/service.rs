use std::sync::Arc;

use crate::error::{SearchError, SearchResult};
use crate::query::SearchQuery;

use super::client::SearchUpstream;
use super::models::{SearchResponse, SearchResultItem, shape_response};

pub struct BffService {
    upstream: Arc<dyn SearchUpstream>,
}

impl BffService {
    pub fn new(upstream: Arc<dyn SearchUpstream>) -> Self {
        Self { upstream }
    }

    pub async fn search(&self, query: &SearchQuery) -> SearchResult<SearchResponse> {
        tracing::info!(
            "Processing search request: query={:?}, page={}",
            query.text,
            query.page
        );

        let raw = self
            .upstream
            .search(&query.text, query.page, query.limit)
            .await
            .map_err(|e| SearchError::upstream("Failed to search backend", e))?;

        Ok(shape_response(raw, query.page_request().page_size))
    }

    pub async fn get_by_id(&self, id: &str) -> SearchResult<SearchResultItem> {
        self.upstream
            .get_by_id(id)
            .await
            .map_err(|e| SearchError::upstream("Failed to fetch item from backend", e))?
            .map(SearchResultItem::from)
            .ok_or(SearchError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bff::models::{BackendSearchItem, BackendSearchResponse};
    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingUpstream {
        calls: Mutex<Vec<(String, u32, Option<u32>)>>,
        fail: bool,
    }

    #[async_trait]
    impl SearchUpstream for RecordingUpstream {
        async fn search(
            &self,
            query: &str,
            page: u32,
            limit: Option<u32>,
        ) -> Result<BackendSearchResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), page, limit));
            if self.fail {
                bail!("timeout of 5000ms exceeded");
            }
            Ok(BackendSearchResponse {
                items: vec![BackendSearchItem {
                    id: "1".into(),
                    title: "Test Title".into(),
                    content: "Test Content".into(),
                    link: "https://example.com".into(),
                    score: None,
                }],
                total_count: 1,
                current_page: page,
            })
        }

        async fn get_by_id(&self, id: &str) -> Result<Option<BackendSearchItem>> {
            Ok((id == "1").then(|| BackendSearchItem {
                id: "1".into(),
                title: "Test Title".into(),
                content: "Test Content".into(),
                link: "https://example.com".into(),
                score: None,
            }))
        }
    }

    #[tokio::test]
    async fn test_forwards_query_and_reshapes() {
        let upstream = Arc::new(RecordingUpstream::default());
        let service = BffService::new(upstream.clone());

        let query = SearchQuery::parse(Some("test query"), Some("2"), None).unwrap();
        let response = service.search(&query).await.unwrap();

        assert_eq!(
            *upstream.calls.lock().unwrap(),
            vec![("test query".to_string(), 2, None)]
        );
        assert_eq!(response.page, 2);
        assert_eq!(response.total, 1);
        assert_eq!(response.results[0].description, "Test Content");
        assert_eq!(response.results[0].url, "https://example.com");
    }

    #[tokio::test]
    async fn test_upstream_failure_adds_context() {
        let upstream = Arc::new(RecordingUpstream {
            fail: true,
            ..Default::default()
        });
        let service = BffService::new(upstream);

        let query = SearchQuery::parse(Some("test"), None, None).unwrap();
        match service.search(&query).await {
            Err(SearchError::Upstream(detail)) => {
                assert_eq!(detail, "Failed to search backend: timeout of 5000ms exceeded")
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_maps_missing_to_not_found() {
        let service = BffService::new(Arc::new(RecordingUpstream::default()));
        assert_eq!(service.get_by_id("1").await.unwrap().title, "Test Title");
        assert!(matches!(
            service.get_by_id("2").await,
            Err(SearchError::NotFound)
        ));
    }
}
