use std::sync::Arc;

use crate::api::models::{SearchItemDto, SearchResultDto};
use crate::error::{SearchError, SearchResult};
use crate::query::PageRequest;
use crate::repository::SearchRepository;

/// Core search layer: validates, queries the store and maps entities to DTOs.
pub struct SearchService {
    repo: Arc<dyn SearchRepository>,
}

impl SearchService {
    pub fn new(repo: Arc<dyn SearchRepository>) -> Self {
        Self { repo }
    }

    pub async fn search(&self, query: &str, page: u32, page_size: u32) -> SearchResult<SearchResultDto> {
        // Guarded independently of the HTTP layer.
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::validation("Query cannot be empty"));
        }
        if page < 1 {
            return Err(SearchError::validation("Page must be greater than 0"));
        }

        let window = PageRequest::new(page, page_size);
        let (items, total_count) =
            tokio::try_join!(self.repo.search(query, window), self.repo.count(query))
                .map_err(|e| SearchError::upstream(&format!("Failed to search items for {query:?}"), e))?;

        tracing::debug!(query, page, total_count, returned = items.len(), "search completed");

        Ok(SearchResultDto {
            items: items.into_iter().map(SearchItemDto::from).collect(),
            total_count,
            current_page: page,
        })
    }

    pub async fn get_by_id(&self, id: &str) -> SearchResult<SearchItemDto> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| SearchError::upstream("Failed to load item", e))?
            .map(SearchItemDto::from)
            .ok_or(SearchError::NotFound)
    }

    pub async fn create(&self, mut dto: SearchItemDto) -> SearchResult<SearchItemDto> {
        if dto.title.trim().is_empty() {
            return Err(SearchError::validation("Title is required"));
        }
        if dto.id.trim().is_empty() {
            dto.id = nanoid::nanoid!();
        }

        let created = self
            .repo
            .create(dto.into_entity())
            .await
            .map_err(|e| SearchError::upstream("Failed to create item", e))?;

        tracing::info!(id = %created.id, "created search item");
        Ok(created.into())
    }

    pub async fn update(&self, id: &str, mut dto: SearchItemDto) -> SearchResult<SearchItemDto> {
        if dto.title.trim().is_empty() {
            return Err(SearchError::validation("Title is required"));
        }
        dto.id = id.to_string();

        self.repo
            .update(dto.into_entity())
            .await
            .map_err(|e| SearchError::upstream("Failed to update item", e))?
            .map(SearchItemDto::from)
            .ok_or(SearchError::NotFound)
    }

    pub async fn delete(&self, id: &str) -> SearchResult<()> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| SearchError::upstream("Failed to delete item", e))?;

        if deleted {
            tracing::info!(id, "deleted search item");
            Ok(())
        } else {
            Err(SearchError::NotFound)
        }
    }
}
