use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// One item as the core API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSearchItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub link: String,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendSearchResponse {
    pub items: Vec<BackendSearchItem>,
    pub total_count: u64,
    pub current_page: u32,
}

/// One item as the frontend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultItem>,
    pub total: u64,
    pub page: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl From<BackendSearchItem> for SearchResultItem {
    fn from(item: BackendSearchItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.content,
            url: item.link,
            score: item.score,
        }
    }
}

impl From<BackendSearchResponse> for SearchResponse {
    fn from(response: BackendSearchResponse) -> Self {
        Self {
            results: response.items.into_iter().map(Into::into).collect(),
            total: response.total_count,
            page: response.current_page,
        }
    }
}

/// Renames the backend payload and caps it at `page_size` items, keeping order.
pub fn shape_response(raw: BackendSearchResponse, page_size: u32) -> SearchResponse {
    let mut shaped = SearchResponse::from(raw);
    shaped.results.truncate(page_size as usize);
    shaped
}
