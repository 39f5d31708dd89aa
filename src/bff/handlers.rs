use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use std::sync::Arc;

use crate::error::SearchResult;
use crate::query::SearchQuery;

use super::models::{HealthResponse, SearchParams, SearchResponse, SearchResultItem};
use super::service::BffService;

pub async fn search_handler(
    State(service): State<Arc<BffService>>,
    Query(params): Query<SearchParams>,
) -> SearchResult<Json<SearchResponse>> {
    let query = SearchQuery::parse(
        params.q.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
    )?;

    Ok(Json(service.search(&query).await?))
}

pub async fn get_item_handler(
    State(service): State<Arc<BffService>>,
    Path(id): Path<String>,
) -> SearchResult<Json<SearchResultItem>> {
    Ok(Json(service.get_by_id(&id).await?))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}
