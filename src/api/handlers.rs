use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

use crate::error::SearchResult;
use crate::query::SearchQuery;
use crate::service::SearchService;

use super::models::{HealthResponse, SearchItemDto, SearchParams, SearchResultDto};

pub async fn search_handler(
    State(service): State<Arc<SearchService>>,
    Query(params): Query<SearchParams>,
) -> SearchResult<Json<SearchResultDto>> {
    let start = Instant::now();

    let query = SearchQuery::parse(
        params.query.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
    )?;
    let window = query.page_request();

    let result = service
        .search(&query.text, window.page, window.page_size)
        .await?;

    tracing::info!(
        query = %query.text,
        page = query.page,
        total = result.total_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search served"
    );

    Ok(Json(result))
}

pub async fn get_item_handler(
    State(service): State<Arc<SearchService>>,
    Path(id): Path<String>,
) -> SearchResult<Json<SearchItemDto>> {
    Ok(Json(service.get_by_id(&id).await?))
}

pub async fn create_item_handler(
    State(service): State<Arc<SearchService>>,
    Json(item): Json<SearchItemDto>,
) -> SearchResult<impl IntoResponse> {
    let created = service.create(item).await?;
    let location = format!("/api/search/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

pub async fn update_item_handler(
    State(service): State<Arc<SearchService>>,
    Path(id): Path<String>,
    Json(item): Json<SearchItemDto>,
) -> SearchResult<Json<SearchItemDto>> {
    Ok(Json(service.update(&id, item).await?))
}

pub async fn delete_item_handler(
    State(service): State<Arc<SearchService>>,
    Path(id): Path<String>,
) -> SearchResult<StatusCode> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Healthy".to_string(),
        timestamp: Utc::now(),
    })
}
