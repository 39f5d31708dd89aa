use anyhow::{Context, Result};
use axum::{
    Router,
    http::HeaderValue,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::service::SearchService;

pub mod handlers;
pub mod models;

/// Router for the core search API.
pub fn create_router(service: Arc<SearchService>, cors: CorsLayer) -> Router {
    Router::new()
        .route(
            "/api/search",
            get(handlers::search_handler).post(handlers::create_item_handler),
        )
        .route(
            "/api/search/:id",
            get(handlers::get_item_handler)
                .put(handlers::update_item_handler)
                .delete(handlers::delete_item_handler),
        )
        .route("/api/health", get(handlers::health_handler))
        .with_state(service)
        .layer(cors)
}

/// CORS layer shared by both layers. Without an explicit origin any origin is allowed.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match allowed_origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid ALLOWED_ORIGIN value: {origin}"))?;
            Ok(cors.allow_origin(origin))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}
