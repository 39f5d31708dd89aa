use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

pub mod client;
pub mod handlers;
pub mod models;
pub mod service;

use service::BffService;

/// Router for the edge layer. With `static_dir` set, unmatched paths serve the built frontend.
pub fn create_router(service: Arc<BffService>, cors: CorsLayer, static_dir: Option<&str>) -> Router {
    let router = Router::new()
        .route("/search", get(handlers::search_handler))
        .route("/search/:id", get(handlers::get_item_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(service);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(cors)
}
