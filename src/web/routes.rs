use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

// Generation endpoints, served both at the root and under /v1
fn generation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate_sql", post(handlers::api::generate_sql))
        .route("/analyze", post(handlers::api::analyze))
}

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(generation_routes())
        .nest("/v1", generation_routes())
        .route("/health", get(handlers::api::health))
}
