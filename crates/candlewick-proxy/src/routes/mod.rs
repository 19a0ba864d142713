pub mod chart;
pub mod relay;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Chart proxy: `/api/yahoo-finance` plus `/health`.
pub fn chart_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(chart::routes())
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Generic relay: `/proxy/*` plus `/health`.
pub fn relay_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(relay::routes())
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
