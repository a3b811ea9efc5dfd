//! Liveness endpoints.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use log::warn;
use serde_json::{json, Value};

use crate::api::{error::ApiError, AppState};

async fn hello() -> Json<&'static str> {
    Json("Hello world!")
}

/// GET /api/v1/health
///
/// Answers 503 when the analytics store is unreachable.
async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    state.store.ping().await.map_err(|e| {
        warn!("Health check failed: {:#}", e);
        ApiError::Unavailable
    })?;

    Ok(Json(json!({ "status": "ok" })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hello", get(hello))
        .route("/health", get(health))
}
