//! Token registry endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::require_token;
use crate::api::{error::ApiError, AppState};
use crate::db::Token;

/// GET /api/v1/tokens
async fn list_tokens(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Token>>, ApiError> {
    Ok(Json(state.store.list_tokens().await?))
}

/// GET /api/v1/tokens/:token
async fn get_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<Token>, ApiError> {
    Ok(Json(require_token(&state, &token).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tokens", get(list_tokens))
        .route("/tokens/:token", get(get_token))
}
