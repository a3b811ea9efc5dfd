//! API routes, mounted under `/api/v1`.

pub mod health;
pub mod info;
pub mod series;
pub mod tokens;

use std::sync::Arc;

use axum::Router;

use crate::api::{error::ApiError, AppState};
use crate::db::Token;

/// Build the API router with all routes.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(tokens::router())
        .merge(series::router())
        .merge(info::router())
}

/// Resolve a request's token identifier against the registry.
pub(crate) async fn require_token(state: &AppState, id: &str) -> Result<Token, ApiError> {
    state
        .store
        .find_token(id)
        .await?
        .ok_or_else(|| ApiError::TokenNotFound(id.to_string()))
}
