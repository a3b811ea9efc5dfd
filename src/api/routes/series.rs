//! Historical time-series endpoints: history, roi, liquidity, providers.
//!
//! All four share one shape: check the token exists, then resolve the
//! `start`/`end` window, read the collection and project each document.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use log::debug;
use serde_json::Value;

use super::require_token;
use crate::api::{error::ApiError, params::RangeParams, AppState};
use crate::db::Collection;

type RangeQuery = Result<Query<RangeParams>, QueryRejection>;

async fn read_series(
    state: &AppState,
    collection: Collection,
    id: &str,
    query: RangeQuery,
) -> Result<Json<Vec<Value>>, ApiError> {
    let token = require_token(state, id).await?;

    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let range = params.resolve(Utc::now(), state.api.default_range_days)?;

    let records = state.store.find_series(collection, &token.symbol, &range).await?;
    debug!(
        "{} {}: {} records in {}..={}",
        collection.name(),
        token.symbol,
        records.len(),
        range.start,
        range.end
    );

    let projection = collection.projection();
    Ok(Json(
        records.into_iter().map(|r| r.into_document(projection)).collect(),
    ))
}

/// GET /api/v1/history/:token
async fn history(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    query: RangeQuery,
) -> Result<Json<Vec<Value>>, ApiError> {
    read_series(&state, Collection::History, &token, query).await
}

/// GET /api/v1/roi/:token
async fn roi(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    query: RangeQuery,
) -> Result<Json<Vec<Value>>, ApiError> {
    read_series(&state, Collection::Roi, &token, query).await
}

/// GET /api/v1/liquidity/:token
async fn liquidity(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    query: RangeQuery,
) -> Result<Json<Vec<Value>>, ApiError> {
    read_series(&state, Collection::Liquidity, &token, query).await
}

/// GET /api/v1/providers/:token
async fn providers(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    query: RangeQuery,
) -> Result<Json<Vec<Value>>, ApiError> {
    read_series(&state, Collection::Providers, &token, query).await
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/history/:token", get(history))
        .route("/roi/:token", get(roi))
        .route("/liquidity/:token", get(liquidity))
        .route("/providers/:token", get(providers))
}
