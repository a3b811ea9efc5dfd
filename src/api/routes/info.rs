//! Live on-chain market data.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::require_token;
use crate::api::{error::ApiError, AppState};
use crate::onchain::{reader::parse_address, TokenInfo};

/// GET /api/v1/info/:token
///
/// Price in BNT and USD plus trailing 24h volume, read straight from the
/// token's converter.
async fn info(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TokenInfo>, ApiError> {
    let token = require_token(&state, &id).await?;

    let converter = token
        .converter
        .as_deref()
        .ok_or_else(|| ApiError::NoConverter(token.symbol.clone()))?;
    let converter = parse_address(converter)?;

    let info = state.aggregator.token_info(&token.symbol, converter).await?;
    Ok(Json(info))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/info/:token", get(info))
}
