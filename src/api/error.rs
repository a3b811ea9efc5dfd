use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

use crate::onchain::OnChainError;

/// Errors surfaced by request handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Token {0} not found")]
    TokenNotFound(String),

    #[error("Token {0} has no registered converter")]
    NoConverter(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("On-chain read failed: {0}")]
    OnChain(#[from] OnChainError),

    #[error("Internal server error")]
    Store(#[from] anyhow::Error),

    #[error("Analytics store unavailable")]
    Unavailable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::TokenNotFound(_) | ApiError::NoConverter(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::OnChain(_) => StatusCode::BAD_GATEWAY,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            // Store details stay in the log, not in the response body
            ApiError::Store(e) => error!("Store query failed: {:#}", e),
            ApiError::OnChain(e) => warn!("On-chain read failed: {}", e),
            _ => {},
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
