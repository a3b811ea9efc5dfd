//! HTTP surface of the service.
//!
//! - [`routes`] - handlers, one module per resource
//! - [`params`] - time-range query arguments
//! - [`error`] - [`ApiError`] and its JSON rendering

pub mod error;
pub mod params;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response, Router};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiSettings;
use crate::db::AnalyticsStore;
use crate::onchain::Aggregator;

pub use error::ApiError;

/// Application state shared across all request handlers.
pub struct AppState {
    pub store: Arc<dyn AnalyticsStore>,
    pub aggregator: Aggregator,
    pub api: ApiSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn AnalyticsStore>, aggregator: Aggregator, api: ApiSettings) -> Self {
        Self {
            store,
            aggregator,
            api,
        }
    }
}

/// Full application router: `/api/v1/*` with CORS and access logging.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", routes::api_router())
        .layer(axum::middleware::from_fn(log_request))
        .layer(cors)
        .with_state(state)
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        "{} {} -> {} ({:?})",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}
