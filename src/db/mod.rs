use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::config::Settings;

#[cfg(test)]
pub mod memory;
pub mod models;
pub mod postgres;

pub use models::{Collection, Projection, SeriesRecord, TimeRange, Token};
pub use postgres::PostgresClient;

/// Read access to the token registry and the analytics collections.
///
/// The HTTP layer only talks to this trait, so handlers can be exercised
/// against an in-memory store.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Verify the backing store is reachable
    async fn ping(&self) -> anyhow::Result<()>;

    /// All registered tokens, ordered by symbol
    async fn list_tokens(&self) -> anyhow::Result<Vec<Token>>;

    /// Case-insensitive symbol lookup
    async fn find_token(&self, id: &str) -> anyhow::Result<Option<Token>>;

    /// Records of `collection` for `token` within `range`, oldest first
    async fn find_series(
        &self,
        collection: Collection,
        token: &str,
        range: &TimeRange,
    ) -> anyhow::Result<Vec<SeriesRecord>>;
}

/// Database handle shared across request handlers.
#[derive(Clone)]
pub struct Database {
    pub postgres: Arc<PostgresClient>,
}

impl Database {
    pub async fn new(settings: Arc<Settings>) -> anyhow::Result<Self> {
        let postgres = PostgresClient::new(settings.postgres.clone()).await?;

        postgres.migrate().await?;

        info!("Analytics store ready");

        Ok(Self {
            postgres: Arc::new(postgres),
        })
    }
}

#[async_trait]
impl AnalyticsStore for Database {
    async fn ping(&self) -> anyhow::Result<()> {
        self.postgres.health_check().await
    }

    async fn list_tokens(&self) -> anyhow::Result<Vec<Token>> {
        self.postgres.get_tokens().await
    }

    async fn find_token(&self, id: &str) -> anyhow::Result<Option<Token>> {
        self.postgres.get_token(id).await
    }

    async fn find_series(
        &self,
        collection: Collection,
        token: &str,
        range: &TimeRange,
    ) -> anyhow::Result<Vec<SeriesRecord>> {
        self.postgres.get_series(collection, token, range).await
    }
}
