//! In-memory [`AnalyticsStore`] used by handler tests.

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;

use super::{AnalyticsStore, Collection, SeriesRecord, TimeRange, Token};

#[derive(Default)]
pub struct MemoryStore {
    tokens: Vec<Token>,
    series: HashMap<(Collection, String), Vec<SeriesRecord>>,
    /// Simulate an unreachable database
    pub offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens.push(token);
        self.tokens.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        self
    }

    pub fn with_record(mut self, collection: Collection, token: &str, record: SeriesRecord) -> Self {
        let records = self.series.entry((collection, token.to_uppercase())).or_default();
        records.push(record);
        records.sort_by_key(|r| r.timestamp);
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.offline {
            Err(anyhow!("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AnalyticsStore for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.check()
    }

    async fn list_tokens(&self) -> anyhow::Result<Vec<Token>> {
        self.check()?;
        Ok(self.tokens.clone())
    }

    async fn find_token(&self, id: &str) -> anyhow::Result<Option<Token>> {
        self.check()?;
        Ok(self.tokens.iter().find(|t| t.matches(id)).cloned())
    }

    async fn find_series(
        &self,
        collection: Collection,
        token: &str,
        range: &TimeRange,
    ) -> anyhow::Result<Vec<SeriesRecord>> {
        self.check()?;
        Ok(self
            .series
            .get(&(collection, token.to_uppercase()))
            .map(|records| {
                records.iter().filter(|r| range.contains(r.timestamp)).cloned().collect()
            })
            .unwrap_or_default())
    }
}
