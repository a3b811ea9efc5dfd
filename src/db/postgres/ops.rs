use chrono::{DateTime, Utc};
use log::error;
use serde_json::Value;
use tokio_postgres::Row;

use crate::db::models::{Collection, SeriesRecord, TimeRange, Token};
use crate::db::postgres::PostgresClient;

impl PostgresClient {
    // ==================== TOKENS ====================

    /// Get every registered token
    pub async fn get_tokens(&self) -> anyhow::Result<Vec<Token>> {
        let client = self.pool.get().await?;
        let query = r#"
            SELECT symbol, name, address, converter, decimals, updated_at
            FROM analytics.tokens
            ORDER BY symbol
        "#;

        let rows = client.query(query, &[]).await?;
        Ok(rows.iter().map(row_to_token).collect())
    }

    /// Get a single token by symbol (case-insensitive)
    pub async fn get_token(&self, symbol: &str) -> anyhow::Result<Option<Token>> {
        let client = self.pool.get().await?;
        let query = r#"
            SELECT symbol, name, address, converter, decimals, updated_at
            FROM analytics.tokens
            WHERE upper(symbol) = upper($1)
            LIMIT 1
        "#;

        let row = client.query_opt(query, &[&symbol]).await?;
        Ok(row.as_ref().map(row_to_token))
    }

    // ==================== SERIES ====================

    /// Get the documents of one collection for `token` inside `range`
    pub async fn get_series(
        &self,
        collection: Collection,
        token: &str,
        range: &TimeRange,
    ) -> anyhow::Result<Vec<SeriesRecord>> {
        let client = self.pool.get().await?;

        // Table names come from the Collection enum, never from the request
        let query = format!(
            r#"
            SELECT timestamp, doc
            FROM {}
            WHERE token = $1 AND timestamp >= $2 AND timestamp <= $3
            ORDER BY timestamp ASC
            "#,
            collection.table()
        );

        let rows = client
            .query(&query, &[&token, &range.start, &range.end])
            .await
            .map_err(|e| {
                error!("Failed to read {} for {}: {:?}", collection.name(), token, e);
                e
            })?;

        Ok(rows
            .iter()
            .map(|row| {
                let timestamp: DateTime<Utc> = row.get("timestamp");
                let doc: Value = row.get("doc");
                SeriesRecord::new(timestamp, doc)
            })
            .collect())
    }
}

fn row_to_token(row: &Row) -> Token {
    let address: String = row.get("address");
    let converter: Option<String> = row.get("converter");
    let decimals: Option<i16> = row.get("decimals");

    Token {
        symbol: row.get("symbol"),
        name: row.get("name"),
        // Lowercase addresses for consistent comparisons
        address: address.to_lowercase(),
        converter: converter.map(|c| c.to_lowercase()),
        decimals: decimals.and_then(|d| u8::try_from(d).ok()),
        updated_at: row.get("updated_at"),
    }
}
