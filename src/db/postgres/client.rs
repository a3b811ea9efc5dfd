use anyhow::Context;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use log::info;
use tokio_postgres::NoTls;

use crate::config::PostgresSettings;

/// Split SQL into statements on `;`, except inside `$$ ... $$` bodies.
///
/// Works on bytes: both delimiters are ASCII, so every split point is a
/// valid char boundary even when comments contain multi-byte text.
fn split_sql_statements(sql: &str) -> Vec<&str> {
    let bytes = sql.as_bytes();
    let mut statements = Vec::new();
    let mut start = 0;
    let mut in_dollar_quote = false;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'$') {
            in_dollar_quote = !in_dollar_quote;
            i += 2;
            continue;
        }

        if bytes[i] == b';' && !in_dollar_quote {
            let stmt = &sql[start..i];
            if !stmt.trim().is_empty() {
                statements.push(stmt);
            }
            start = i + 1;
        }
        i += 1;
    }

    // Trailing statement without a semicolon
    let rest = &sql[start..];
    if !rest.trim().is_empty() {
        statements.push(rest);
    }

    statements
}

/// PostgreSQL client with connection pooling.
///
/// Serves the token registry and the JSONB time-series collections.
/// Uses `deadpool-postgres` for connection management.
#[derive(Clone)]
pub struct PostgresClient {
    pub pool: Pool,
}

/// Connection attempts before startup gives up
const MAX_CONNECT_RETRIES: u32 = 3;

/// Base delay for exponential backoff between attempts
const CONNECT_RETRY_DELAY_MS: u64 = 100;

const SCHEMA_PATH: &str = "schema/postgres.sql";

impl PostgresClient {
    pub async fn new(settings: PostgresSettings) -> anyhow::Result<Self> {
        info!(
            "Connecting to PostgreSQL at {}:{}/{}",
            settings.host, settings.port, settings.database
        );

        let pool = build_pool(&settings)?;

        let mut attempt = 0;
        loop {
            // deadpool connects lazily, so checking out a client is the real test
            match pool.get().await {
                Ok(_conn) => {
                    info!("Successfully connected to PostgreSQL");
                    return Ok(Self { pool });
                },
                Err(e) => {
                    attempt += 1;
                    if attempt >= MAX_CONNECT_RETRIES {
                        return Err(anyhow::anyhow!(
                            "Failed to connect to PostgreSQL after {} attempts: {}",
                            MAX_CONNECT_RETRIES,
                            e
                        ));
                    }

                    let delay =
                        std::time::Duration::from_millis(CONNECT_RETRY_DELAY_MS * 2_u64.pow(attempt));
                    log::warn!(
                        "Failed to connect to PostgreSQL (attempt {}/{}), retrying in {:?}...",
                        attempt,
                        MAX_CONNECT_RETRIES,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                },
            }
        }
    }

    /// Health check - verify connection is still alive
    pub async fn health_check(&self) -> anyhow::Result<()> {
        let client = self.pool.get().await?;
        client
            .query_one("SELECT 1", &[])
            .await
            .context("PostgreSQL health check failed")?;
        Ok(())
    }

    /// Apply `schema/postgres.sql`. Every statement is idempotent, so this
    /// runs on each startup.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        info!("Running PostgreSQL migrations");
        let client = self.pool.get().await?;

        let schema = tokio::fs::read_to_string(SCHEMA_PATH)
            .await
            .with_context(|| format!("Failed to read {}", SCHEMA_PATH))?;

        for stmt in split_sql_statements(&schema) {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            client
                .execute(stmt, &[])
                .await
                .with_context(|| format!("Failed to execute migration statement: {}", stmt))?;
        }

        info!("PostgreSQL migrations completed successfully");
        Ok(())
    }
}

fn build_pool(settings: &PostgresSettings) -> anyhow::Result<Pool> {
    let mut pg_config = tokio_postgres::Config::new();
    pg_config
        .host(&settings.host)
        .port(settings.port)
        .user(&settings.user)
        .password(&settings.password)
        .dbname(&settings.database)
        .application_name("lpstats");

    let mgr_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };

    let mgr = Manager::from_config(pg_config, NoTls, mgr_config);
    Pool::builder(mgr)
        .max_size(settings.pool_size)
        .build()
        .context("Failed to create PostgreSQL connection pool")
}
