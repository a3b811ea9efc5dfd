use chrono::{DateTime, Utc};
use serde::Serialize;

/// Registered token (PostgreSQL `analytics.tokens`)
///
/// Primary Key: symbol
/// Query Pattern: "Does token X exist, and which converter prices it?"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub address: String,

    /// Bancor converter holding the token/BNT reserves. Tokens without one
    /// still have history but no live info.
    pub converter: Option<String>,
    pub decimals: Option<u8>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Token {
    pub fn new(symbol: String, name: String, address: String) -> Self {
        Self {
            symbol,
            name,
            // Always lowercase addresses for consistent comparisons
            address: address.to_lowercase(),
            converter: None,
            decimals: None,
            updated_at: None,
        }
    }

    pub fn with_converter(mut self, converter: &str) -> Self {
        self.converter = Some(converter.to_lowercase());
        self
    }

    /// Case-insensitive match against a request's token identifier.
    pub fn matches(&self, id: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(id)
    }
}
