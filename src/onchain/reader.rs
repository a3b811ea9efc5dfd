use alloy::primitives::{Address, I256, U256};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OnChainError {
    #[error("{call} failed: {message}")]
    Rpc { call: &'static str, message: String },

    #[error("{call} timed out after {secs}s")]
    Timeout { call: &'static str, secs: u64 },

    #[error("converter {converter} has an empty {token} reserve")]
    EmptyReserve { converter: Address, token: Address },

    #[error("invalid address {0}")]
    InvalidAddress(String),

    #[error("invalid RPC URL: {0}")]
    InvalidUrl(String),
}

/// A decoded `Conversion` event emitted by a converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionEvent {
    pub block_number: u64,
    pub from_token: Address,
    pub to_token: Address,
    pub amount: U256,
    pub return_amount: U256,
    pub conversion_fee: I256,
}

/// Contract state reads needed to price a converter.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Reserve token at `index` of the converter's connector list
    async fn connector_token(&self, converter: Address, index: u64)
        -> Result<Address, OnChainError>;

    /// Raw reserve balance the converter holds of `token`
    async fn connector_balance(
        &self,
        converter: Address,
        token: Address,
    ) -> Result<U256, OnChainError>;

    /// ERC20 decimals of `token`
    async fn decimals(&self, token: Address) -> Result<u8, OnChainError>;

    /// Latest block number
    async fn block_number(&self) -> Result<u64, OnChainError>;

    /// `Conversion` events emitted by `converter` in `[from_block, to_block]`
    async fn conversions(
        &self,
        converter: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ConversionEvent>, OnChainError>;
}

/// Parse a hex address from configuration or the token registry.
pub fn parse_address(s: &str) -> Result<Address, OnChainError> {
    s.trim()
        .parse::<Address>()
        .map_err(|_| OnChainError::InvalidAddress(s.to_string()))
}
