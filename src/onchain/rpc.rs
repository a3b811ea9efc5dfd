use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::Filter;
use alloy::sol_types::SolEvent;
use async_trait::async_trait;
use log::{debug, warn};
use moka::future::Cache;
use url::Url;

use crate::abis::{Conversion, IBancorConverter, IERC20};
use crate::onchain::reader::{ChainReader, ConversionEvent, OnChainError};

/// ERC20 decimals are immutable, so the cache only needs a size bound
const DECIMALS_CACHE_CAPACITY: u64 = 10_000;

/// [`ChainReader`] backed by an Ethereum JSON-RPC node over HTTP.
#[derive(Clone)]
pub struct RpcChainReader {
    provider: DynProvider,
    decimals: Cache<Address, u8>,
    timeout: Duration,
}

impl RpcChainReader {
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, OnChainError> {
        let url = Url::parse(rpc_url).map_err(|e| OnChainError::InvalidUrl(e.to_string()))?;

        let client = ProviderBuilder::new().connect_http(url);
        let provider = DynProvider::new(client);

        let decimals = Cache::builder().max_capacity(DECIMALS_CACHE_CAPACITY).build();

        Ok(Self {
            provider,
            decimals,
            timeout,
        })
    }

    /// Run an RPC future under the configured timeout, mapping both
    /// failure modes onto [`OnChainError`].
    async fn bounded<T, E, F>(&self, call: &'static str, fut: F) -> Result<T, OnChainError>
    where
        E: std::fmt::Display,
        F: IntoFuture<Output = Result<T, E>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => Err(OnChainError::Rpc {
                call,
                message: e.to_string(),
            }),
            Err(_) => Err(OnChainError::Timeout {
                call,
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn connector_token(
        &self,
        converter: Address,
        index: u64,
    ) -> Result<Address, OnChainError> {
        let contract = IBancorConverter::new(converter, &self.provider);
        let token = self
            .bounded("connectorTokens", contract.connectorTokens(U256::from(index)).call())
            .await?;
        Ok(token)
    }

    async fn connector_balance(
        &self,
        converter: Address,
        token: Address,
    ) -> Result<U256, OnChainError> {
        let contract = IBancorConverter::new(converter, &self.provider);
        let balance = self
            .bounded("getConnectorBalance", contract.getConnectorBalance(token).call())
            .await?;
        Ok(balance)
    }

    async fn decimals(&self, token: Address) -> Result<u8, OnChainError> {
        if let Some(d) = self.decimals.get(&token).await {
            return Ok(d);
        }

        let contract = IERC20::new(token, &self.provider);
        let decimals = self.bounded("decimals", contract.decimals().call()).await?;

        self.decimals.insert(token, decimals).await;
        Ok(decimals)
    }

    async fn block_number(&self) -> Result<u64, OnChainError> {
        let block = self.bounded("eth_blockNumber", self.provider.get_block_number()).await?;
        Ok(block)
    }

    async fn conversions(
        &self,
        converter: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ConversionEvent>, OnChainError> {
        let filter = Filter::new()
            .address(converter)
            .event_signature(Conversion::SIGNATURE_HASH)
            .from_block(from_block)
            .to_block(to_block);

        let logs = self.bounded("eth_getLogs", self.provider.get_logs(&filter)).await?;
        debug!(
            "Fetched {} Conversion logs for {} in blocks {}..={}",
            logs.len(),
            converter,
            from_block,
            to_block
        );

        let events = logs
            .iter()
            .filter_map(|log| match log.log_decode::<Conversion>() {
                Ok(decoded) => {
                    let event = decoded.inner.data;
                    Some(ConversionEvent {
                        block_number: log.block_number.unwrap_or_default(),
                        from_token: event._fromToken,
                        to_token: event._toToken,
                        amount: event._amount,
                        return_amount: event._return,
                        conversion_fee: event._conversionFee,
                    })
                },
                Err(e) => {
                    warn!(
                        "Skipping undecodable Conversion log from {} (tx {:?}): {}",
                        converter, log.transaction_hash, e
                    );
                    None
                },
            })
            .collect();

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_rpc_url() {
        let result = RpcChainReader::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(OnChainError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_bounded_maps_timeout() {
        let reader = RpcChainReader::new("http://127.0.0.1:8545", Duration::from_millis(10)).unwrap();
        let result = reader
            .bounded("eth_call", std::future::pending::<Result<u8, String>>())
            .await;
        assert!(matches!(result, Err(OnChainError::Timeout { call: "eth_call", .. })));
    }

    #[tokio::test]
    async fn test_bounded_maps_call_error() {
        let reader = RpcChainReader::new("http://127.0.0.1:8545", Duration::from_secs(1)).unwrap();
        let result = reader
            .bounded("decimals", async { Err::<u8, _>("execution reverted".to_string()) })
            .await;
        match result {
            Err(OnChainError::Rpc { call, message }) => {
                assert_eq!(call, "decimals");
                assert_eq!(message, "execution reverted");
            },
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
