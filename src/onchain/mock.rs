//! Scriptable [`ChainReader`] for aggregator and handler tests.

use std::collections::HashMap;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use super::aggregator::TOKEN_CONNECTOR_INDEX;
use super::reader::{ChainReader, ConversionEvent, OnChainError};

/// Deterministic test address from a small integer
pub fn addr(n: u64) -> Address {
    Address::left_padding_from(&n.to_be_bytes())
}

/// `amount * 10^decimals`
pub fn units(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(decimals))
}

#[derive(Default)]
pub struct MockChain {
    block: u64,
    connectors: HashMap<Address, Address>,
    balances: HashMap<(Address, Address), U256>,
    decimals: HashMap<Address, u8>,
    logs: HashMap<Address, Vec<ConversionEvent>>,
    /// Every call fails as if the node were unreachable
    down: bool,
}

impl MockChain {
    pub fn new(block: u64) -> Self {
        Self {
            block,
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: Address, decimals: u8) -> Self {
        self.decimals.insert(token, decimals);
        self
    }

    pub fn with_pool(
        mut self,
        converter: Address,
        token: Address,
        reserve_bnt: U256,
        reserve_token: U256,
        bnt: Address,
    ) -> Self {
        self.connectors.insert(converter, token);
        self.balances.insert((converter, bnt), reserve_bnt);
        self.balances.insert((converter, token), reserve_token);
        self
    }

    pub fn with_conversion(mut self, converter: Address, event: ConversionEvent) -> Self {
        self.logs.entry(converter).or_default().push(event);
        self
    }

    pub fn down(mut self) -> Self {
        self.down = true;
        self
    }

    fn check(&self, call: &'static str) -> Result<(), OnChainError> {
        if self.down {
            Err(OnChainError::Rpc {
                call,
                message: "connection refused".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn connector_token(
        &self,
        converter: Address,
        index: u64,
    ) -> Result<Address, OnChainError> {
        self.check("connectorTokens")?;
        match self.connectors.get(&converter) {
            Some(token) if index == TOKEN_CONNECTOR_INDEX => Ok(*token),
            _ => Err(OnChainError::Rpc {
                call: "connectorTokens",
                message: "execution reverted".to_string(),
            }),
        }
    }

    async fn connector_balance(
        &self,
        converter: Address,
        token: Address,
    ) -> Result<U256, OnChainError> {
        self.check("getConnectorBalance")?;
        Ok(self.balances.get(&(converter, token)).copied().unwrap_or_default())
    }

    async fn decimals(&self, token: Address) -> Result<u8, OnChainError> {
        self.check("decimals")?;
        self.decimals.get(&token).copied().ok_or(OnChainError::Rpc {
            call: "decimals",
            message: "execution reverted".to_string(),
        })
    }

    async fn block_number(&self) -> Result<u64, OnChainError> {
        self.check("eth_blockNumber")?;
        Ok(self.block)
    }

    async fn conversions(
        &self,
        converter: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ConversionEvent>, OnChainError> {
        self.check("eth_getLogs")?;
        Ok(self
            .logs
            .get(&converter)
            .map(|events| {
                events
                    .iter()
                    .filter(|e| (from_block..=to_block).contains(&e.block_number))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
