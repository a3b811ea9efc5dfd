//! Live price and 24h volume for a Bancor converter.
//!
//! Prices are quoted in BNT (the reserve currency every converter pairs
//! against) and converted to USD through a reference BNT/DAI converter.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use log::{info, warn};
use serde::Serialize;

use crate::config::ChainSettings;
use crate::onchain::reader::{parse_address, ChainReader, ConversionEvent, OnChainError};
use crate::utils::{
    is_plausible_price_ratio, is_plausible_usd_price, is_plausible_usd_volume, u256_to_f64,
};

/// Connector index holding the non-BNT reserve of a converter
pub const TOKEN_CONNECTOR_INDEX: u64 = 1;

/// Decimal-normalized reserves of a BNT/token converter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolState {
    pub converter: Address,
    pub token: Address,
    pub reserve_bnt: f64,
    pub reserve_token: f64,
}

impl PoolState {
    /// Price of one token in BNT. `None` when the token reserve is empty.
    pub fn price_in_bnt(&self) -> Option<f64> {
        if self.reserve_token > 0.0 {
            Some(self.reserve_bnt / self.reserve_token)
        } else {
            None
        }
    }

    /// Price of one BNT in the pool token. `None` when the BNT reserve is empty.
    pub fn bnt_in_token(&self) -> Option<f64> {
        if self.reserve_bnt > 0.0 {
            Some(self.reserve_token / self.reserve_bnt)
        } else {
            None
        }
    }
}

/// Live market data for one token, as served by the info endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenInfo {
    pub token: String,
    pub token_address: Address,
    pub converter: Address,
    pub price_bnt: f64,
    pub price_usd: f64,
    pub bnt_usd: f64,
    pub volume_bnt: f64,
    pub volume_usd: f64,
    pub reserve_bnt: f64,
    pub reserve_token: f64,
    pub from_block: u64,
    pub to_block: u64,
}

/// Sum the BNT side of each conversion, in raw BNT units.
///
/// Selling BNT counts the amount paid in; buying BNT counts the amount
/// returned plus the conversion fee. Conversions that don't touch BNT
/// are ignored.
pub fn conversion_volume(events: &[ConversionEvent], bnt: Address) -> U256 {
    events.iter().fold(U256::ZERO, |total, event| {
        if event.from_token == bnt {
            total.saturating_add(event.amount)
        } else if event.to_token == bnt {
            let fee = event.conversion_fee.unsigned_abs();
            let gross = if event.conversion_fee.is_negative() {
                event.return_amount.saturating_sub(fee)
            } else {
                event.return_amount.saturating_add(fee)
            };
            total.saturating_add(gross)
        } else {
            total
        }
    })
}

/// Computes [`TokenInfo`] through a sequence of contract reads.
#[derive(Clone)]
pub struct Aggregator {
    reader: Arc<dyn ChainReader>,
    bnt: Address,
    reference_converter: Address,
    blocks_per_day: u64,
}

impl Aggregator {
    pub fn new(
        reader: Arc<dyn ChainReader>,
        settings: &ChainSettings,
    ) -> Result<Self, OnChainError> {
        Ok(Self {
            reader,
            bnt: parse_address(&settings.bnt_address)?,
            reference_converter: parse_address(&settings.reference_converter)?,
            blocks_per_day: settings.blocks_per_day,
        })
    }

    pub fn bnt(&self) -> Address {
        self.bnt
    }

    /// Read and normalize both reserves of `converter`.
    pub async fn pool_state(&self, converter: Address) -> Result<PoolState, OnChainError> {
        let token = self.reader.connector_token(converter, TOKEN_CONNECTOR_INDEX).await?;

        let (bnt_decimals, token_decimals, bnt_balance, token_balance) = futures::try_join!(
            self.reader.decimals(self.bnt),
            self.reader.decimals(token),
            self.reader.connector_balance(converter, self.bnt),
            self.reader.connector_balance(converter, token),
        )?;

        Ok(PoolState {
            converter,
            token,
            reserve_bnt: u256_to_f64(bnt_balance, bnt_decimals),
            reserve_token: u256_to_f64(token_balance, token_decimals),
        })
    }

    /// USD value of one BNT, from the reference BNT/DAI converter.
    pub async fn bnt_usd(&self) -> Result<f64, OnChainError> {
        let reference = self.pool_state(self.reference_converter).await?;
        reference.bnt_in_token().ok_or(OnChainError::EmptyReserve {
            converter: reference.converter,
            token: self.bnt,
        })
    }

    /// BNT volume traded through `converter` over the trailing day of blocks.
    ///
    /// Returns (volume in BNT, from_block, to_block).
    pub async fn daily_volume(&self, converter: Address) -> Result<(f64, u64, u64), OnChainError> {
        let to_block = self.reader.block_number().await?;
        let from_block = to_block.saturating_sub(self.blocks_per_day);

        let (events, bnt_decimals) = futures::try_join!(
            self.reader.conversions(converter, from_block, to_block),
            self.reader.decimals(self.bnt),
        )?;

        let raw = conversion_volume(&events, self.bnt);
        Ok((u256_to_f64(raw, bnt_decimals), from_block, to_block))
    }

    pub async fn token_info(
        &self,
        symbol: &str,
        converter: Address,
    ) -> Result<TokenInfo, OnChainError> {
        let pool = self.pool_state(converter).await?;
        let price_bnt = pool.price_in_bnt().ok_or(OnChainError::EmptyReserve {
            converter,
            token: pool.token,
        })?;

        let bnt_usd = self.bnt_usd().await?;
        let price_usd = price_bnt * bnt_usd;

        let (volume_bnt, from_block, to_block) = self.daily_volume(converter).await?;
        let volume_usd = volume_bnt * bnt_usd;

        if !is_plausible_price_ratio(price_bnt) || !is_plausible_usd_price(price_usd) {
            warn!(
                "Implausible price for {} via {}: {} BNT / ${}",
                symbol, converter, price_bnt, price_usd
            );
        }
        if !is_plausible_usd_volume(volume_usd) {
            warn!("Implausible 24h volume for {} via {}: ${}", symbol, converter, volume_usd);
        }

        info!(
            "Computed info for {}: {:.6} BNT, ${:.6}, 24h volume {:.2} BNT",
            symbol, price_bnt, price_usd, volume_bnt
        );

        Ok(TokenInfo {
            token: symbol.to_string(),
            token_address: pool.token,
            converter,
            price_bnt,
            price_usd,
            bnt_usd,
            volume_bnt,
            volume_usd,
            reserve_bnt: pool.reserve_bnt,
            reserve_token: pool.reserve_token,
            from_block,
            to_block,
        })
    }
}
