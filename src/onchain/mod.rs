//! Live on-chain reads against Bancor converters.
//!
//! - [`reader`] - the [`ChainReader`] seam and decoded event types
//! - [`rpc`] - alloy HTTP implementation of [`ChainReader`]
//! - [`aggregator`] - price / volume computation on top of a reader

pub mod aggregator;
#[cfg(test)]
pub mod mock;
pub mod reader;
pub mod rpc;

pub use aggregator::{conversion_volume, Aggregator, PoolState, TokenInfo};
pub use reader::{ChainReader, ConversionEvent, OnChainError};
pub use rpc::RpcChainReader;
