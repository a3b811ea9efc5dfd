//! Utility functions for the lpstats service.
//!
//! - [`conversion`] - Token amount normalization (U256 -> f64 via BigDecimal)
//! - [`validation`] - Sanity bounds for computed prices and volumes

mod conversion;
mod validation;

// ============================================
// Re-exports
// ============================================

pub use conversion::{u256_to_f64, u256_to_f64_safe};

pub use validation::{
    is_plausible_price_ratio, is_plausible_usd_price, is_plausible_usd_volume, MAX_PRICE_RATIO,
    MAX_TOKEN_USD_PRICE, MAX_VOLUME_USD,
};
