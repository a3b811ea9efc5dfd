//! Sanity bounds for on-chain derived prices and volumes.
//!
//! Values outside these bounds almost always come from a decimals mismatch
//! or a near-empty pool. They are reported, not rejected.

// ============================================
// Validation Constants
// ============================================

/// Maximum reasonable price ratio between two reserve tokens.
/// 1e12 allows for extreme pairs while catching decimal errors.
pub const MAX_PRICE_RATIO: f64 = 1e12;

/// Minimum reasonable price ratio. Inverse of MAX_PRICE_RATIO.
pub const MIN_PRICE_RATIO: f64 = 1e-12;

/// Maximum reasonable token price in USD.
pub const MAX_TOKEN_USD_PRICE: f64 = 1e6;

/// Maximum reasonable 24h volume in USD for a single converter.
pub const MAX_VOLUME_USD: f64 = 1e10;

// ============================================
// Validation Helpers
// ============================================

#[inline]
pub fn is_plausible_price_ratio(price: f64) -> bool {
    price.is_finite() && (MIN_PRICE_RATIO..=MAX_PRICE_RATIO).contains(&price)
}

#[inline]
pub fn is_plausible_usd_price(price: f64) -> bool {
    price > 0.0 && price.is_finite() && price <= MAX_TOKEN_USD_PRICE
}

#[inline]
pub fn is_plausible_usd_volume(volume: f64) -> bool {
    volume >= 0.0 && volume.is_finite() && volume <= MAX_VOLUME_USD
}
