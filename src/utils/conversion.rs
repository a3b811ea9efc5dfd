//! Token amount conversion utilities.
//!
//! On-chain balances are raw integers scaled by the token's `decimals`.
//! These helpers normalize them to f64 through BigDecimal so values above
//! 2^53 keep their leading digits.

use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use once_cell::sync::Lazy;

// ============================================
// U256 Conversions
// ============================================

/// Convert U256 to f64 with decimal adjustment using BigDecimal for precision.
///
/// # Returns
/// * The adjusted f64 value, or 0.0 if conversion fails
///
/// # Example
/// ```ignore
/// let value = U256::from(1_000_000_000_000_000_000u128); // 1e18
/// let adjusted = u256_to_f64(value, 18); // Returns 1.0
/// ```
pub fn u256_to_f64(value: U256, decimals: u8) -> f64 {
    u256_to_f64_safe(value, decimals).unwrap_or(0.0)
}

/// Convert U256 to f64 with decimal adjustment, returning `None` if the
/// result is not a finite f64.
pub fn u256_to_f64_safe(value: U256, decimals: u8) -> Option<f64> {
    // Convert U256 to BigDecimal via bytes (faster than string parsing)
    let bytes: [u8; 32] = value.to_le_bytes();
    let big_int = BigInt::from_bytes_le(num_bigint::Sign::Plus, &bytes);
    let big_value = BigDecimal::from(big_int);

    let adjusted = if decimals == 0 { big_value } else { big_value / big_pow10(decimals) };

    let result = adjusted.to_f64()?;

    if result.is_finite() {
        Some(result)
    } else {
        None
    }
}

// ============================================
// Internal Helpers
// ============================================

static POW10_CACHE: Lazy<[BigDecimal; 25]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^exp as BigDecimal.
pub(crate) fn big_pow10(exp: u8) -> BigDecimal {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(exp as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_ether_normalizes_to_one() {
        let value = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(u256_to_f64(value, 18), 1.0);
    }

    #[test]
    fn test_six_decimal_token() {
        // 1234.5 USDC
        let value = U256::from(1_234_500_000u64);
        assert!((u256_to_f64(value, 6) - 1234.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_decimals_is_identity() {
        assert_eq!(u256_to_f64(U256::from(42u64), 0), 42.0);
    }

    #[test]
    fn test_large_values_keep_precision() {
        // 123456789.123456789 tokens at 18 decimals, well beyond 2^53 raw
        let value = U256::from(123_456_789_123_456_789_000_000_000u128);
        let adjusted = u256_to_f64(value, 18);
        assert!((adjusted - 123_456_789.123_456_789).abs() < 1e-6);
    }

    #[test]
    fn test_decimals_beyond_cache() {
        let value = U256::from(10u64).pow(U256::from(30u64));
        assert!((u256_to_f64(value, 30) - 1.0).abs() < 1e-12);
    }
}
