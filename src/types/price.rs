//! Decimal price, volume and funds helpers.
//!
//! ## Overview
//!
//! Every price, volume and fund amount is a [`rust_decimal::Decimal`]. There is
//! no scaling step: `"6000.1"` parses to exactly `6000.1` and products such as
//! `0.5 * 6000.1` are exact. Floating point never appears on the matching path.
//!
//! ## Funds
//!
//! What an order reserves and pays depends on its side:
//!
//! | Side | Funds for `amount` at `price` |
//! |------|-------------------------------|
//! | Buy  | `amount * price` (quote currency) |
//! | Sell | `amount` (base asset) |
//!
//! ## Exactness
//!
//! `Decimal` keeps 96 bits of mantissa and rounds a product that needs more.
//! Accepted orders carry at most [`MAX_SCALE`] decimal places, and their
//! volume, locked funds and limit notional stay within [`MAX_NOTIONAL`]. Every
//! fill product is then below `10^12` at scale `<= 16`, which fits the mantissa,
//! so partial fills add up to exactly what the whole order locked.
//!
//! ## Examples
//!
//! ```
//! use dark_matcher::types::price::{parse_decimal, format_decimal};
//!
//! let price = parse_decimal("6000.10").unwrap();
//! assert_eq!(format_decimal(price), "6000.1");
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{EngineError, Result};
use crate::types::Side;

/// Most decimal places a price, volume or locked amount may carry.
pub const MAX_SCALE: u32 = 8;

/// Upper bound (inclusive) for volume, locked funds and limit notional: `10^12`.
pub const MAX_NOTIONAL: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

// ============================================================================
// Parsing and Formatting
// ============================================================================

/// Parse decimal text (e.g. `"0.5"`, `"6000"`).
///
/// # Errors
///
/// [`EngineError::InvalidDecimal`] if the text is not a decimal number.
///
/// # Example
///
/// ```
/// use dark_matcher::types::price::parse_decimal;
///
/// assert!(parse_decimal("1.25").is_ok());
/// assert!(parse_decimal("abc").is_err());
/// ```
pub fn parse_decimal(s: &str) -> Result<Decimal> {
    Decimal::from_str(s.trim()).map_err(|_| EngineError::InvalidDecimal(s.to_string()))
}

/// Render a decimal without trailing zeros (`6000.00` -> `"6000"`).
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

// ============================================================================
// Funds Arithmetic
// ============================================================================

/// Funds moved when `amount` executes at `price` for an order on `side`.
///
/// # Panics
///
/// Panics if `amount * price` overflows a `Decimal`. Fills between orders that
/// passed [`Order::validate`](crate::types::Order::validate) are bounded by
/// [`MAX_NOTIONAL`] and never overflow or round.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use dark_matcher::types::{Side, price::funds};
///
/// let amount = Decimal::new(5, 1);      // 0.5
/// let price = Decimal::new(6000, 0);    // 6000
/// assert_eq!(funds(Side::Buy, amount, price), Decimal::new(3000, 0));
/// assert_eq!(funds(Side::Sell, amount, price), amount);
/// ```
#[inline]
pub fn funds(side: Side, amount: Decimal, price: Decimal) -> Decimal {
    match side {
        Side::Buy => amount * price,
        Side::Sell => amount,
    }
}

/// Overflow-checked variant of [`funds`].
///
/// # Errors
///
/// [`EngineError::Overflow`] if `amount * price` does not fit.
pub fn checked_funds(side: Side, amount: Decimal, price: Decimal) -> Result<Decimal> {
    match side {
        Side::Buy => amount.checked_mul(price).ok_or(EngineError::Overflow),
        Side::Sell => Ok(amount),
    }
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Fail with `err(value)` when `value` is below zero.
#[inline]
pub(crate) fn ensure_non_negative(
    value: Decimal,
    err: impl FnOnce(Decimal) -> EngineError,
) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(err(value));
    }
    Ok(())
}

/// Fail with [`EngineError::TooPrecise`] when `value` has more than
/// [`MAX_SCALE`] decimal places. Trailing zeros do not count.
#[inline]
pub(crate) fn ensure_scale(value: Decimal) -> Result<()> {
    if value.scale() > MAX_SCALE && value.normalize().scale() > MAX_SCALE {
        return Err(EngineError::TooPrecise(value));
    }
    Ok(())
}

/// Fail with [`EngineError::TooLarge`] when `value` exceeds [`MAX_NOTIONAL`].
#[inline]
pub(crate) fn ensure_bounded(value: Decimal) -> Result<()> {
    if value > MAX_NOTIONAL {
        return Err(EngineError::TooLarge(value));
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1.0").unwrap(), dec!(1));
        assert_eq!(parse_decimal(" 6000.1 ").unwrap(), dec!(6000.1));
        assert_eq!(parse_decimal("0.00000001").unwrap(), dec!(0.00000001));
        assert_eq!(
            parse_decimal("abc"),
            Err(EngineError::InvalidDecimal("abc".to_string()))
        );
        assert!(parse_decimal("").is_err());
    }

    #[test]
    fn test_format_decimal_trims_zeros() {
        assert_eq!(format_decimal(dec!(6000.00)), "6000");
        assert_eq!(format_decimal(dec!(0.50)), "0.5");
        assert_eq!(format_decimal(dec!(0)), "0");
    }

    #[test]
    fn test_funds_by_side() {
        assert_eq!(funds(Side::Buy, dec!(0.4), dec!(6000)), dec!(2400));
        assert_eq!(funds(Side::Sell, dec!(0.4), dec!(6000)), dec!(0.4));
        // exact, no binary rounding
        assert_eq!(funds(Side::Buy, dec!(0.1), dec!(0.2)), dec!(0.02));
    }

    #[test]
    fn test_checked_funds_overflow() {
        assert_eq!(checked_funds(Side::Buy, dec!(2), dec!(3)), Ok(dec!(6)));
        assert_eq!(
            checked_funds(Side::Buy, Decimal::MAX, dec!(2)),
            Err(EngineError::Overflow)
        );
        // sell side never multiplies
        assert_eq!(checked_funds(Side::Sell, Decimal::MAX, dec!(2)), Ok(Decimal::MAX));
    }

    #[test]
    fn test_max_notional() {
        assert_eq!(MAX_NOTIONAL, dec!(1_000_000_000_000));
    }

    #[test]
    fn test_ensure_scale() {
        assert!(ensure_scale(dec!(0.00000001)).is_ok());
        // trailing zeros are not precision
        assert!(ensure_scale(dec!(1.0000000000)).is_ok());
        assert_eq!(
            ensure_scale(dec!(0.000000001)),
            Err(EngineError::TooPrecise(dec!(0.000000001)))
        );
        assert!(ensure_scale(Decimal::new(3, 28)).is_err());
    }

    #[test]
    fn test_ensure_bounded() {
        assert!(ensure_bounded(MAX_NOTIONAL).is_ok());
        assert_eq!(
            ensure_bounded(MAX_NOTIONAL + dec!(0.1)),
            Err(EngineError::TooLarge(MAX_NOTIONAL + dec!(0.1)))
        );
    }

    #[test]
    fn test_fill_products_are_exact_at_the_bounds() {
        // largest scales: 8 + 8 stays exact
        let amount = dec!(0.00000003);
        let price = dec!(0.50000001);
        assert_eq!(funds(Side::Buy, amount, price), dec!(0.0000000150000003));

        // notional near the bound at full scale still fits the mantissa
        let amount = dec!(99999.99999999);
        let price = dec!(9999999.99999999);
        let product = funds(Side::Buy, amount, price);
        assert_eq!(product.scale(), 16);
        assert_eq!(product, dec!(999999999999.8990000000000001));
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative(dec!(0), EngineError::NegativeVolume).is_ok());
        assert!(ensure_non_negative(dec!(1.5), EngineError::NegativeVolume).is_ok());
        assert_eq!(
            ensure_non_negative(dec!(-0.1), EngineError::NegativeVolume),
            Err(EngineError::NegativeVolume(dec!(-0.1)))
        );
    }
}
