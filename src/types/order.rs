//! Order types for the matching core.
//!
//! ## Kinds
//!
//! [`OrderKind`] is a tagged variant: a limit order carries its price, a
//! market order carries none. The execution-price rule branches on the tag,
//! so a limit price of zero is an ordinary price rather than a marker.
//!
//! ## Funds
//!
//! `locked` is what the order reserved to settle and `received` is what it
//! has been paid so far. See [`price::funds`](crate::types::price::funds)
//! for the per-side formula.
//!
//! ## Wire Form
//!
//! Orders serialize through [`OrderRequest`], which keeps the flat
//! `{id, side, kind, price, volume, locked, received}` layout with textual
//! side/kind and validates on the way in.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::types::price::{
    checked_funds, ensure_bounded, ensure_non_negative, ensure_scale, format_decimal, funds,
};
use crate::types::wire::OrderRequest;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid) - pays quote currency
    Buy,
    /// Sell order (ask) - pays base asset
    Sell,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err(EngineError::UnknownSide(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// OrderKind enum
// ============================================================================

/// Order kind. Limit orders carry their price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderKind {
    /// Executes at `price` or better; the remainder rests in the book
    Limit { price: Decimal },
    /// Executes immediately against resting liquidity; never rests
    Market,
}

impl OrderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderKind::Limit { .. } => "limit",
            OrderKind::Market => "market",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// An order as seen by the engine.
///
/// `id` is assigned by the caller from a monotonically increasing sequence
/// and is only ever compared: a smaller id arrived earlier.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use dark_matcher::types::{Order, Side};
///
/// // Buy 1.0 at 6000, locking 6000 of quote currency
/// let order = Order::limit(1, Side::Buy, Decimal::new(6000, 0), Decimal::ONE);
/// assert_eq!(order.locked, Decimal::new(6000, 0));
/// assert!(order.rests());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderRequest", into = "OrderRequest")]
pub struct Order {
    /// Caller-assigned sequence number, the time-priority tie-break
    pub id: u64,

    pub side: Side,

    pub kind: OrderKind,

    /// Remaining unmatched quantity
    pub volume: Decimal,

    /// Funds still reserved against this order
    pub locked: Decimal,

    /// Proceeds credited by fills so far
    pub received: Decimal,
}

impl Order {
    /// Create an order with explicit kind and locked funds.
    pub fn new(id: u64, side: Side, kind: OrderKind, volume: Decimal, locked: Decimal) -> Self {
        Self {
            id,
            side,
            kind,
            volume,
            locked,
            received: Decimal::ZERO,
        }
    }

    /// Create a limit order locking exactly what its full volume needs.
    ///
    /// # Panics
    ///
    /// Panics if `volume * price` overflows a `Decimal`.
    pub fn limit(id: u64, side: Side, price: Decimal, volume: Decimal) -> Self {
        let locked = funds(side, volume, price);
        Self::new(id, side, OrderKind::Limit { price }, volume, locked)
    }

    /// Create a market order with an explicit budget.
    ///
    /// For a buy, `locked` is the most quote currency the order may spend;
    /// for a sell it is the base asset on offer.
    pub fn market(id: u64, side: Side, volume: Decimal, locked: Decimal) -> Self {
        Self::new(id, side, OrderKind::Market, volume, locked)
    }

    /// Limit price, `None` for market orders
    #[inline]
    pub fn price(&self) -> Option<Decimal> {
        match self.kind {
            OrderKind::Limit { price } => Some(price),
            OrderKind::Market => None,
        }
    }

    /// Limit price, or zero for market orders (display and wire form only)
    #[inline]
    pub fn price_or_zero(&self) -> Decimal {
        self.price().unwrap_or(Decimal::ZERO)
    }

    #[inline]
    pub fn is_market(&self) -> bool {
        matches!(self.kind, OrderKind::Market)
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.volume.is_zero()
    }

    /// Whether this order belongs in the book: a limit order with volume left.
    #[inline]
    pub fn rests(&self) -> bool {
        !self.is_market() && self.volume > Decimal::ZERO
    }

    /// Check the order can be handed to the engine.
    ///
    /// # Errors
    ///
    /// - negative price, volume, locked or received funds
    /// - price, volume or locked with more than
    ///   [`MAX_SCALE`](crate::types::price::MAX_SCALE) decimal places
    /// - `volume * price` overflow
    /// - volume, locked or limit notional above
    ///   [`MAX_NOTIONAL`](crate::types::price::MAX_NOTIONAL)
    /// - a limit order whose `locked` cannot settle its full volume
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative(self.volume, EngineError::NegativeVolume)?;
        ensure_non_negative(self.locked, EngineError::NegativeLocked)?;
        ensure_non_negative(self.received, EngineError::NegativeReceived)?;

        ensure_scale(self.volume)?;
        ensure_scale(self.locked)?;

        if let OrderKind::Limit { price } = self.kind {
            ensure_non_negative(price, EngineError::NegativePrice)?;
            ensure_scale(price)?;

            let notional = self.volume.checked_mul(price).ok_or(EngineError::Overflow)?;
            ensure_bounded(notional)?;

            let required = checked_funds(self.side, self.volume, price)?;
            if self.locked < required {
                return Err(EngineError::InsufficientLocked {
                    required,
                    locked: self.locked,
                });
            }
        }

        ensure_bounded(self.volume)?;
        ensure_bounded(self.locked)?;

        Ok(())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {}@{} locked={} received={}",
            self.id,
            self.side,
            self.kind,
            format_decimal(self.volume),
            format_decimal(self.price_or_zero()),
            format_decimal(self.locked),
            format_decimal(self.received),
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
