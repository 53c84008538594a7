//! JSON-lines wire form for orders, commands and engine events.
//!
//! The engine itself never parses or prints anything; this module is the
//! collaborator-facing layer used by the replay binary and tests.
//!
//! ```text
//! {"op":"submit","order":{"id":1,"side":"sell","kind":"limit","price":"6000","volume":"1.0"}}
//! {"op":"cancel","order":{"id":1,"side":"sell","kind":"limit","price":"6000","volume":"1.0"}}
//! {"op":"book"}
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::types::price::checked_funds;
use crate::types::{Order, OrderKind, Side, Trade};

// ============================================================================
// OrderRequest
// ============================================================================

/// Flat, unvalidated order as it appears on the wire.
///
/// `side` and `kind` are text so that unknown values surface as
/// [`EngineError::UnknownSide`] / [`EngineError::UnknownKind`] instead of a
/// generic parse failure. `price` must be zero (or absent) for market orders.
///
/// When `locked` is absent it defaults to what the order needs: the full
/// `funds(side, volume, price)` for a limit order, the volume itself for a
/// market sell. A market buy must state its budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub id: u64,
    pub side: String,
    pub kind: String,
    #[serde(default)]
    pub price: Decimal,
    pub volume: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<Decimal>,
    #[serde(default)]
    pub received: Decimal,
}

impl TryFrom<OrderRequest> for Order {
    type Error = EngineError;

    fn try_from(req: OrderRequest) -> Result<Self> {
        let side: Side = req.side.parse()?;

        let kind = match req.kind.to_ascii_lowercase().as_str() {
            "limit" => OrderKind::Limit { price: req.price },
            "market" if req.price.is_zero() => OrderKind::Market,
            "market" => return Err(EngineError::MarketOrderWithPrice(req.price)),
            _ => return Err(EngineError::UnknownKind(req.kind)),
        };

        let locked = match (req.locked, kind, side) {
            (Some(locked), _, _) => locked,
            (None, OrderKind::Limit { price }, _) => checked_funds(side, req.volume, price)?,
            (None, OrderKind::Market, Side::Sell) => req.volume,
            (None, OrderKind::Market, Side::Buy) => return Err(EngineError::MissingBudget),
        };

        let order = Order {
            id: req.id,
            side,
            kind,
            volume: req.volume,
            locked,
            received: req.received,
        };
        order.validate()?;

        Ok(order)
    }
}

impl From<Order> for OrderRequest {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            side: order.side.as_str().to_string(),
            kind: order.kind.as_str().to_string(),
            price: order.price_or_zero(),
            volume: order.volume,
            locked: Some(order.locked),
            received: order.received,
        }
    }
}

// ============================================================================
// Commands and Events
// ============================================================================

/// One input line of a replay stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Submit { order: OrderRequest },
    Cancel { order: OrderRequest },
    /// Emit the current book
    Book,
}

/// One output line of a replay stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Trade { trade: Trade },
    /// Unfilled market remainder
    Rejected { order: Order },
    Cancelled { order: Order },
    /// Cancel of an order that is not resting
    NotFound { id: u64 },
    Error { line: usize, message: String },
    Book { bids: Vec<Order>, asks: Vec<Order> },
}

// ============================================================================
// Unit Tests
// ============================================================================
