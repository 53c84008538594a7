//! Trade type representing one execution between two orders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Order, Side};

/// A single execution between a buy order and a sell order.
///
/// ## Snapshots
///
/// `buy` and `sell` are copies of both participants taken right after the
/// execution was applied, so `volume`, `locked` and `received` show the state
/// at trade time. Later fills of the live orders do not change a recorded trade.
///
/// ## Price Discovery
///
/// The order that arrived first sets the price. A market order always takes
/// the resting order's price.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use dark_matcher::types::{Order, Side, Trade};
///
/// let buy = Order::limit(2, Side::Buy, Decimal::new(6000, 0), Decimal::ONE);
/// let sell = Order::limit(1, Side::Sell, Decimal::new(6000, 0), Decimal::ONE);
///
/// let trade = Trade::new(buy, sell, Decimal::ONE, Decimal::new(6000, 0));
/// assert_eq!(trade.notional(), Decimal::new(6000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Buy-side participant after the execution
    pub buy: Order,

    /// Sell-side participant after the execution
    pub sell: Order,

    /// Quantity exchanged
    pub amount: Decimal,

    /// Execution price applied to both sides
    pub price: Decimal,
}

impl Trade {
    /// Create a new trade
    ///
    /// # Arguments
    ///
    /// * `buy` - Snapshot of the buy-side order
    /// * `sell` - Snapshot of the sell-side order
    /// * `amount` - Executed quantity
    /// * `price` - Execution price
    pub fn new(buy: Order, sell: Order, amount: Decimal, price: Decimal) -> Self {
        Self { buy, sell, amount, price }
    }

    /// Build a trade from two participants, assigning roles by their `side`
    /// rather than by position.
    pub fn between(first: &Order, second: &Order, amount: Decimal, price: Decimal) -> Self {
        debug_assert_ne!(first.side, second.side, "a trade needs one buy and one sell");

        let (buy, sell) = match first.side {
            Side::Buy => (first, second),
            Side::Sell => (second, first),
        };
        Self::new(buy.clone(), sell.clone(), amount, price)
    }

    /// Quote currency exchanged (`amount * price`)
    pub fn notional(&self) -> Decimal {
        self.amount * self.price
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
