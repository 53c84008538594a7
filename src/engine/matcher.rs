//! Price-time priority matcher.
//!
//! ## Submission
//!
//! - **Limit**: match against the opposite side while prices cross, then rest
//!   any remainder on the order's own side.
//! - **Market**: first check that the opposite side can fill the whole volume
//!   within the order's locked budget. If not, return the untouched order as a
//!   rejection. Otherwise match; anything left over is still a rejection, and
//!   the trades that did execute stand.
//!
//! ## Execution Price
//!
//! The earlier order (smaller id) sets the price. A market order always takes
//! the resting order's price.

use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::orderbook::{Ascend, OrderBook, Priority, PriorityIndex};
use crate::types::price::{checked_funds, funds};
use crate::types::{Order, OrderKind, Side, Trade};

// ============================================================================
// MatchResult
// ============================================================================

/// Outcome of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Trades in execution order (also best price first)
    pub trades: Vec<Trade>,

    /// Unfilled market order, returned instead of resting
    pub rejection: Option<Order>,
}

impl MatchResult {
    fn rejected(order: Order) -> Self {
        Self {
            trades: Vec::new(),
            rejection: Some(order),
        }
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Total quantity executed across all trades
    pub fn executed_volume(&self) -> Decimal {
        self.trades.iter().map(|t| t.amount).sum()
    }
}

// ============================================================================
// MatchingEngine
// ============================================================================

/// Single-writer matching engine owning one [`OrderBook`].
///
/// `submit` and `cancel` take `&mut self` and run to completion; hosts that
/// share an engine across threads must serialize access themselves.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    book: OrderBook,
}

impl MatchingEngine {
    /// Create an engine with an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `order` against the book.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`](crate::EngineError) for invalid input, before
    /// anything is touched. A market order that cannot be filled is not an
    /// error; it comes back in [`MatchResult::rejection`].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use dark_matcher::{MatchingEngine, Order, Side};
    ///
    /// let mut engine = MatchingEngine::new();
    /// let price = Decimal::new(6000, 0);
    ///
    /// engine.submit(Order::limit(1, Side::Sell, price, Decimal::ONE)).unwrap();
    /// let result = engine.submit(Order::limit(2, Side::Buy, price, Decimal::ONE)).unwrap();
    ///
    /// assert_eq!(result.trades.len(), 1);
    /// assert!(engine.book().is_empty());
    /// ```
    pub fn submit(&mut self, order: Order) -> Result<MatchResult> {
        if let Err(err) = order.validate() {
            warn!(order_id = order.id, error = %err, "invalid order");
            return Err(err);
        }

        debug!(
            order_id = order.id,
            side = %order.side,
            kind = %order.kind,
            volume = %order.volume,
            "submit"
        );

        let result = match order.kind {
            OrderKind::Limit { .. } => self.submit_limit(order),
            OrderKind::Market => self.submit_market(order),
        };

        debug!(
            trades = result.trades.len(),
            rejected = result.is_rejected(),
            "submit done"
        );

        Ok(result)
    }

    fn submit_limit(&mut self, mut order: Order) -> MatchResult {
        let trades = match order.side {
            Side::Buy => match_against(&mut order, self.book.asks_mut()),
            Side::Sell => match_against(&mut order, self.book.bids_mut()),
        };

        if order.rests() {
            trace!(order_id = order.id, volume = %order.volume, "resting");
            self.book.rest(order);
        }

        MatchResult {
            trades,
            rejection: None,
        }
    }

    fn submit_market(&mut self, order: Order) -> MatchResult {
        match order.side {
            Side::Buy => fill_market(order, self.book.asks_mut()),
            Side::Sell => fill_market(order, self.book.bids_mut()),
        }
    }

    /// Remove a resting order, matched by side, price and id.
    ///
    /// Returns `None` when nothing matching is resting (filled, already
    /// cancelled, never submitted, or a market order).
    pub fn cancel(&mut self, order: &Order) -> Option<Order> {
        let removed = self.book.remove(order);

        match &removed {
            Some(_) => debug!(order_id = order.id, side = %order.side, "cancelled"),
            None => debug!(order_id = order.id, side = %order.side, "cancel: not resting"),
        }

        removed
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    #[inline]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Resting orders of `side`, best first
    #[inline]
    pub fn ascend(&self, side: Side) -> Ascend<'_> {
        self.book.ascend(side)
    }
}

// ============================================================================
// Matching
// ============================================================================

/// Match `order` against `index` until it is filled or prices stop crossing.
fn match_against<P: Priority>(order: &mut Order, index: &mut PriorityIndex<P>) -> Vec<Trade> {
    let mut trades = Vec::new();

    while order.volume > Decimal::ZERO {
        let Some(resting) = index.peek_min_mut() else {
            break;
        };

        if !orders_match(order, resting) {
            break;
        }

        trades.push(execute(order, resting));
        index.pop_min_if_consumed();
    }

    trades
}

fn fill_market<P: Priority>(mut order: Order, index: &mut PriorityIndex<P>) -> MatchResult {
    if !estimate_market(&order, index) {
        debug!(order_id = order.id, "market order rejected: not enough liquidity or budget");
        return MatchResult::rejected(order);
    }

    let trades = match_against(&mut order, index);

    let rejection = if order.volume > Decimal::ZERO {
        debug!(order_id = order.id, remaining = %order.volume, "market order partially filled");
        Some(order)
    } else {
        None
    };

    MatchResult { trades, rejection }
}

/// Whether `incoming` crosses the best opposite order `resting`.
pub(crate) fn orders_match(incoming: &Order, resting: &Order) -> bool {
    match (incoming.kind, resting.price()) {
        (OrderKind::Market, _) => true,
        (OrderKind::Limit { price }, Some(resting_price)) => match incoming.side {
            Side::Buy => price >= resting_price,
            Side::Sell => price <= resting_price,
        },
        (OrderKind::Limit { .. }, None) => false,
    }
}

/// Walk the opposite side and check that it can fill the whole market order
/// within its locked budget. Read-only.
pub(crate) fn estimate_market<P: Priority>(order: &Order, index: &PriorityIndex<P>) -> bool {
    let requested = order.volume;
    let mut volume = Decimal::ZERO;
    let mut cost = Decimal::ZERO;

    for resting in index.ascend() {
        let price = resting.price_or_zero();
        let needed = requested - volume;
        let take = needed.min(resting.volume);

        // a cost that does not fit in a Decimal exceeds any budget
        let Some(next) = checked_funds(order.side, take, price)
            .ok()
            .and_then(|level| cost.checked_add(level))
        else {
            return false;
        };

        cost = next;
        volume += take;

        if volume >= requested {
            break;
        }
    }

    volume >= requested && cost <= order.locked
}

/// Execute one trade between `incoming` and `resting`, which are known to cross.
pub(crate) fn execute(incoming: &mut Order, resting: &mut Order) -> Trade {
    let amount = incoming.volume.min(resting.volume);

    incoming.volume -= amount;
    resting.volume -= amount;

    let resting_price = resting.price_or_zero();
    let price = match incoming.kind {
        OrderKind::Market => resting_price,
        OrderKind::Limit { .. } if incoming.id > resting.id => resting_price,
        OrderKind::Limit { price } => price,
    };

    let incoming_funds = funds(incoming.side, amount, price);
    let resting_funds = funds(resting.side, amount, price);

    incoming.locked -= incoming_funds;
    resting.locked -= resting_funds;

    incoming.received += resting_funds;
    resting.received += incoming_funds;

    trace!(
        taker = incoming.id,
        maker = resting.id,
        amount = %amount,
        price = %price,
        "trade"
    );

    Trade::between(incoming, resting, amount, price)
}

// ============================================================================
// Unit Tests
// ============================================================================
