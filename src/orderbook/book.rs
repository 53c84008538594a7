//! Order book: the bid and ask priority indexes side by side.
//!
//! The book only stores and queries resting orders. Matching lives in
//! [`MatchingEngine`](crate::engine::MatchingEngine), which owns a book.
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use dark_matcher::orderbook::OrderBook;
//! use dark_matcher::types::{Order, Side};
//!
//! let mut book = OrderBook::new();
//! book.rest(Order::limit(1, Side::Buy, Decimal::new(5000, 0), Decimal::ONE));
//! book.rest(Order::limit(2, Side::Sell, Decimal::new(5100, 0), Decimal::ONE));
//!
//! assert_eq!(book.best_bid(), Some(Decimal::new(5000, 0)));
//! assert_eq!(book.spread(), Some(Decimal::new(100, 0)));
//! ```

use std::collections::btree_map;
use std::fmt;

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::orderbook::index::{AskIndex, AskPriority, BidIndex, BidPriority, Priority};
use crate::types::{Order, Side};

/// Both sides of the book.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: BidIndex,
    asks: AskIndex,
}

impl OrderBook {
    /// Create a new empty book
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.asks.len()
    }

    /// Total number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    // ========================================================================
    // Index Access (for the matching engine)
    // ========================================================================

    #[inline]
    pub fn bids(&self) -> &BidIndex {
        &self.bids
    }

    #[inline]
    pub fn asks(&self) -> &AskIndex {
        &self.asks
    }

    #[inline]
    pub(crate) fn bids_mut(&mut self) -> &mut BidIndex {
        &mut self.bids
    }

    #[inline]
    pub(crate) fn asks_mut(&mut self) -> &mut AskIndex {
        &mut self.asks
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Place a limit order on its own side, replacing an entry with the same key.
    pub fn rest(&mut self, order: Order) -> Option<Order> {
        match order.side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }
    }

    /// Remove the resting order with the same side, price and id as `order`.
    ///
    /// Market orders never rest, so they are never found.
    pub fn remove(&mut self, order: &Order) -> Option<Order> {
        if order.is_market() {
            return None;
        }

        match order.side {
            Side::Buy => self.bids.remove(order),
            Side::Sell => self.asks.remove(order),
        }
    }

    /// Whether `order` (by side, price and id) is resting.
    pub fn contains(&self, order: &Order) -> bool {
        if order.is_market() {
            return false;
        }

        match order.side {
            Side::Buy => self.bids.contains(order),
            Side::Sell => self.asks.contains(order),
        }
    }

    /// Drop every resting order
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Resting orders of `side`, best first.
    pub fn ascend(&self, side: Side) -> Ascend<'_> {
        match side {
            Side::Buy => Ascend::Bids(self.bids.ascend()),
            Side::Sell => Ascend::Asks(self.asks.ascend()),
        }
    }

    /// Highest bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.peek_min().and_then(Order::price)
    }

    /// Lowest ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.peek_min().and_then(Order::price)
    }

    /// `best_ask - best_bid`, when both sides are present and not crossed
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Aggregated `(price, volume)` for the best `levels` price levels of `side`.
    pub fn depth(&self, side: Side, levels: usize) -> Vec<(Decimal, Decimal)> {
        let mut depth: Vec<(Decimal, Decimal)> = Vec::with_capacity(levels);

        for order in self.ascend(side) {
            let price = order.price_or_zero();

            if let Some((level_price, volume)) = depth.last_mut() {
                if *level_price == price {
                    *volume += order.volume;
                    continue;
                }
            }

            if depth.len() == levels {
                break;
            }
            depth.push((price, order.volume));
        }

        depth
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 digest of every resting order in priority order.
    ///
    /// Decimals are normalized before hashing, so `6000` and `6000.0` hash the
    /// same. Identical command streams always yield identical roots.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        hash_side::<BidPriority>(&mut hasher, self.bids.ascend());
        hash_side::<AskPriority>(&mut hasher, self.asks.ascend());

        let result = hasher.finalize();

        let mut root = [0u8; 32];
        root.copy_from_slice(&result);
        root
    }
}

fn hash_side<'a, P: Priority>(hasher: &mut Sha256, orders: impl Iterator<Item = &'a Order>) {
    hasher.update([P::SIDE as u8]);

    for order in orders {
        hasher.update(order.id.to_be_bytes());
        hasher.update(order.price_or_zero().normalize().serialize());
        hasher.update(order.volume.normalize().serialize());
        hasher.update(order.locked.normalize().serialize());
        hasher.update(order.received.normalize().serialize());
    }
}

impl fmt::Display for OrderBook {
    /// Bids best-first, a blank separator, then asks best-first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for order in self.bids.ascend() {
            writeln!(f, "{}", order)?;
        }

        writeln!(f)?;

        for order in self.asks.ascend() {
            writeln!(f, "{}", order)?;
        }

        Ok(())
    }
}

// ============================================================================
// Ascend
// ============================================================================

/// Best-first iterator over one side of an [`OrderBook`].
pub enum Ascend<'a> {
    Bids(btree_map::Values<'a, <BidPriority as Priority>::Key, Order>),
    Asks(btree_map::Values<'a, <AskPriority as Priority>::Key, Order>),
}

impl<'a> Iterator for Ascend<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Ascend::Bids(iter) => iter.next(),
            Ascend::Asks(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Ascend::Bids(iter) => iter.size_hint(),
            Ascend::Asks(iter) => iter.size_hint(),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
