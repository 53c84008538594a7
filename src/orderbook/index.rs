//! Priority index: one side of the book, sorted best-first.
//!
//! ## Ordering
//!
//! The index is a `BTreeMap` whose key encodes price-time priority, so the
//! first entry is always the best counter-order:
//!
//! | Side | Key | First entry |
//! |------|-----|-------------|
//! | Bids | `(Reverse(price), id)` | highest price, then smallest id |
//! | Asks | `(price, id)` | lowest price, then smallest id |
//!
//! Both sides share the same container type, parameterised by a zero-sized
//! [`Priority`] type that supplies the key.
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | insert / remove | O(log n) |
//! | peek best | O(log n) (leftmost leaf) |
//! | ascend step | O(1) amortized |

use std::cmp::Reverse;
use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::types::{Order, Side};

// ============================================================================
// Priority
// ============================================================================

/// Side-specific sort key for a [`PriorityIndex`].
pub trait Priority {
    /// Total order over resting orders; smallest key = best order.
    type Key: Ord + Clone + fmt::Debug;

    /// Side whose orders this index holds
    const SIDE: Side;

    fn key(order: &Order) -> Self::Key;
}

/// Bids: highest price first, then earliest id.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidPriority;

impl Priority for BidPriority {
    type Key = (Reverse<Decimal>, u64);
    const SIDE: Side = Side::Buy;

    #[inline]
    fn key(order: &Order) -> Self::Key {
        (Reverse(order.price_or_zero()), order.id)
    }
}

/// Asks: lowest price first, then earliest id.
#[derive(Debug, Clone, Copy, Default)]
pub struct AskPriority;

impl Priority for AskPriority {
    type Key = (Decimal, u64);
    const SIDE: Side = Side::Sell;

    #[inline]
    fn key(order: &Order) -> Self::Key {
        (order.price_or_zero(), order.id)
    }
}

// ============================================================================
// PriorityIndex
// ============================================================================

/// Resting orders of one side, in price-time priority.
pub struct PriorityIndex<P: Priority> {
    entries: BTreeMap<P::Key, Order>,
    _priority: PhantomData<P>,
}

/// Bid side of the book
pub type BidIndex = PriorityIndex<BidPriority>;

/// Ask side of the book
pub type AskIndex = PriorityIndex<AskPriority>;

impl<P: Priority> PriorityIndex<P> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            _priority: PhantomData,
        }
    }

    /// Side held by this index
    #[inline]
    pub fn side(&self) -> Side {
        P::SIDE
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a resting order, replacing any entry with the same key.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, order: Order) -> Option<Order> {
        debug_assert_eq!(order.side, P::SIDE, "order inserted into the wrong side");
        debug_assert!(!order.is_market(), "market orders never rest");

        self.entries.insert(P::key(&order), order)
    }

    /// Remove the entry with the same key (price + id) as `order`.
    pub fn remove(&mut self, order: &Order) -> Option<Order> {
        self.entries.remove(&P::key(order))
    }

    #[inline]
    pub fn contains(&self, order: &Order) -> bool {
        self.entries.contains_key(&P::key(order))
    }

    /// Best resting order
    #[inline]
    pub fn peek_min(&self) -> Option<&Order> {
        self.entries.first_key_value().map(|(_, order)| order)
    }

    /// Best resting order, mutable.
    ///
    /// Only volume and funds may change through this reference; price and id
    /// form the key and must stay as they are.
    #[inline]
    pub fn peek_min_mut(&mut self) -> Option<&mut Order> {
        self.entries.first_entry().map(|entry| entry.into_mut())
    }

    /// Remove the best order if it has been fully filled.
    pub fn pop_min_if_consumed(&mut self) -> Option<Order> {
        match self.entries.first_entry() {
            Some(entry) if entry.get().is_filled() => Some(entry.remove()),
            _ => None,
        }
    }

    /// Visit resting orders best-first. Lazy; stop whenever you like.
    pub fn ascend(&self) -> btree_map::Values<'_, P::Key, Order> {
        self.entries.values()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<P: Priority> Default for PriorityIndex<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Priority> fmt::Debug for PriorityIndex<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityIndex")
            .field("side", &P::SIDE)
            .field("orders", &self.entries.len())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
