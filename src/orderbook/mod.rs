//! Order book module for the matching core.
//!
//! ## Architecture
//!
//! - [`PriorityIndex`]: one side of the book, a `BTreeMap` keyed for
//!   price-time priority (best order first)
//! - [`OrderBook`]: the bid and ask indexes, book queries, printing and the
//!   state root digest
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(log n) |
//! | Remove order by key | O(log n) |
//! | Best bid/ask | O(log n) |
//! | Ascend | O(1) per step |
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
//!
//! assert_eq!(book.best_bid(), Some(Decimal::new(5000, 0)));
//! ```

pub mod index;
pub mod book;

pub use index::{AskIndex, AskPriority, BidIndex, BidPriority, Priority, PriorityIndex};
pub use book::{Ascend, OrderBook};
