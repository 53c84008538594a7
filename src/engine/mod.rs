//! Matching engine module.
//!
//! ## Design Principles
//!
//! The matching engine is designed for:
//!
//! 1. **Determinism**: Same input always produces same output
//! 2. **Exact Decimal Math**: No floating-point operations
//! 3. **Synchronous Execution**: One submission or cancel runs to completion
//! 4. **Price-Time Priority**: Best price first, then smallest id
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - **Partial fills** are supported
//! - **Unfilled limit quantity** rests on the book
//! - **Unfilled market quantity** is returned as a rejection
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use dark_matcher::engine::MatchingEngine;
//! use dark_matcher::types::{Order, Side};
//!
//! let mut engine = MatchingEngine::new();
//! let price = Decimal::new(6000, 0);
//!
//! // Resting sell order
//! engine.submit(Order::limit(1, Side::Sell, price, Decimal::ONE)).unwrap();
//!
//! // Incoming buy order matches it
//! let result = engine.submit(Order::limit(2, Side::Buy, price, Decimal::ONE)).unwrap();
//!
//! assert_eq!(result.trades.len(), 1);
//! assert!(result.rejection.is_none());
//! ```

pub mod matcher;

pub use matcher::{MatchingEngine, MatchResult};
