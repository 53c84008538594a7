//! # Dark Matcher
//!
//! Price-time priority matching core with exact decimal funds accounting.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, Trade, ExecutionReceipt) and the
//!   JSON-lines wire form
//! - **OrderBook**: Bid and ask priority indexes (`BTreeMap` keyed by price, id)
//! - **Engine**: Deterministic matching of limit and market orders
//! - **Replay**: Drives an engine from a command stream (used by the binary)
//!
//! ## Design Principles
//!
//! 1. **Determinism**: All operations produce identical results for identical inputs
//! 2. **No Floating Point**: All math uses `rust_decimal::Decimal`
//! 3. **Funds Conservation**: Every execution moves exactly what the other side pays
//! 4. **Synchronous Execution**: Single writer, no async, no locks in the core
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use dark_matcher::{MatchingEngine, Order, Side};
//!
//! let mut engine = MatchingEngine::new();
//!
//! engine.submit(Order::limit(1, Side::Sell, Decimal::new(6000, 0), Decimal::new(4, 1))).unwrap();
//! engine.submit(Order::limit(2, Side::Sell, Decimal::new(6000, 0), Decimal::new(5, 1))).unwrap();
//!
//! let result = engine
//!     .submit(Order::limit(3, Side::Buy, Decimal::new(6000, 0), Decimal::ONE))
//!     .unwrap();
//!
//! let sellers: Vec<u64> = result.trades.iter().map(|t| t.sell.id).collect();
//! assert_eq!(sellers, vec![1, 2]);
//! assert_eq!(engine.book().bid_count(), 1);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error type for invalid input
pub mod error;

/// Core data types: Order, Trade, ExecutionReceipt, wire form
pub mod types;

/// Order book: bid and ask priority indexes
pub mod orderbook;

/// Matching engine: submission, execution, cancellation
pub mod engine;

/// JSON-lines replay driver
pub mod replay;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::EngineError;
pub use types::{ExecutionReceipt, IdSequence, Order, OrderKind, Side, Trade};
pub use orderbook::{OrderBook, PriorityIndex};
pub use engine::{MatchingEngine, MatchResult};
pub use replay::Replayer;
