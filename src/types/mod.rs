//! Core data types for the matching core
//!
//! ## Types
//!
//! - [`Order`]: An order handed to the engine (limit or market)
//! - [`Side`]: Buy or Sell
//! - [`OrderKind`]: `Limit { price }` or `Market`
//! - [`Trade`]: An executed match between a buy and a sell order
//! - [`ExecutionReceipt`]: Batch execution summary
//! - [`IdSequence`]: Arrival-ordered ids for callers
//!
//! ## Decimal Arithmetic
//!
//! All prices, volumes and funds are `rust_decimal::Decimal` values.
//! See [`price`] for the funds formula and parsing helpers.

mod order;
mod trade;
mod receipt;
mod ids;
pub mod price;
pub mod wire;

// Re-export all types at module level
pub use order::{Order, OrderKind, Side};
pub use trade::Trade;
pub use receipt::ExecutionReceipt;
pub use ids::IdSequence;
pub use wire::{Command, Event, OrderRequest};
