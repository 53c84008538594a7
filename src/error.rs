//! Error types for the matching core.
//!
//! Only invalid input is an error. A market order that cannot be filled is a
//! rejection (returned in [`MatchResult`](crate::engine::MatchResult)), and
//! cancelling an order that is not resting is a silent `None`.

use rust_decimal::Decimal;
use thiserror::Error;

/// Input rejected before the engine touched any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// Side text was neither `buy` nor `sell`
    #[error("unknown order side: {0:?}")]
    UnknownSide(String),

    /// Kind text was neither `limit` nor `market`
    #[error("unknown order kind: {0:?}")]
    UnknownKind(String),

    /// A market order arrived with a price other than the zero sentinel
    #[error("market order must not carry a price (got {0})")]
    MarketOrderWithPrice(Decimal),

    #[error("price must not be negative (got {0})")]
    NegativePrice(Decimal),

    #[error("volume must not be negative (got {0})")]
    NegativeVolume(Decimal),

    #[error("locked funds must not be negative (got {0})")]
    NegativeLocked(Decimal),

    #[error("received funds must not be negative (got {0})")]
    NegativeReceived(Decimal),

    /// Market buy without a stated quote budget
    #[error("market buy order must state its locked budget")]
    MissingBudget,

    /// Limit order does not reserve enough to settle its full volume
    #[error("insufficient locked funds: required {required}, locked {locked}")]
    InsufficientLocked { required: Decimal, locked: Decimal },

    /// More decimal places than fills can settle exactly
    #[error("{0} has more than {} decimal places", crate::types::price::MAX_SCALE)]
    TooPrecise(Decimal),

    /// Volume, locked funds or limit notional above the settlement bound
    #[error("{0} exceeds the maximum of {}", crate::types::price::MAX_NOTIONAL)]
    TooLarge(Decimal),

    /// `volume * price` does not fit in a `Decimal`
    #[error("arithmetic overflow computing order funds")]
    Overflow,

    /// Decimal text that failed to parse
    #[error("invalid decimal: {0:?}")]
    InvalidDecimal(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
