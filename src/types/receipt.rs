//! Execution receipt for a replayed batch of commands.
//!
//! The receipt summarizes what a batch did to the book and carries the book's
//! state root afterwards, so two replays of the same stream can be compared
//! with a single 32-byte value.

use serde::{Deserialize, Serialize};

/// Summary of a processed batch.
///
/// ## State Root
///
/// `state_root` is the SHA-256 digest of the resting orders in priority order
/// (see [`OrderBook::state_root`](crate::orderbook::OrderBook::state_root)).
///
/// ## Example
///
/// ```
/// use dark_matcher::types::ExecutionReceipt;
///
/// let receipt = ExecutionReceipt::new(1, 10, 4, 1, 0, [0u8; 32]);
/// assert_eq!(receipt.fill_rate(), Some(0.4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    /// Batch sequence number
    pub batch_id: u64,

    /// Number of submissions processed (including rejected and invalid ones)
    pub orders_processed: u64,

    /// Number of trades executed
    pub trades_executed: u64,

    /// Number of successful cancellations
    pub orders_cancelled: u64,

    /// Number of market orders returned as rejections
    pub orders_rejected: u64,

    /// Book digest after the batch (SHA-256, 32 bytes)
    #[serde(with = "hex::serde")]
    pub state_root: [u8; 32],
}

impl ExecutionReceipt {
    pub fn new(
        batch_id: u64,
        orders_processed: u64,
        trades_executed: u64,
        orders_cancelled: u64,
        orders_rejected: u64,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            batch_id,
            orders_processed,
            trades_executed,
            orders_cancelled,
            orders_rejected,
            state_root,
        }
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Check if this receipt represents an empty batch (no orders processed)
    pub fn is_empty(&self) -> bool {
        self.orders_processed == 0
    }

    /// Trades per processed order, `None` for an empty batch.
    pub fn fill_rate(&self) -> Option<f64> {
        if self.orders_processed == 0 {
            None
        } else {
            Some(self.trades_executed as f64 / self.orders_processed as f64)
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_state_root_hex() {
        let receipt = ExecutionReceipt::new(1, 0, 0, 0, 0, [0xAB; 32]);

        let hex = receipt.state_root_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("abab"));
    }

    #[test]
    fn test_receipt_is_empty() {
        assert!(ExecutionReceipt::default().is_empty());
        assert!(!ExecutionReceipt::new(1, 1, 0, 0, 0, [0u8; 32]).is_empty());
    }

    #[test]
    fn test_receipt_fill_rate() {
        let receipt = ExecutionReceipt::new(1, 100, 50, 0, 0, [0u8; 32]);
        assert_eq!(receipt.fill_rate(), Some(0.5));
        assert_eq!(ExecutionReceipt::default().fill_rate(), None);
    }

    #[test]
    fn test_receipt_json_uses_hex_root() {
        let receipt = ExecutionReceipt::new(3, 5, 2, 1, 1, [0x01; 32]);
        let json = serde_json::to_value(&receipt).unwrap();

        assert_eq!(json["state_root"], "01".repeat(32));

        let back: ExecutionReceipt = serde_json::from_value(json).unwrap();
        assert_eq!(back, receipt);
    }
}
