//! Replay of a JSON-lines command stream through a [`MatchingEngine`].
//!
//! Each input line is one [`Command`]; each produces zero or more [`Event`]s.
//! Bad lines never stop a replay: they turn into an `error` event carrying
//! the line number, and the book is left as it was.

use tracing::{debug, warn};

use crate::engine::MatchingEngine;
use crate::types::{Command, Event, ExecutionReceipt, Order, Side};

/// Drives an engine from decoded commands and keeps batch counters.
#[derive(Debug, Default)]
pub struct Replayer {
    engine: MatchingEngine,
    batch_id: u64,
    line: usize,
    orders_processed: u64,
    trades_executed: u64,
    orders_cancelled: u64,
    orders_rejected: u64,
}

impl Replayer {
    pub fn new(batch_id: u64) -> Self {
        Self {
            batch_id,
            ..Self::default()
        }
    }

    #[inline]
    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Decode and apply one input line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn apply_line(&mut self, line: &str) -> Vec<Event> {
        self.line += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Vec::new();
        }

        match serde_json::from_str::<Command>(trimmed) {
            Ok(command) => self.apply(command),
            Err(err) => {
                warn!(line = self.line, error = %err, "undecodable command");
                vec![self.error(err.to_string())]
            }
        }
    }

    /// Apply one decoded command.
    pub fn apply(&mut self, command: Command) -> Vec<Event> {
        match command {
            Command::Submit { order } => {
                self.orders_processed += 1;

                let result = Order::try_from(order).and_then(|order| self.engine.submit(order));
                match result {
                    Ok(result) => {
                        self.trades_executed += result.trades.len() as u64;

                        let mut events: Vec<Event> = result
                            .trades
                            .into_iter()
                            .map(|trade| Event::Trade { trade })
                            .collect();

                        if let Some(order) = result.rejection {
                            self.orders_rejected += 1;
                            events.push(Event::Rejected { order });
                        }

                        events
                    }
                    Err(err) => vec![self.error(err.to_string())],
                }
            }

            Command::Cancel { order } => match Order::try_from(order) {
                Ok(order) => match self.engine.cancel(&order) {
                    Some(order) => {
                        self.orders_cancelled += 1;
                        vec![Event::Cancelled { order }]
                    }
                    None => vec![Event::NotFound { id: order.id }],
                },
                Err(err) => vec![self.error(err.to_string())],
            },

            Command::Book => vec![Event::Book {
                bids: self.engine.ascend(Side::Buy).cloned().collect(),
                asks: self.engine.ascend(Side::Sell).cloned().collect(),
            }],
        }
    }

    /// Summary of everything applied so far, with the current state root.
    pub fn receipt(&self) -> ExecutionReceipt {
        ExecutionReceipt::new(
            self.batch_id,
            self.orders_processed,
            self.trades_executed,
            self.orders_cancelled,
            self.orders_rejected,
            self.engine.book().state_root(),
        )
    }

    fn error(&self, message: String) -> Event {
        debug!(line = self.line, %message, "command failed");
        Event::Error {
            line: self.line,
            message,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
