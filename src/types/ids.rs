//! Order id sequence for callers.
//!
//! The engine never generates ids; it only compares them. Callers that need
//! arrival-ordered ids (the replay binary, tests, benchmarks) draw them from an
//! [`IdSequence`].

/// Monotonically increasing order ids, starting at 1 by default.
///
/// ```
/// use dark_matcher::types::IdSequence;
///
/// let mut ids = IdSequence::new();
/// assert_eq!(ids.next_id(), 1);
/// assert_eq!(ids.next_id(), 2);
/// assert_eq!(ids.peek(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Sequence whose first id is `first`
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Get the next id and advance the sequence
    #[inline]
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Get the next id without advancing
    #[inline]
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
