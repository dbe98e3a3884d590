//! Transposition table for caching search results.
//!
//! Entries are keyed by position hash, remaining depth and which side the
//! node maximizes for. Each entry records whether its score is exact or a
//! bound from an alpha-beta cutoff, so a result found under one window is
//! only reused where it is still valid.

use std::collections::HashMap;

use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TTKey {
    pub hash: u64,
    pub depth: u32,
    pub maximizing: bool,
}

impl TTKey {
    #[must_use]
    pub const fn new(hash: u64, depth: u32, maximizing: bool) -> Self {
        TTKey {
            hash,
            depth,
            maximizing,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub score: i32,
    pub best_move: Option<Move>,
    pub bound_type: BoundType,
}

impl TTEntry {
    /// The stored result if it settles a node searched with `(alpha, beta)`.
    #[must_use]
    pub fn usable(&self, alpha: i32, beta: i32) -> bool {
        match self.bound_type {
            BoundType::Exact => true,
            BoundType::LowerBound => self.score >= beta,
            BoundType::UpperBound => self.score <= alpha,
        }
    }
}

/// Bounded map of search results; emptied when it reaches capacity.
#[derive(Debug)]
pub struct TranspositionTable {
    entries: HashMap<TTKey, TTEntry>,
    capacity: usize,
}

impl TranspositionTable {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        TranspositionTable {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    #[must_use]
    pub fn probe(&self, key: &TTKey) -> Option<TTEntry> {
        self.entries.get(key).copied()
    }

    pub fn store(&mut self, key: TTKey, entry: TTEntry) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.entries.clear();
        }
        self.entries.insert(key, entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: i32, bound_type: BoundType) -> TTEntry {
        TTEntry {
            score,
            best_move: None,
            bound_type,
        }
    }

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(16);
        let key = TTKey::new(42, 3, true);
        tt.store(key, entry(17, BoundType::Exact));
        assert_eq!(tt.probe(&key).map(|e| e.score), Some(17));
        assert_eq!(tt.probe(&TTKey::new(42, 2, true)), None);
        assert_eq!(tt.probe(&TTKey::new(42, 3, false)), None);
    }

    #[test]
    fn test_capacity_clears() {
        let mut tt = TranspositionTable::new(2);
        tt.store(TTKey::new(1, 1, true), entry(0, BoundType::Exact));
        tt.store(TTKey::new(2, 1, true), entry(0, BoundType::Exact));
        tt.store(TTKey::new(3, 1, true), entry(0, BoundType::Exact));
        assert_eq!(tt.len(), 1);
        tt.clear();
        assert!(tt.is_empty());
    }

    #[test]
    fn test_bound_usability() {
        assert!(entry(5, BoundType::Exact).usable(10, 20));
        assert!(entry(25, BoundType::LowerBound).usable(10, 20));
        assert!(!entry(15, BoundType::LowerBound).usable(10, 20));
        assert!(entry(5, BoundType::UpperBound).usable(10, 20));
        assert!(!entry(15, BoundType::UpperBound).usable(10, 20));
    }
}
