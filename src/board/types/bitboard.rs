//! Bitboard type and operations.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::square::Square;

/// A 64-bit bitboard; bit `i` stands for the square with index `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Create a bitboard with a single square set
    #[inline]
    #[must_use]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(sq.bit())
    }

    /// Returns an iterator over the squares set in this bitboard, lowest index first
    #[inline]
    #[must_use]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self.0)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits (population count)
    #[inline]
    #[must_use]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & sq.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= sq.bit();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !sq.bit();
    }
}

/// Iterator over set squares, popping the least significant bit each step.
pub struct BitboardIter(u64);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Square::from_index(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_ascending() {
        let bb = Bitboard(0b1010_0001);
        let squares: Vec<usize> = bb.iter().map(Square::index).collect();
        assert_eq!(squares, vec![0, 5, 7]);
    }

    #[test]
    fn test_insert_remove() {
        let sq = Square::from_index(42);
        let mut bb = Bitboard::EMPTY;
        bb.insert(sq);
        assert!(bb.contains(sq));
        assert_eq!(bb.popcount(), 1);
        bb.remove(sq);
        assert!(bb.is_empty());
    }
}
