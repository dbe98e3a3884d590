//! Square type and algebraic notation.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::attack_tables::tables;
use crate::board::error::ChessError;

/// A square on the board, stored as its index 0-63.
///
/// Indices are rank-major with rank 0 being the eighth rank: index 0 is a8,
/// index 7 is h8, index 56 is a1 and index 63 is h1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8"))]
pub struct Square(u8);

impl Square {
    /// Create a square from an index, failing outside 0..64
    pub fn new(index: usize) -> Result<Self, ChessError> {
        if index < 64 {
            Ok(Square(index as u8))
        } else {
            Err(ChessError::InvalidSquare { index })
        }
    }

    /// Create a square from a (rank, file) pair, both 0-7
    pub fn from_coords(rank: usize, file: usize) -> Result<Self, ChessError> {
        if rank >= 8 || file >= 8 {
            return Err(ChessError::InvalidSquare {
                index: rank * 8 + file,
            });
        }
        Ok(Square((rank * 8 + file) as u8))
    }

    /// Callers guarantee `idx < 64`.
    #[inline]
    pub(crate) const fn from_index(idx: usize) -> Self {
        debug_assert!(idx < 64);
        Square(idx as u8)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank 0-7, where 0 is the eighth rank (Black's back rank)
    #[inline]
    #[must_use]
    pub fn rank(self) -> usize {
        tables().coords[self.index()].0 as usize
    }

    /// File 0-7, where 0 is the a-file
    #[inline]
    #[must_use]
    pub fn file(self) -> usize {
        tables().coords[self.index()].1 as usize
    }

    /// Single-bit mask for this square
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// Square displaced by (rank, file) deltas, or `None` off the board
    #[must_use]
    pub fn offset(self, dr: isize, df: isize) -> Option<Square> {
        let r = self.rank() as isize + dr;
        let f = self.file() as isize + df;
        if (0..8).contains(&r) && (0..8).contains(&f) {
            Some(Square((r * 8 + f) as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = self.0 / 8;
        let file = self.0 % 8;
        write!(f, "{}{}", (file + b'a') as char, 8 - rank)
    }
}

impl TryFrom<usize> for Square {
    type Error = ChessError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Square::new(index)
    }
}

impl TryFrom<u8> for Square {
    type Error = ChessError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Square::new(index as usize)
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidNotation {
            notation: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = match bytes[0] {
            b'a'..=b'h' => (bytes[0] - b'a') as usize,
            _ => return Err(invalid()),
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => 8 - (bytes[1] - b'0') as usize,
            _ => return Err(invalid()),
        };
        Square::from_coords(rank, file)
    }
}
