//! Castling rights and castle geometry.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;
use crate::board::error::ChessError;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

const KING_FILE: usize = 4;

/// Which rook the king castles with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// King origin and destination
    #[must_use]
    pub fn king_squares(self, color: Color) -> (Square, Square) {
        let to_file = match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        };
        (home(color, KING_FILE), home(color, to_file))
    }

    /// Rook origin and destination
    #[must_use]
    pub fn rook_squares(self, color: Color) -> (Square, Square) {
        match self {
            CastleSide::KingSide => (home(color, 7), home(color, 5)),
            CastleSide::QueenSide => (home(color, 0), home(color, 3)),
        }
    }

    /// Squares strictly between king and rook, all of which must be empty
    #[must_use]
    pub fn between_mask(self, color: Color) -> u64 {
        let files: &[usize] = match self {
            CastleSide::KingSide => &[5, 6],
            CastleSide::QueenSide => &[1, 2, 3],
        };
        files.iter().fold(0, |mask, &f| mask | home(color, f).bit())
    }

    /// Start, transit and destination squares of the king; none may be attacked
    #[must_use]
    pub fn king_path(self, color: Color) -> [Square; 3] {
        match self {
            CastleSide::KingSide => [home(color, 4), home(color, 5), home(color, 6)],
            CastleSide::QueenSide => [home(color, 4), home(color, 3), home(color, 2)],
        }
    }
}

fn home(color: Color, file: usize) -> Square {
    Square::from_index(color.home_rank() * 8 + file)
}

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8"))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit_for(color, side) != 0
    }

    /// Set a specific castling right
    #[inline]
    pub fn set(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::bit_for(color, side);
    }

    /// Remove a specific castling right
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::bit_for(color, side);
    }

    /// Remove both rights of one color
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::KingSide);
        self.remove(color, CastleSide::QueenSide);
    }

    /// Get the raw bitmask value (for Zobrist hashing)
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    const fn bit_for(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => CASTLE_WHITE_K,
            (Color::White, CastleSide::QueenSide) => CASTLE_WHITE_Q,
            (Color::Black, CastleSide::KingSide) => CASTLE_BLACK_K,
            (Color::Black, CastleSide::QueenSide) => CASTLE_BLACK_Q,
        }
    }
}

impl TryFrom<u8> for CastlingRights {
    type Error = ChessError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits & !ALL_CASTLING_RIGHTS != 0 {
            return Err(ChessError::invalid_state(format!(
                "castling bits {bits:#06b} outside the four rights"
            )));
        }
        Ok(CastlingRights(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rights_only_clear() {
        let mut rights = CastlingRights::all();
        rights.remove(Color::White, CastleSide::KingSide);
        assert!(!rights.has(Color::White, CastleSide::KingSide));
        assert!(rights.has(Color::White, CastleSide::QueenSide));
        rights.remove_color(Color::Black);
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(!rights.has(Color::Black, CastleSide::QueenSide));
        assert_eq!(rights.as_u8(), CASTLE_WHITE_Q);
    }

    #[test]
    fn test_rights_from_bits() {
        assert_eq!(CastlingRights::try_from(ALL_CASTLING_RIGHTS), Ok(CastlingRights::all()));
        assert!(CastlingRights::try_from(1 << 4).is_err());
    }

    #[test]
    fn test_castle_geometry() {
        let (from, to) = CastleSide::KingSide.king_squares(Color::White);
        assert_eq!((from.to_string(), to.to_string()), ("e1".into(), "g1".into()));
        let (from, to) = CastleSide::QueenSide.rook_squares(Color::Black);
        assert_eq!((from.to_string(), to.to_string()), ("a8".into(), "d8".into()));
        assert_eq!(CastleSide::QueenSide.between_mask(Color::White).count_ones(), 3);
        let path = CastleSide::QueenSide.king_path(Color::White);
        assert_eq!(path[2].to_string(), "c1");
    }
}
