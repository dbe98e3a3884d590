//! Move type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::castling::CastleSide;
use super::piece::{Color, Piece};
use super::square::Square;

/// A move, tagged by kind.
///
/// The moving piece of a `Normal` move is whatever occupies `from` on the
/// board the move is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Move {
    Normal { from: Square, to: Square },
    Castle { color: Color, side: CastleSide },
    /// `to` is the empty square passed over; the captured pawn sits beside `from`.
    EnPassant { from: Square, to: Square },
    Promotion { from: Square, to: Square, piece: Piece },
    PromotionCapture { from: Square, to: Square, piece: Piece },
}

impl Move {
    /// Origin square (the king's square for castling)
    #[must_use]
    pub fn from(self) -> Square {
        match self {
            Move::Normal { from, .. }
            | Move::EnPassant { from, .. }
            | Move::Promotion { from, .. }
            | Move::PromotionCapture { from, .. } => from,
            Move::Castle { color, side } => side.king_squares(color).0,
        }
    }

    /// Destination square (the king's destination for castling)
    #[must_use]
    pub fn to(self) -> Square {
        match self {
            Move::Normal { to, .. }
            | Move::EnPassant { to, .. }
            | Move::Promotion { to, .. }
            | Move::PromotionCapture { to, .. } => to,
            Move::Castle { color, side } => side.king_squares(color).1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        match self {
            Move::Promotion { piece, .. } | Move::PromotionCapture { piece, .. } => Some(piece),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }
}

impl fmt::Display for Move {
    /// Coordinate notation: "e2e4", "e7e8q"; castling prints the king move.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(piece) = self.promotion() {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}
