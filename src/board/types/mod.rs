//! Core chess types.
//!
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - board index 0-63, a8 first
//! - `Bitboard` - 64-bit square set
//! - `Move` - tagged move variants
//! - `CastlingRights` and `CastleSide` - castling state and geometry

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::{CastleSide, CastlingRights};
pub use moves::Move;
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use piece::PROMOTION_PIECES;
