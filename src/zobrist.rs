//! Zobrist hashing for chess positions.
//!
//! Keys cover piece placement, side to move, castling rights and the
//! en-passant file. Move counters are never hashed.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[piece_type][color][square_index]
    piece_keys: [[[u64; 64]; 2]; 6],
    black_to_move_key: u64,
    // indexed by the CastlingRights bit position
    castling_keys: [u64; 4],
    // en_passant_keys[file_index] (only file matters for EP target)
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // Use a fixed seed for reproducibility
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [0; 4];
        let mut en_passant_keys = [0; 8];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, piece: Piece, color: Color, sq: Square) -> u64 {
        self.piece_keys[piece.index()][color.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn side(&self, side_to_move: Color) -> u64 {
        match side_to_move {
            Color::White => 0,
            Color::Black => self.black_to_move_key,
        }
    }

    pub(crate) fn castling(&self, rights_bits: u8) -> u64 {
        self.castling_keys
            .iter()
            .enumerate()
            .filter(|(bit, _)| rights_bits & (1 << bit) != 0)
            .fold(0, |hash, (_, key)| hash ^ key)
    }

    #[inline]
    pub(crate) fn en_passant(&self, target: Option<Square>) -> u64 {
        target.map_or(0, |sq| self.en_passant_keys[sq.index() % 8])
    }
}

// Initialize Zobrist keys lazily and globally
pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_reproducible() {
        let a = ZobristKeys::new();
        let b = ZobristKeys::new();
        assert_eq!(a.piece_keys, b.piece_keys);
        assert_eq!(a.black_to_move_key, b.black_to_move_key);
    }

    #[test]
    fn test_castling_keys_combine() {
        let keys = &*ZOBRIST;
        assert_eq!(keys.castling(0), 0);
        assert_eq!(
            keys.castling(0b0011),
            keys.castling(0b0001) ^ keys.castling(0b0010)
        );
    }
}
