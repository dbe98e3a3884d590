use std::collections::HashMap;

use once_cell::sync::OnceCell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::zobrist::ZOBRIST;

#[cfg(feature = "serde")]
use super::builder::BoardBuilder;

use super::terminal::{self, Outcome};
use super::{movegen, Bitboard, CastleSide, CastlingRights, ChessError, Color, Move, Piece, Square};

/// Piece placement: two color masks and six color-agnostic type masks.
///
/// Every set bit of a type mask is in exactly one color mask, the color
/// masks are disjoint and the type masks partition their union.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub(crate) white: Bitboard,
    pub(crate) black: Bitboard,
    pub(crate) pawns: Bitboard,
    pub(crate) knights: Bitboard,
    pub(crate) bishops: Bitboard,
    pub(crate) rooks: Bitboard,
    pub(crate) queens: Bitboard,
    pub(crate) kings: Bitboard,
}

impl Placement {
    #[inline]
    #[must_use]
    pub fn color_mask(&self, color: Color) -> Bitboard {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece_mask(&self, piece: Piece) -> Bitboard {
        match piece {
            Piece::Pawn => self.pawns,
            Piece::Knight => self.knights,
            Piece::Bishop => self.bishops,
            Piece::Rook => self.rooks,
            Piece::Queen => self.queens,
            Piece::King => self.kings,
        }
    }

    /// Pieces of one type and color
    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.color_mask(color) & self.piece_mask(piece)
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.white | self.black
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let color = if self.white.contains(sq) {
            Color::White
        } else if self.black.contains(sq) {
            Color::Black
        } else {
            return None;
        };
        Piece::ALL
            .into_iter()
            .find(|&piece| self.piece_mask(piece).contains(sq))
            .map(|piece| (color, piece))
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).iter().next()
    }

    fn color_mask_mut(&mut self, color: Color) -> &mut Bitboard {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    fn piece_mask_mut(&mut self, piece: Piece) -> &mut Bitboard {
        match piece {
            Piece::Pawn => &mut self.pawns,
            Piece::Knight => &mut self.knights,
            Piece::Bishop => &mut self.bishops,
            Piece::Rook => &mut self.rooks,
            Piece::Queen => &mut self.queens,
            Piece::King => &mut self.kings,
        }
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.color_mask_mut(color).insert(sq);
        self.piece_mask_mut(piece).insert(sq);
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.color_mask_mut(color).remove(sq);
        self.piece_mask_mut(piece).remove(sq);
    }

    /// Check the mask partition invariants.
    pub fn validate(&self) -> Result<(), ChessError> {
        if !(self.white & self.black).is_empty() {
            return Err(ChessError::invalid_state("a square is both white and black"));
        }
        let mut union = Bitboard::EMPTY;
        for piece in Piece::ALL {
            let mask = self.piece_mask(piece);
            if !(union & mask).is_empty() {
                return Err(ChessError::invalid_state(format!(
                    "{piece} mask overlaps another piece type"
                )));
            }
            union |= mask;
        }
        if union != self.occupied() {
            return Err(ChessError::invalid_state(
                "piece type masks do not match color occupancy",
            ));
        }
        Ok(())
    }
}

/// Occurrence counts of position hashes since the last irreversible move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn new() -> Self {
        RepetitionTable {
            counts: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub(crate) fn increment(&mut self, hash: u64) -> u32 {
        let next = self.get(hash).saturating_add(1);
        self.counts.insert(hash, next);
        next
    }
}

/// An immutable chess position.
///
/// Every move produces a new `BoardState` through [`BoardState::apply`];
/// nothing mutates a state after construction. Legal moves and the game
/// outcome are computed lazily and memoized on the state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StoredBoardState"))]
pub struct BoardState {
    pub(crate) board: Placement,
    pub(crate) side_to_move: Color,
    pub(crate) castle_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) repetitions: RepetitionTable,
    pub(crate) turn_number: u32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) hash: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) legal: OnceCell<Vec<Move>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) winner: OnceCell<Option<Outcome>>,
}

impl BoardState {
    /// The standard starting position.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Placement::default();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            for color in [Color::White, Color::Black] {
                board.set_piece(Square::from_index(color.home_rank() * 8 + file), color, piece);
                board.set_piece(
                    Square::from_index(color.pawn_rank() * 8 + file),
                    color,
                    Piece::Pawn,
                );
            }
        }
        BoardState::from_parts(board, Color::White, CastlingRights::all(), None, 0, 0)
    }

    /// Assemble a state and register its first occurrence.
    pub(crate) fn from_parts(
        board: Placement,
        side_to_move: Color,
        castle_rights: CastlingRights,
        en_passant_target: Option<Square>,
        halfmove_clock: u32,
        turn_number: u32,
    ) -> Self {
        let mut state = BoardState {
            board,
            side_to_move,
            castle_rights,
            en_passant_target,
            halfmove_clock,
            repetitions: RepetitionTable::new(),
            turn_number,
            hash: 0,
            legal: OnceCell::new(),
            winner: OnceCell::new(),
        };
        state.hash = state.compute_hash();
        state.repetitions.increment(state.hash);
        state
    }

    /// Structural hash over placement, rights, en-passant target and side to move.
    pub(crate) fn compute_hash(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut hash = 0u64;
        for color in [Color::White, Color::Black] {
            for piece in Piece::ALL {
                for sq in self.board.pieces(color, piece).iter() {
                    hash ^= keys.piece(piece, color, sq);
                }
            }
        }
        hash ^= keys.side(self.side_to_move);
        hash ^= keys.castling(self.castle_rights.as_u8());
        hash ^= keys.en_passant(self.en_passant_target);
        hash
    }

    /// Position hash; excludes move counters and the cached outcome.
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castle_rights(&self) -> CastlingRights {
        self.castle_rights
    }

    #[inline]
    #[must_use]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castle_rights.has(color, side)
    }

    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// How many times the current position has occurred
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(self.hash)
    }

    #[inline]
    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.board
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.board.piece_at(sq)
    }

    /// Legal moves for the side to move, generated once per state.
    #[must_use]
    pub fn legal_moves(&self) -> &[Move] {
        self.legal.get_or_init(|| movegen::generate_legal(self))
    }

    /// Game outcome, determined once per state.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        *self
            .winner
            .get_or_init(|| terminal::outcome(self, self.legal_moves()))
    }

    /// Whether the side to move is in check
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        movegen::is_in_check(&self.board, self.side_to_move)
    }
}

/// Serialized fields of a [`BoardState`], checked before a state is rebuilt.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct StoredBoardState {
    board: Placement,
    side_to_move: Color,
    castle_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    repetitions: RepetitionTable,
    turn_number: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredBoardState> for BoardState {
    type Error = ChessError;

    fn try_from(stored: StoredBoardState) -> Result<Self, Self::Error> {
        BoardBuilder::check_position(
            &stored.board,
            stored.side_to_move,
            stored.castle_rights,
            stored.en_passant_target,
        )?;
        let mut state = BoardState {
            board: stored.board,
            side_to_move: stored.side_to_move,
            castle_rights: stored.castle_rights,
            en_passant_target: stored.en_passant_target,
            halfmove_clock: stored.halfmove_clock,
            repetitions: stored.repetitions,
            turn_number: stored.turn_number,
            hash: 0,
            legal: OnceCell::new(),
            winner: OnceCell::new(),
        };
        state.hash = state.compute_hash();
        if state.repetitions.get(state.hash) == 0 {
            state.repetitions.increment(state.hash);
        }
        Ok(state)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::initial()
    }
}

impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castle_rights == other.castle_rights
            && self.en_passant_target == other.en_passant_target
            && self.halfmove_clock == other.halfmove_clock
            && self.turn_number == other.turn_number
            && self.repetitions == other.repetitions
    }
}

impl Eq for BoardState {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = BoardState::initial();
        let board = state.placement();
        assert_eq!(board.white.popcount(), 16);
        assert_eq!(board.black.popcount(), 16);
        assert_eq!(board.pawns.popcount(), 16);
        assert_eq!(board.kings.popcount(), 2);
        assert_eq!(
            state.piece_at("e1".parse().unwrap()),
            Some((Color::White, Piece::King))
        );
        assert_eq!(
            state.piece_at("d8".parse().unwrap()),
            Some((Color::Black, Piece::Queen))
        );
        assert_eq!(state.piece_at("e4".parse().unwrap()), None);
        assert!(board.validate().is_ok());
        assert_eq!(state.castle_rights(), CastlingRights::all());
        assert_eq!(state.en_passant_target(), None);
        assert_eq!(state.halfmove_clock(), 0);
        assert_eq!(state.repetition_count(), 1);
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_hash_excludes_counters() {
        let a = BoardState::initial();
        let mut b = BoardState::initial();
        b.turn_number = 40;
        b.halfmove_clock = 12;
        assert_eq!(a.compute_hash(), b.compute_hash());

        let mut c = BoardState::initial();
        c.side_to_move = Color::Black;
        assert_ne!(a.compute_hash(), c.compute_hash());

        let mut d = BoardState::initial();
        d.castle_rights.remove(Color::White, CastleSide::KingSide);
        assert_ne!(a.compute_hash(), d.compute_hash());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let mut board = BoardState::initial().board;
        board.black.insert("e1".parse().unwrap());
        assert!(board.validate().is_err());

        let mut board = BoardState::initial().board;
        board.knights.insert("e1".parse().unwrap());
        assert!(board.validate().is_err());

        let mut board = BoardState::initial().board;
        board.queens.insert("e4".parse().unwrap());
        assert!(board.validate().is_err());
    }
}
