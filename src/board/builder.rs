//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece instead of replaying moves from
//! the starting position.
//!
//! # Example
//! ```
//! use chess_core::board::{BoardBuilder, Color, Piece, Square};
//!
//! let state = BoardBuilder::new()
//!     .piece("e1".parse::<Square>()?, Color::White, Piece::King)
//!     .piece("e8".parse::<Square>()?, Color::Black, Piece::King)
//!     .piece("a2".parse::<Square>()?, Color::White, Piece::Pawn)
//!     .side_to_move(Color::White)
//!     .build()?;
//! assert_eq!(state.legal_moves().len(), 7);
//! # Ok::<(), chess_core::board::ChessError>(())
//! ```

use super::state::Placement;
use super::{
    movegen, BoardState, CastleSide, CastlingRights, ChessError, Color, Piece, Square,
};

/// A fluent builder for constructing validated `BoardState` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Square, Color, Piece)>,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    turn_number: u32,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            turn_number: 0,
        }
    }

    /// Create a builder holding the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let initial = BoardState::initial();
        let mut builder = Self::new().castling(CastlingRights::all());
        for idx in initial.placement().occupied().iter() {
            if let Some((color, piece)) = initial.piece_at(idx) {
                builder.pieces.push((idx, color, piece));
            }
        }
        builder
    }

    /// Place a piece, replacing whatever stood on the square.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self.pieces.push((square, color, piece));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Grant one castling right.
    #[must_use]
    pub fn castle(mut self, color: Color, side: CastleSide) -> Self {
        self.castling_rights.set(color, side);
        self
    }

    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.en_passant_target = Some(target);
        self
    }

    /// Set the halfmove clock (plies since the last pawn move or capture).
    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    /// Set the number of plies already played.
    #[must_use]
    pub const fn turn_number(mut self, turn: u32) -> Self {
        self.turn_number = turn;
        self
    }

    /// Build the position, rejecting layouts no game could reach.
    ///
    /// # Errors
    /// `InvalidState` when a side does not have exactly one king, a pawn
    /// stands on the first or last rank, a castling right has no king and
    /// rook on their home squares, the en-passant target does not follow a
    /// double push, or the side that just moved is in check.
    pub fn build(self) -> Result<BoardState, ChessError> {
        let mut board = Placement::default();
        for &(square, color, piece) in &self.pieces {
            board.set_piece(square, color, piece);
        }
        Self::check_position(
            &board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant_target,
        )?;

        Ok(BoardState::from_parts(
            board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant_target,
            self.halfmove_clock,
            self.turn_number,
        ))
    }

    /// Checks shared by [`build`](Self::build) and deserialization.
    pub(crate) fn check_position(
        board: &Placement,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    ) -> Result<(), ChessError> {
        board.validate()?;

        for color in [Color::White, Color::Black] {
            let kings = board.pieces(color, Piece::King).popcount();
            if kings != 1 {
                return Err(ChessError::invalid_state(format!(
                    "{color} has {kings} kings"
                )));
            }
        }

        if let Some(sq) = board
            .piece_mask(Piece::Pawn)
            .iter()
            .find(|sq| sq.rank() == 0 || sq.rank() == 7)
        {
            return Err(ChessError::invalid_state(format!("pawn on back rank at {sq}")));
        }

        for color in [Color::White, Color::Black] {
            for side in CastleSide::BOTH {
                if !castling_rights.has(color, side) {
                    continue;
                }
                let (king_home, _) = side.king_squares(color);
                let (rook_home, _) = side.rook_squares(color);
                if board.piece_at(king_home) != Some((color, Piece::King))
                    || board.piece_at(rook_home) != Some((color, Piece::Rook))
                {
                    return Err(ChessError::invalid_state(format!(
                        "{color} {side:?} castling right without king and rook at home"
                    )));
                }
            }
        }

        if let Some(target) = en_passant_target {
            Self::check_en_passant(board, target, side_to_move)?;
        }

        if movegen::is_in_check(board, side_to_move.opposite()) {
            return Err(ChessError::invalid_state(format!(
                "{} is in check but not to move",
                side_to_move.opposite()
            )));
        }
        Ok(())
    }

    /// The target must be the empty square a pawn of the side that just
    /// moved skipped over.
    fn check_en_passant(board: &Placement, target: Square, us: Color) -> Result<(), ChessError> {
        let them = us.opposite();
        let skipped_rank = (them.pawn_rank() as isize + them.pawn_step()) as usize;
        let pushed = target.offset(them.pawn_step(), 0);
        let valid = target.rank() == skipped_rank
            && board.piece_at(target).is_none()
            && pushed.is_some_and(|sq| board.piece_at(sq) == Some((them, Piece::Pawn)));
        if valid {
            Ok(())
        } else {
            Err(ChessError::invalid_state(format!(
                "en-passant target {target} does not follow a double pawn push"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn kings() -> BoardBuilder {
        BoardBuilder::new()
            .piece(sq("e1"), Color::White, Piece::King)
            .piece(sq("e8"), Color::Black, Piece::King)
    }

    #[test]
    fn test_starting_position() {
        let built = BoardBuilder::starting_position().build().unwrap();
        assert_eq!(built, BoardState::initial());
        assert_eq!(built.hash(), BoardState::initial().hash());
    }

    #[test]
    fn test_requires_one_king_each() {
        let err = BoardBuilder::new()
            .piece(sq("e1"), Color::White, Piece::King)
            .build()
            .unwrap_err();
        assert!(matches!(err, ChessError::InvalidState { .. }));

        let err = kings()
            .piece(sq("d1"), Color::White, Piece::King)
            .build()
            .unwrap_err();
        assert!(matches!(err, ChessError::InvalidState { .. }));
    }

    #[test]
    fn test_rejects_back_rank_pawn() {
        let err = kings()
            .piece(sq("a8"), Color::White, Piece::Pawn)
            .build()
            .unwrap_err();
        assert!(matches!(err, ChessError::InvalidState { .. }));
    }

    #[test]
    fn test_castling_requires_home_pieces() {
        let err = kings()
            .castle(Color::White, CastleSide::KingSide)
            .build()
            .unwrap_err();
        assert!(matches!(err, ChessError::InvalidState { .. }));

        let state = kings()
            .piece(sq("h1"), Color::White, Piece::Rook)
            .castle(Color::White, CastleSide::KingSide)
            .build()
            .unwrap();
        assert!(state.can_castle(Color::White, CastleSide::KingSide));
    }

    #[test]
    fn test_en_passant_target_checked() {
        let state = kings()
            .piece(sq("d5"), Color::Black, Piece::Pawn)
            .piece(sq("e5"), Color::White, Piece::Pawn)
            .en_passant(sq("d6"))
            .build()
            .unwrap();
        assert_eq!(state.en_passant_target(), Some(sq("d6")));

        let err = kings().en_passant(sq("d6")).build().unwrap_err();
        assert!(matches!(err, ChessError::InvalidState { .. }));
    }

    #[test]
    fn test_side_not_to_move_in_check() {
        let err = kings()
            .piece(sq("e4"), Color::White, Piece::Rook)
            .build()
            .unwrap_err();
        assert!(matches!(err, ChessError::InvalidState { .. }));
    }
}
