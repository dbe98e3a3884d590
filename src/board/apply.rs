//! Producing successor states.

use once_cell::sync::OnceCell;

use super::state::{Placement, RepetitionTable};
use super::terminal::{DrawReason, Outcome, REPETITION_LIMIT};
use super::{BoardState, CastleSide, CastlingRights, ChessError, Color, Move, Piece, Square};

/// What a move did to the placement.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MoveEffect {
    pub(crate) piece: Piece,
    pub(crate) captured: Option<(Square, Piece)>,
}

impl Placement {
    /// Relocate the pieces for `mv` played by `us`.
    ///
    /// Returns `None` without touching the masks when `us` has no piece on
    /// the origin square.
    pub(crate) fn play(&mut self, mv: Move, us: Color) -> Option<MoveEffect> {
        let them = us.opposite();
        match mv {
            Move::Normal { from, to } => {
                let (_, piece) = self.piece_at(from).filter(|&(c, _)| c == us)?;
                let captured = self.capture(to, them);
                self.remove_piece(from, us, piece);
                self.set_piece(to, us, piece);
                Some(MoveEffect { piece, captured })
            }
            Move::Castle { color, side } => {
                let (king_from, king_to) = side.king_squares(color);
                let (rook_from, rook_to) = side.rook_squares(color);
                if self.piece_at(king_from) != Some((color, Piece::King)) {
                    return None;
                }
                self.remove_piece(king_from, color, Piece::King);
                self.remove_piece(rook_from, color, Piece::Rook);
                self.set_piece(king_to, color, Piece::King);
                self.set_piece(rook_to, color, Piece::Rook);
                Some(MoveEffect {
                    piece: Piece::King,
                    captured: None,
                })
            }
            Move::EnPassant { from, to } => {
                if self.piece_at(from) != Some((us, Piece::Pawn)) {
                    return None;
                }
                let victim = Square::from_index(from.rank() * 8 + to.file());
                self.remove_piece(victim, them, Piece::Pawn);
                self.remove_piece(from, us, Piece::Pawn);
                self.set_piece(to, us, Piece::Pawn);
                Some(MoveEffect {
                    piece: Piece::Pawn,
                    captured: Some((victim, Piece::Pawn)),
                })
            }
            Move::Promotion { from, to, piece } | Move::PromotionCapture { from, to, piece } => {
                if self.piece_at(from) != Some((us, Piece::Pawn)) {
                    return None;
                }
                let captured = self.capture(to, them);
                self.remove_piece(from, us, Piece::Pawn);
                self.set_piece(to, us, piece);
                Some(MoveEffect {
                    piece: Piece::Pawn,
                    captured,
                })
            }
        }
    }

    fn capture(&mut self, sq: Square, them: Color) -> Option<(Square, Piece)> {
        let (_, piece) = self.piece_at(sq).filter(|&(c, _)| c == them)?;
        self.remove_piece(sq, them, piece);
        Some((sq, piece))
    }
}

/// Clear the right tied to a rook's home square.
fn revoke_rook_home(rights: &mut CastlingRights, sq: Square, color: Color) {
    for side in CastleSide::BOTH {
        if side.rook_squares(color).0 == sq {
            rights.remove(color, side);
        }
    }
}

impl BoardState {
    /// Play a legal move, producing the successor state.
    ///
    /// `self` is left untouched. Moves outside [`BoardState::legal_moves`]
    /// are rejected with `InvalidMove`.
    pub fn apply(&self, mv: Move) -> Result<BoardState, ChessError> {
        if !self.legal_moves().contains(&mv) {
            return Err(ChessError::InvalidMove { mv });
        }
        self.apply_unchecked(mv)
    }

    /// Play a move known to come from the generator, skipping the legality lookup.
    pub(crate) fn apply_unchecked(&self, mv: Move) -> Result<BoardState, ChessError> {
        let us = self.side_to_move;
        let mut board = self.board;
        let effect = board.play(mv, us).ok_or(ChessError::InvalidMove { mv })?;

        let mut castle_rights = self.castle_rights;
        match effect.piece {
            Piece::King => castle_rights.remove_color(us),
            Piece::Rook => revoke_rook_home(&mut castle_rights, mv.from(), us),
            _ => {}
        }
        if let Some((sq, Piece::Rook)) = effect.captured {
            revoke_rook_home(&mut castle_rights, sq, us.opposite());
        }

        let en_passant_target = match mv {
            Move::Normal { from, to }
                if effect.piece == Piece::Pawn && from.rank().abs_diff(to.rank()) == 2 =>
            {
                Some(Square::from_index((from.index() + to.index()) / 2))
            }
            _ => None,
        };

        // Positions before a pawn move or capture can never recur
        let irreversible = effect.piece == Piece::Pawn || effect.captured.is_some();
        let (halfmove_clock, repetitions) = if irreversible {
            (0, RepetitionTable::new())
        } else {
            (self.halfmove_clock + 1, self.repetitions.clone())
        };

        let mut next = BoardState {
            board,
            side_to_move: us.opposite(),
            castle_rights,
            en_passant_target,
            halfmove_clock,
            repetitions,
            turn_number: self.turn_number + 1,
            hash: 0,
            legal: OnceCell::new(),
            winner: OnceCell::new(),
        };
        next.hash = next.compute_hash();
        if next.repetitions.increment(next.hash) >= REPETITION_LIMIT {
            let _ = next
                .winner
                .set(Some(Outcome::Draw(DrawReason::Repetition)));
        }
        Ok(next)
    }
}
