//! Move generation.
//!
//! Pseudo-legal moves come from the attack tables; the legal set keeps the
//! ones that do not leave the mover's king attacked, and drops castles whose
//! king start, transit or destination square is attacked.

mod attacks;
mod kings;
mod knights;
mod pawns;
mod sliders;

use sliders::SliderType;

use super::{BoardState, ChessError, Color, Move, Piece, Square};

pub(crate) use attacks::is_in_check;

/// Candidate moves for the side to move, ignoring self-check.
///
/// Pieces are visited pawns, knights, bishops, rooks, queens, king, each by
/// ascending square index, so the order is stable for a given position.
#[must_use]
pub fn pseudo_legal(state: &BoardState) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    let us = state.side_to_move;

    for from in state.board.pieces(us, Piece::Pawn).iter() {
        state.generate_pawn_moves(from, &mut moves);
    }
    for from in state.board.pieces(us, Piece::Knight).iter() {
        state.generate_knight_moves(from, &mut moves);
    }
    for from in state.board.pieces(us, Piece::Bishop).iter() {
        state.generate_slider_moves(from, SliderType::Bishop, &mut moves);
    }
    for from in state.board.pieces(us, Piece::Rook).iter() {
        state.generate_slider_moves(from, SliderType::Rook, &mut moves);
    }
    for from in state.board.pieces(us, Piece::Queen).iter() {
        state.generate_slider_moves(from, SliderType::Queen, &mut moves);
    }
    for from in state.board.pieces(us, Piece::King).iter() {
        state.generate_king_moves(from, &mut moves);
    }
    moves
}

pub(crate) fn generate_legal(state: &BoardState) -> Vec<Move> {
    let us = state.side_to_move;
    let them = us.opposite();

    pseudo_legal(state)
        .into_iter()
        .filter(|&mv| {
            if let Move::Castle { color, side } = mv {
                if side
                    .king_path(color)
                    .iter()
                    .any(|&sq| state.board.is_square_attacked(sq, them))
                {
                    return false;
                }
            }
            let mut board = state.board;
            board.play(mv, us).is_some() && !is_in_check(&board, us)
        })
        .collect()
}

/// Legal moves for the side to move (memoized on the state).
#[must_use]
pub fn legal(state: &BoardState) -> Vec<Move> {
    state.legal_moves().to_vec()
}

/// Legal moves leaving the square with the given index.
pub fn legal_from(state: &BoardState, index: usize) -> Result<Vec<Move>, ChessError> {
    let from = Square::new(index)?;
    Ok(state
        .legal_moves()
        .iter()
        .copied()
        .filter(|mv| mv.from() == from)
        .collect())
}

/// Whether any piece of the side `by` attacks the square with the given index.
pub fn is_square_attacked(
    state: &BoardState,
    index: usize,
    by: Color,
) -> Result<bool, ChessError> {
    let sq = Square::new(index)?;
    Ok(state.board.is_square_attacked(sq, by))
}

/// Count leaf nodes of the legal move tree to the given depth.
///
/// # Errors
/// Any error raised while applying a generated move stops the count.
pub fn perft(state: &BoardState, depth: u32) -> Result<u64, ChessError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = state.legal_moves();
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    moves.iter().try_fold(0u64, |nodes, &mv| {
        let child = state.apply_unchecked(mv)?;
        Ok(nodes + perft(&child, depth - 1)?)
    })
}
