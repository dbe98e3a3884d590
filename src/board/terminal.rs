//! Game outcome detection.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{movegen, BoardState, Color, Move};

/// Plies without a pawn move or capture that force a draw (fifty full moves)
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Occurrences of one position that force a draw
pub const REPETITION_LIMIT: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    Repetition,
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// The given side delivered checkmate
    Win(Color),
    Draw(DrawReason),
}

impl Outcome {
    /// +1 White win, -1 Black win, 0 draw
    #[must_use]
    pub const fn score(self) -> i32 {
        match self {
            Outcome::Win(color) => color.sign(),
            Outcome::Draw(_) => 0,
        }
    }

    #[must_use]
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Win(color) => Some(color),
            Outcome::Draw(_) => None,
        }
    }
}

/// Decide whether the game is over, given the state's legal moves.
#[must_use]
pub fn outcome(state: &BoardState, legal_moves: &[Move]) -> Option<Outcome> {
    if state.halfmove_clock >= FIFTY_MOVE_PLIES {
        return Some(Outcome::Draw(DrawReason::FiftyMoveRule));
    }
    // Already forced by apply; the count lookup also covers deserialized states
    if state.repetition_count() >= REPETITION_LIMIT {
        return Some(Outcome::Draw(DrawReason::Repetition));
    }
    if legal_moves.is_empty() {
        let us = state.side_to_move;
        return if movegen::is_in_check(&state.board, us) {
            Some(Outcome::Win(us.opposite()))
        } else {
            Some(Outcome::Draw(DrawReason::Stalemate))
        };
    }
    None
}
