//! Game-level entry points for a UI or orchestrator.
//!
//! These wrap the board and search API in the shape a front end drives a
//! game with: start a game, list moves, play one, ask whether the game is
//! over, and let the engine pick a move.

use std::time::Duration;

use crate::board::{
    BoardState, ChessError, Move, Outcome, SearchEngine, SearchLimits,
};

/// The standard starting position.
#[must_use]
pub fn new_game() -> BoardState {
    BoardState::initial()
}

/// Legal moves for the side to move.
#[must_use]
pub fn get_moves(state: &BoardState) -> Vec<Move> {
    state.legal_moves().to_vec()
}

/// Play `mv`, which must come from [`get_moves`] for this state.
pub fn apply_move(state: &BoardState, mv: Move) -> Result<BoardState, ChessError> {
    state.apply(mv)
}

/// The finished game's result, or `None` while play continues.
#[must_use]
pub fn get_winner(state: &BoardState) -> Option<Outcome> {
    state.outcome()
}

/// Ask `engine` for a move under a time budget, a depth, or both.
///
/// Returns the move, its white-positive score and the deepest depth
/// completed.
pub fn generate_move(
    engine: &SearchEngine,
    state: &BoardState,
    time_budget: Option<Duration>,
    depth: Option<u32>,
) -> Result<(Move, i32, u32), ChessError> {
    let limits = SearchLimits {
        time: time_budget,
        depth,
    };
    let result = engine.generate_move(state, limits)?;
    Ok((result.best_move, result.score, result.depth))
}
