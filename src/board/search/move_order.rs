//! Move ordering utilities for search.

use super::super::{BoardState, ChessError, EvalCache, Move};

/// A child position reached by one move, with its static score.
pub(super) struct Child {
    pub(super) mv: Move,
    pub(super) state: BoardState,
    pub(super) eval: i32,
}

/// Successors of `state`, best-looking first for the side to move.
///
/// White wants high static scores and Black low ones. The sort is stable so
/// equal scores keep generator order, which keeps search deterministic.
pub(super) fn ordered_children(
    state: &BoardState,
    cache: &mut EvalCache,
    maximizing: bool,
) -> Result<Vec<Child>, ChessError> {
    let mut children = state
        .legal_moves()
        .iter()
        .map(|&mv| {
            let child = state.apply_unchecked(mv)?;
            let eval = cache.evaluate(&child);
            Ok(Child {
                mv,
                state: child,
                eval,
            })
        })
        .collect::<Result<Vec<_>, ChessError>>()?;

    if maximizing {
        children.sort_by(|a, b| b.eval.cmp(&a.eval));
    } else {
        children.sort_by_key(|c| c.eval);
    }
    Ok(children)
}
