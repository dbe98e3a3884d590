//! Minimax with alpha-beta pruning over immutable states.

use super::move_order::ordered_children;
use super::SearchTables;
use crate::board::{BoardState, ChessError, Move, Outcome};
use crate::sync::StopFlag;
use crate::tt::{BoundType, TTEntry, TTKey};

/// Score and best move of a searched node, or `None` once the stop flag fired.
pub(super) type NodeResult = Result<Option<(i32, Option<Move>)>, ChessError>;

/// One search pass holding the tables for its whole duration.
pub(super) struct Searcher<'a> {
    pub(super) tables: &'a mut SearchTables,
    pub(super) stop: &'a StopFlag,
    pub(super) mate_score: i32,
}

impl Searcher<'_> {
    /// Mates found with more depth remaining are nearer the root and score higher.
    fn terminal_score(&self, outcome: Outcome, depth: u32) -> i32 {
        let magnitude = self.mate_score.saturating_add(depth as i32);
        outcome.score() * magnitude
    }

    pub(super) fn alphabeta(
        &mut self,
        state: &BoardState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> NodeResult {
        if self.stop.is_stopped() {
            return Ok(None);
        }
        self.tables.stats.nodes += 1;

        if let Some(outcome) = state.outcome() {
            return Ok(Some((self.terminal_score(outcome, depth), None)));
        }
        if depth == 0 {
            return Ok(Some((self.tables.eval_cache.evaluate(state), None)));
        }

        let key = TTKey::new(state.hash(), depth, maximizing);
        if let Some(entry) = self.tables.tt.probe(&key) {
            if entry.usable(alpha, beta) {
                self.tables.stats.tt_hits += 1;
                return Ok(Some((entry.score, entry.best_move)));
            }
        }

        let children = ordered_children(state, &mut self.tables.eval_cache, maximizing)?;
        if children.is_empty() {
            return Ok(Some((self.tables.eval_cache.evaluate(state), None)));
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        for child in children {
            let Some((score, _)) =
                self.alphabeta(&child.state, depth - 1, alpha, beta, !maximizing)?
            else {
                return Ok(None);
            };
            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(child.mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(child.mv);
                }
                beta = beta.min(best_score);
            }
            if beta <= alpha {
                break;
            }
        }

        let bound_type = if best_score <= alpha_orig {
            BoundType::UpperBound
        } else if best_score >= beta_orig {
            BoundType::LowerBound
        } else {
            BoundType::Exact
        };
        self.tables.tt.store(
            key,
            TTEntry {
                score: best_score,
                best_move,
                bound_type,
            },
        );
        Ok(Some((best_score, best_move)))
    }
}
