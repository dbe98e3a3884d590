//! Static evaluation.
//!
//! Scores are in centipawns from White's point of view: positive favours
//! White, negative favours Black. Material is combined with piece-square
//! bonuses tapered between middlegame and endgame tables by the material
//! still on the board.

use std::collections::HashMap;

use super::pst::{MAX_PHASE, PHASE_WEIGHTS, PST_EG, PST_MG};
use super::{BoardState, Color, Piece};

/// Evaluate a position without consulting any cache.
#[must_use]
pub fn evaluate(state: &BoardState) -> i32 {
    let board = state.placement();
    let mut mg = 0;
    let mut eg = 0;
    let mut phase = 0;

    for color in [Color::White, Color::Black] {
        let sign = color.sign();
        for piece in Piece::ALL {
            let p_idx = piece.index();
            for sq in board.pieces(color, piece).iter() {
                let pst_sq = match color {
                    Color::White => sq.index(),
                    Color::Black => sq.index() ^ 56,
                };
                mg += sign * (piece.value() + PST_MG[p_idx][pst_sq]);
                eg += sign * (piece.value() + PST_EG[p_idx][pst_sq]);
                phase += PHASE_WEIGHTS[p_idx];
            }
        }
    }

    let phase = phase.min(MAX_PHASE);
    (mg * phase + eg * (MAX_PHASE - phase)) / MAX_PHASE
}

/// Position-hash keyed memo of static evaluations.
///
/// A position's static score never changes, so entries are never
/// invalidated; the map is emptied only when it reaches capacity or on
/// `clear`.
#[derive(Debug)]
pub struct EvalCache {
    entries: HashMap<u64, i32>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl EvalCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        EvalCache {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached evaluation of `state`, computing and storing it on a miss.
    pub fn evaluate(&mut self, state: &BoardState) -> i32 {
        if let Some(&score) = self.entries.get(&state.hash()) {
            self.hits += 1;
            return score;
        }
        self.misses += 1;
        let score = evaluate(state);
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(state.hash(), score);
        score
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
