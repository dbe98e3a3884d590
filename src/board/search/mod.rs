//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Alpha-beta minimax, White maximizing and Black minimizing
//! - Children ordered by cached static evaluation
//! - Transposition table keyed by position, depth and side
//! - Fixed-depth or wall-clock bounded iterative deepening
//!
//! The transposition table and evaluation cache belong to a
//! [`SearchEngine`], so separate engines never share results.

mod alphabeta;
mod iterative;
mod move_order;
mod params;

use std::sync::Arc;
use std::time::Duration;

use log::trace;
use parking_lot::Mutex;

use crate::sync::StopFlag;
use crate::tt::TranspositionTable;

use super::{BoardState, ChessError, EvalCache, Move};
pub use params::EngineConfig;

/// Result of an iterative-deepening search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found at the deepest completed depth
    pub best_move: Move,
    /// White-positive score of that move
    pub score: i32,
    /// Deepest depth fully searched
    pub depth: u32,
    /// Nodes visited by that depth's iteration
    pub nodes: u64,
}

/// How long and how deep [`SearchEngine::generate_move`] may search.
///
/// With a time budget the search deepens until the budget runs out, capped
/// by `depth` when given. With only a depth it searches exactly that deep.
/// With neither it searches the configured floor depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub time: Option<Duration>,
    pub depth: Option<u32>,
}

impl SearchLimits {
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            time: None,
            depth: Some(depth),
        }
    }

    #[must_use]
    pub fn time(budget: Duration) -> Self {
        SearchLimits {
            time: Some(budget),
            depth: None,
        }
    }

    /// Cap a time-bounded search at `depth`.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_time(mut self, budget: Duration) -> Self {
        self.time = Some(budget);
        self
    }
}

/// Statistics tracked across searches since the last cache clear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub eval_hits: u64,
    pub eval_misses: u64,
}

/// Caches handed to whichever thread is currently searching.
#[derive(Debug)]
pub struct SearchTables {
    pub(crate) tt: TranspositionTable,
    pub(crate) eval_cache: EvalCache,
    pub(crate) stats: SearchStats,
}

impl SearchTables {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        SearchTables {
            tt: TranspositionTable::new(config.tt_capacity),
            eval_cache: EvalCache::new(config.eval_cache_capacity),
            stats: SearchStats::default(),
        }
    }

    fn clear(&mut self) {
        self.tt.clear();
        self.eval_cache.clear();
        self.stats = SearchStats::default();
    }
}

/// Alpha-beta searcher owning its transposition table and evaluation cache.
#[derive(Debug)]
pub struct SearchEngine {
    config: EngineConfig,
    tables: Arc<Mutex<SearchTables>>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let tables = SearchTables::new(&config);
        SearchEngine {
            config,
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Empty the transposition table and evaluation cache and reset statistics.
    ///
    /// Waits for any abandoned worker still holding the tables to notice its
    /// stop flag.
    pub fn clear_cache(&self) {
        let mut tables = self.tables.lock();
        trace!(
            "clearing {} transposition entries and {} cached evaluations",
            tables.tt.len(),
            tables.eval_cache.len()
        );
        tables.clear();
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        let tables = self.tables.lock();
        SearchStats {
            eval_hits: tables.eval_cache.hits(),
            eval_misses: tables.eval_cache.misses(),
            ..tables.stats
        }
    }

    /// Static evaluation of `state` through the engine's cache.
    pub fn evaluate(&self, state: &BoardState) -> i32 {
        self.tables.lock().eval_cache.evaluate(state)
    }

    /// Alpha-beta search of `state` to `depth` plies within `(alpha, beta)`.
    ///
    /// Returns the white-positive score and the best move, which is `None`
    /// for terminal positions and at depth 0.
    pub fn search(
        &self,
        state: &BoardState,
        depth: u32,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> Result<(i32, Option<Move>), ChessError> {
        let stop = StopFlag::new();
        let mut tables = self.tables.lock();
        let mut searcher = alphabeta::Searcher {
            tables: &mut tables,
            stop: &stop,
            mate_score: self.config.mate_score,
        };
        searcher
            .alphabeta(state, depth, alpha, beta, maximizing)?
            .ok_or_else(|| ChessError::invalid_state("search was stopped"))
    }

    /// Choose a move for the side to move by iterative deepening.
    ///
    /// Fails with `InvalidState` when the game is already over.
    pub fn generate_move(
        &self,
        state: &BoardState,
        limits: SearchLimits,
    ) -> Result<SearchResult, ChessError> {
        if let Some(outcome) = state.outcome() {
            return Err(ChessError::invalid_state(format!(
                "cannot search a finished game ({outcome:?})"
            )));
        }

        let result = match limits.time {
            Some(budget) => {
                let cap = limits.depth.unwrap_or(self.config.max_depth);
                self.deepen_timed(state, budget, cap)?
            }
            None => {
                let target = limits.depth.unwrap_or(self.config.min_depth);
                self.deepen_fixed(state, target)?
            }
        };
        result.ok_or_else(|| ChessError::invalid_state("search produced no result"))
    }
}
