//! Iterative deepening driver.
//!
//! A fixed-depth request runs every depth from the floor up to the target on
//! the calling thread. A time-bounded request hands each depth to one worker
//! thread and waits on that depth's own channel until the deadline. When the
//! deadline passes first, the worker's stop flag is raised and the worker is
//! detached; whatever it sends later lands in a channel nobody reads.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};
use parking_lot::Mutex;

use super::alphabeta::Searcher;
use super::{SearchEngine, SearchResult, SearchTables};
use crate::board::{BoardState, ChessError, Color, Move};
use crate::sync::StopFlag;

/// Search thread stack size (32 MB to handle deep recursion)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Outcome of one depth iteration as sent back by a worker.
type DepthMessage = Result<Option<SearchResult>, ChessError>;

/// Search `state` to exactly `depth` plies with the tables held throughout.
///
/// Returns `Ok(None)` if `stop` fired before the iteration finished.
pub(super) fn search_depth(
    tables: &mut SearchTables,
    state: &BoardState,
    depth: u32,
    mate_score: i32,
    stop: &StopFlag,
) -> DepthMessage {
    let maximizing = state.side_to_move() == Color::White;
    let nodes_before = tables.stats.nodes;
    let mut searcher = Searcher {
        tables,
        stop,
        mate_score,
    };
    let Some((score, best_move)) =
        searcher.alphabeta(state, depth, i32::MIN, i32::MAX, maximizing)?
    else {
        return Ok(None);
    };
    let nodes = searcher.tables.stats.nodes - nodes_before;
    let best_move = best_move
        .or_else(|| fallback_move(state))
        .ok_or_else(|| ChessError::invalid_state("no legal moves at the search root"))?;
    Ok(Some(SearchResult {
        best_move,
        score,
        depth,
        nodes,
    }))
}

/// First legal move, used when the root search produced no move.
fn fallback_move(state: &BoardState) -> Option<Move> {
    state.legal_moves().first().copied()
}

impl SearchEngine {
    /// Run depths `floor..=target` synchronously and keep the deepest result.
    pub(super) fn deepen_fixed(
        &self,
        state: &BoardState,
        target: u32,
    ) -> Result<Option<SearchResult>, ChessError> {
        let start = Instant::now();
        let stop = StopFlag::new();
        let floor = self.config.min_depth.clamp(1, target.max(1));
        let mut best = None;

        for depth in floor..=target.max(floor) {
            let mut tables = self.tables.lock();
            let result = search_depth(&mut tables, state, depth, self.config.mate_score, &stop)?;
            drop(tables);
            let Some(result) = result else { break };
            log_iteration(&result, start);
            best = Some(result);
        }
        Ok(best)
    }

    /// Deepen under a wall-clock budget, one worker thread per depth.
    ///
    /// The floor depth is always completed, even past the deadline, so a
    /// move is available however small the budget. A proven mate ends the
    /// deepening early since no further depth can improve on it.
    pub(super) fn deepen_timed(
        &self,
        state: &BoardState,
        budget: Duration,
        cap: u32,
    ) -> Result<Option<SearchResult>, ChessError> {
        let start = Instant::now();
        let deadline = start + budget;
        let floor = self.config.min_depth.clamp(1, cap.max(1));
        let mut best: Option<SearchResult> = None;

        for depth in floor..=cap.max(floor) {
            if best.is_some() && Instant::now() >= deadline {
                break;
            }
            let stop = StopFlag::new();
            let rx = self.spawn_depth(state, depth, stop.clone());

            let remaining = deadline.saturating_duration_since(Instant::now());
            let message = match rx.recv_timeout(remaining) {
                Ok(message) => message,
                Err(RecvTimeoutError::Timeout) if best.is_none() => {
                    warn!(
                        "search deadline of {budget:?} expired before depth {depth} completed; \
                         waiting for it"
                    );
                    match rx.recv() {
                        Ok(message) => message,
                        Err(_) => break,
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    stop.stop();
                    debug!("abandoning depth {depth} at deadline");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            };

            let Some(result) = message? else { break };
            log_iteration(&result, start);
            let mate = self.config.is_mate_score(result.score);
            best = Some(result);
            if mate {
                break;
            }
        }
        Ok(best)
    }

    /// Start one depth iteration on a worker thread.
    ///
    /// If no thread can be spawned the iteration runs on the caller before
    /// the receiver is returned.
    fn spawn_depth(
        &self,
        state: &BoardState,
        depth: u32,
        stop: StopFlag,
    ) -> Receiver<DepthMessage> {
        let (tx, rx) = mpsc::channel();
        let tables: Arc<Mutex<SearchTables>> = Arc::clone(&self.tables);
        let worker_state = state.clone();
        let mate_score = self.config.mate_score;

        let spawned = thread::Builder::new()
            .name(format!("search-depth-{depth}"))
            .stack_size(SEARCH_STACK_SIZE)
            .spawn({
                let tx = tx.clone();
                let stop = stop.clone();
                move || {
                    let mut tables = tables.lock();
                    let message =
                        search_depth(&mut tables, &worker_state, depth, mate_score, &stop);
                    drop(tables);
                    // The receiver is gone once the caller has moved on
                    let _ = tx.send(message);
                }
            });

        if let Err(err) = spawned {
            warn!("failed to spawn search worker ({err}); searching depth {depth} inline");
            let mut tables = self.tables.lock();
            let message = search_depth(&mut tables, state, depth, mate_score, &stop);
            drop(tables);
            let _ = tx.send(message);
        }
        rx
    }
}

fn log_iteration(result: &SearchResult, start: Instant) {
    debug!(
        "depth {} score {} move {} nodes {} time {:?}",
        result.depth,
        result.score,
        result.best_move,
        result.nodes,
        start.elapsed()
    );
}
