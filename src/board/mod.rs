//! Chess board representation and game logic.
//!
//! Uses bitboards for move generation and position evaluation. Supports
//! full chess rules including castling, en passant, promotions, and the
//! fifty-move and threefold-repetition draws.
//!
//! # Example
//! ```
//! use chess_core::board::{BoardState, SearchEngine, SearchLimits};
//!
//! let state = BoardState::initial();
//! println!("Starting position has {} legal moves", state.legal_moves().len());
//!
//! let engine = SearchEngine::new();
//! let result = engine.generate_move(&state, SearchLimits::depth(2))?;
//! let next = state.apply(result.best_move)?;
//! assert_eq!(next.turn_number(), 1);
//! # Ok::<(), chess_core::board::ChessError>(())
//! ```

mod apply;
mod attack_tables;
mod builder;
mod error;
mod eval;
pub mod movegen;
mod pst;
mod search;
mod state;
mod terminal;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::BoardBuilder;
pub use error::ChessError;
pub use state::{BoardState, Placement};
pub use terminal::{outcome, DrawReason, Outcome, FIFTY_MOVE_PLIES, REPETITION_LIMIT};
pub use types::{Bitboard, BitboardIter, CastleSide, CastlingRights, Color, Move, Piece, Square};

// Precomputed attack tables
pub use attack_tables::{build_tables, tables, Ray, Tables};

// Evaluation and search
pub use eval::{evaluate, EvalCache};
pub use movegen::{is_square_attacked, legal, legal_from, perft, pseudo_legal};
pub use search::{
    EngineConfig, SearchEngine, SearchLimits, SearchResult, SearchStats, SearchTables,
};

pub(crate) use types::PROMOTION_PIECES;
