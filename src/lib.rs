pub mod board;
pub mod game;
mod sync;
pub mod tt;
mod zobrist;

pub use board::{BoardState, ChessError, Color, Move, Outcome, Piece, SearchEngine, Square};
pub use game::{apply_move, generate_move, get_moves, get_winner, new_game};
pub use tt::TranspositionTable;
