//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `movegen.rs` - Perft counts and special-move generation
//! - `draw.rs` - Checkmate, stalemate, repetition and fifty-move outcomes
//! - `eval.rs` - Static evaluation and the evaluation cache
//! - `search.rs` - Alpha-beta and iterative deepening behaviour
//! - `proptest.rs` - Property-based tests over random playouts

mod eval;
mod search;

use super::{BoardBuilder, BoardState, CastlingRights, Color, Move, Piece, Square};

/// Build a position from eight rows of piece letters, eighth rank first.
///
/// Uppercase is White, lowercase Black, `.` an empty square.
pub(super) fn position(rows: [&str; 8], side: Color, rights: CastlingRights) -> BoardState {
    let mut builder = BoardBuilder::new().side_to_move(side).castling(rights);
    for (rank, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), 8, "row {rank} must have 8 squares");
        for (file, ch) in row.chars().enumerate() {
            if ch == '.' {
                continue;
            }
            let piece = Piece::from_char(ch).expect("unknown piece letter");
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let sq = Square::from_coords(rank, file).unwrap();
            builder = builder.piece(sq, color, piece);
        }
    }
    builder.build().expect("test position must be valid")
}

/// The legal move printed as `text` in coordinate notation.
pub(super) fn find_move(state: &BoardState, text: &str) -> Move {
    state
        .legal_moves()
        .iter()
        .copied()
        .find(|mv| mv.to_string() == text)
        .unwrap_or_else(|| panic!("expected legal move {text}"))
}

/// Play a sequence of coordinate-notation moves from `state`.
pub(super) fn play(state: &BoardState, moves: &[&str]) -> BoardState {
    moves.iter().fold(state.clone(), |current, text| {
        let mv = find_move(&current, text);
        current.apply(mv).unwrap()
    })
}
