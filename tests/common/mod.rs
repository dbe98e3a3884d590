//! Shared helpers for integration tests.

#![allow(dead_code)]

use chess_core::board::{BoardBuilder, BoardState, CastlingRights, Color, Move, Piece, Square};

/// Position from eight rows of piece letters, eighth rank first.
///
/// Uppercase is White, lowercase Black, `.` an empty square.
pub fn from_rows<S: AsRef<str>>(rows: &[S], side: Color, rights: CastlingRights) -> BoardState {
    assert_eq!(rows.len(), 8, "a board has 8 ranks");
    let mut builder = BoardBuilder::new().side_to_move(side).castling(rights);
    for (rank, row) in rows.iter().enumerate() {
        for (file, ch) in row.as_ref().chars().enumerate() {
            let Some(piece) = Piece::from_char(ch) else {
                continue;
            };
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            builder = builder.piece(Square::from_coords(rank, file).unwrap(), color, piece);
        }
    }
    builder.build().expect("test position must be valid")
}

/// The legal move printed as `text` in coordinate notation.
pub fn find_move(state: &BoardState, text: &str) -> Move {
    state
        .legal_moves()
        .iter()
        .copied()
        .find(|mv| mv.to_string() == text)
        .unwrap_or_else(|| panic!("expected legal move {text}"))
}

/// Play a sequence of coordinate-notation moves from `state`.
pub fn play(state: &BoardState, moves: &[&str]) -> BoardState {
    moves.iter().fold(state.clone(), |current, text| {
        let mv = find_move(&current, text);
        current.apply(mv).unwrap()
    })
}
