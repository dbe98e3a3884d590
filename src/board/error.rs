//! Error types for board and search operations.

use std::fmt;

use super::Move;

/// Error type shared by the board, move generator and search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Board index outside 0..64
    InvalidSquare { index: usize },
    /// Square name that is not algebraic notation ("e4")
    InvalidNotation { notation: String },
    /// Move that is not in the current legal set
    InvalidMove { mv: Move },
    /// Position that cannot be searched or does not satisfy the board invariants
    InvalidState { reason: String },
}

impl ChessError {
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        ChessError::InvalidState {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::InvalidSquare { index } => {
                write!(f, "Square index {index} out of bounds (must be 0-63)")
            }
            ChessError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
            ChessError::InvalidMove { mv } => {
                write!(f, "Illegal move '{mv}'")
            }
            ChessError::InvalidState { reason } => {
                write!(f, "Invalid state: {reason}")
            }
        }
    }
}

impl std::error::Error for ChessError {}
