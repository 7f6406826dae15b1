//! Error types for board setup and move parsing.

use crate::types::Square;

/// Errors raised while building or mutating a board.
///
/// A bad placement string is a configuration error: callers are expected to
/// abort startup rather than recover from it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid piece symbol '{symbol}' in placement")]
    InvalidPieceSymbol { symbol: char },

    #[error("malformed placement: {reason}")]
    MalformedPlacement { reason: String },

    #[error("invalid square: {text:?}")]
    InvalidSquare { text: String },

    #[error("invalid move: {text:?}")]
    InvalidMove { text: String },

    #[error("invalid color: {text:?}")]
    InvalidColor { text: String },

    #[error("no piece on {square}")]
    EmptySquare { square: Square },
}
