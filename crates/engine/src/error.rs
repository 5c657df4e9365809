use thiserror::Error;

use crate::types::{Color, Piece, Square};

/// Why a move request was refused. The board is untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// A square string that is not `a1`..`h8`.
    #[error("malformed square notation: {0:?}")]
    MalformedNotation(String),

    #[error("there is no piece on {0}")]
    EmptySource(Square),

    #[error("it is {turn}'s turn, but the piece on {square} is {owner}")]
    WrongTurn {
        square: Square,
        turn: Color,
        owner: Color,
    },

    /// Fails geometry, is blocked, captures its own side, breaks a castling
    /// condition, or leaves the mover's king in check.
    #[error("{piece} cannot move from {from} to {to}")]
    IllegalMove { piece: Piece, from: Square, to: Square },
}
