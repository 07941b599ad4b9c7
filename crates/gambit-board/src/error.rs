//! Error types for the board layer.

use crate::Square;

/// Ways a non-empty board payload can be rejected.
///
/// Any of these means the whole payload is discarded and the previous
/// board is kept — a board update is all-or-nothing, never partial.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A cell descriptor didn't have exactly three fields.
    #[error("cell descriptor {0:?} must be square,colour,kind")]
    MalformedCell(String),

    /// The square token wasn't algebraic `a1`..`h8`.
    #[error("invalid square {0:?}")]
    InvalidSquare(String),

    /// The colour token wasn't `White` or `Black`.
    #[error("unknown colour {0:?}")]
    UnknownColour(String),

    /// The piece token wasn't one of the six chess piece kinds.
    #[error("unknown piece kind {0:?}")]
    UnknownPieceKind(String),

    /// Two descriptors named the same square. At most one piece may
    /// occupy a square, so the payload as a whole is invalid.
    #[error("duplicate piece on square {0}")]
    DuplicateSquare(Square),
}
