//! The board state map and the payload parser.

use std::collections::HashMap;
use std::fmt;

use crate::{BoardError, Piece, Square};

/// The local mirror of piece placement.
///
/// A mapping from square to at most one piece; squares not present are
/// empty. The map is *replaced wholesale* on every valid `game_state`
/// payload — no incremental patching, so no intermediate
/// partially-updated state is ever observable.
///
/// The read API is the whole API: only the parser constructs a
/// non-empty board, and only the session swaps one in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pieces: HashMap<Square, Piece>,
}

impl BoardState {
    /// The empty board every session starts with.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a non-empty board payload into a fresh board.
    ///
    /// The grammar is semicolon-separated cell descriptors, each one
    /// `square,colour,kind`:
    ///
    /// ```text
    /// e2,White,Pawn;e7,Black,Pawn
    /// ```
    ///
    /// Tokens are trimmed of ASCII whitespace; empty segments (such as
    /// one left by a trailing `;`) are skipped. Note the caller decides
    /// what an *entirely* empty payload means — for the session it is a
    /// no-op, not a clear-the-board signal, so it never reaches here.
    ///
    /// # Errors
    /// Any malformed descriptor or duplicate square rejects the whole
    /// payload; nothing is partially applied.
    pub fn parse(payload: &str) -> Result<Self, BoardError> {
        let mut pieces = HashMap::new();

        for descriptor in payload.split(';') {
            let descriptor = descriptor.trim();
            if descriptor.is_empty() {
                continue;
            }

            let mut fields = descriptor.split(',');
            let (square, colour, kind) =
                match (fields.next(), fields.next(), fields.next(), fields.next())
                {
                    (Some(sq), Some(col), Some(kind), None) => {
                        (sq.trim(), col.trim(), kind.trim())
                    }
                    _ => {
                        return Err(BoardError::MalformedCell(
                            descriptor.to_string(),
                        ));
                    }
                };

            let square: Square = square.parse()?;
            let piece = Piece {
                colour: colour.parse()?,
                kind: kind.parse()?,
            };

            if pieces.insert(square, piece).is_some() {
                return Err(BoardError::DuplicateSquare(square));
            }
        }

        Ok(Self { pieces })
    }

    /// The piece on the given square, if any.
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.pieces.get(&square)
    }

    /// Iterates over all occupied squares in no particular order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> {
        self.pieces.iter().map(|(sq, p)| (*sq, p))
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// `true` if no square is occupied.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl fmt::Display for BoardState {
    /// Renders the canonical payload encoding, sorted by square so the
    /// output is deterministic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.pieces.iter().collect();
        entries.sort_by_key(|(sq, _)| (sq.rank(), sq.file()));

        for (i, (square, piece)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{square},{},{}", piece.colour, piece.kind)?;
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
