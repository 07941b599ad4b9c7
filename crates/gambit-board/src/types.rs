//! Placement vocabulary: squares, colours, piece kinds.
//!
//! These types mirror what travels in a `game_state` payload. They all
//! derive serde traits so a rendering layer can snapshot them straight
//! into whatever format it wants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BoardError;

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// One of the 64 board squares.
///
/// Stored as zero-based file and rank (both in `0..8`), parsed from and
/// displayed in algebraic notation: file letter `a`-`h`, rank digit
/// `1`-`8`. So `Square::new(4, 1)` is `e2`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from zero-based file and rank.
    ///
    /// Returns `None` if either coordinate is off the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Zero-based file (`0` = a-file).
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Zero-based rank (`0` = rank 1).
    pub fn rank(&self) -> u8 {
        self.rank
    }
}

impl FromStr for Square {
    type Err = BoardError;

    /// Parses algebraic notation. The file letter is case-insensitive
    /// (`E2` and `e2` are the same square).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidSquare(s.to_string());

        let mut chars = s.chars();
        let (file_ch, rank_ch) = match (chars.next(), chars.next(), chars.next())
        {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(invalid()),
        };

        let file_ch = file_ch.to_ascii_lowercase();
        if !file_ch.is_ascii_lowercase() || !rank_ch.is_ascii_digit() {
            return Err(invalid());
        }

        let file = file_ch as u8 - b'a';
        let rank = (rank_ch as u8).wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(invalid)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            self.rank + 1
        )
    }
}

// ---------------------------------------------------------------------------
// Colour / PieceKind / Piece
// ---------------------------------------------------------------------------

/// Which side a piece belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum Colour {
    Black,
    White,
}

impl FromStr for Colour {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("white") {
            Ok(Colour::White)
        } else if s.eq_ignore_ascii_case("black") {
            Ok(Colour::Black)
        } else {
            Err(BoardError::UnknownColour(s.to_string()))
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::Black => write!(f, "Black"),
            Colour::White => write!(f, "White"),
        }
    }
}

/// The six chess piece kinds.
///
/// Listed here only so payloads can name them — no movement rules or
/// legality attach to these values on the client.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl FromStr for PieceKind {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const KINDS: [(&str, PieceKind); 6] = [
            ("pawn", PieceKind::Pawn),
            ("knight", PieceKind::Knight),
            ("bishop", PieceKind::Bishop),
            ("rook", PieceKind::Rook),
            ("queen", PieceKind::Queen),
            ("king", PieceKind::King),
        ];
        KINDS
            .iter()
            .find(|(name, _)| s.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
            .ok_or_else(|| BoardError::UnknownPieceKind(s.to_string()))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{name}")
    }
}

/// A piece as placed on the board: colour plus kind. Its square is the
/// key it sits under in [`BoardState`](crate::BoardState), not a field
/// here — that's what makes the one-piece-per-square invariant
/// structural.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct Piece {
    pub colour: Colour,
    pub kind: PieceKind,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_new_rejects_off_board() {
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn test_square_parse_corners() {
        let a1: Square = "a1".parse().unwrap();
        assert_eq!((a1.file(), a1.rank()), (0, 0));

        let h8: Square = "h8".parse().unwrap();
        assert_eq!((h8.file(), h8.rank()), (7, 7));
    }

    #[test]
    fn test_square_parse_is_case_insensitive() {
        let upper: Square = "E2".parse().unwrap();
        let lower: Square = "e2".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_square_parse_rejects_bad_input() {
        for bad in ["", "e", "e22", "i1", "e9", "e0", "22", "!2"] {
            let result: Result<Square, _> = bad.parse();
            assert!(
                matches!(result, Err(BoardError::InvalidSquare(_))),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn test_square_display_round_trips() {
        let sq: Square = "c6".parse().unwrap();
        assert_eq!(sq.to_string(), "c6");
    }

    #[test]
    fn test_colour_parse_both_cases() {
        assert_eq!("White".parse::<Colour>().unwrap(), Colour::White);
        assert_eq!("black".parse::<Colour>().unwrap(), Colour::Black);
        assert!(matches!(
            "green".parse::<Colour>(),
            Err(BoardError::UnknownColour(_))
        ));
    }

    #[test]
    fn test_piece_kind_parse_all_six() {
        let kinds = [
            ("Pawn", PieceKind::Pawn),
            ("Knight", PieceKind::Knight),
            ("Bishop", PieceKind::Bishop),
            ("Rook", PieceKind::Rook),
            ("Queen", PieceKind::Queen),
            ("king", PieceKind::King),
        ];
        for (name, expected) in kinds {
            assert_eq!(name.parse::<PieceKind>().unwrap(), expected);
        }
        assert!(matches!(
            "Wizard".parse::<PieceKind>(),
            Err(BoardError::UnknownPieceKind(_))
        ));
    }
}
