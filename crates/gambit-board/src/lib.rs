//! Board synchronization for the Gambit chess client.
//!
//! The client never computes board state locally — the server is
//! authoritative, and this crate only *mirrors* what the server says.
//! There is deliberately no chess legality anywhere in here: a payload
//! placing two white kings on adjacent squares parses fine. The only
//! structural invariant is that at most one piece occupies a square,
//! enforced by the map key.
//!
//! # Key types
//!
//! - [`Square`], [`Colour`], [`PieceKind`], [`Piece`] — placement vocabulary
//! - [`BoardState`] — the full placement map, replaced wholesale per update
//! - [`BoardError`] — everything a malformed payload can be rejected for

mod error;
mod state;
mod types;

pub use error::BoardError;
pub use state::BoardState;
pub use types::{Colour, Piece, PieceKind, Square};
