//! The envelope type — the single unit of the wire protocol.
//!
//! Every frame exchanged with the game server is one envelope:
//!
//! ```text
//! { "type": "game_state" | "message", "data": <string> }
//! ```
//!
//! `type` and `data` are fixed wire identifiers; the server side of the
//! contract depends on them, so they never change casually.

use std::fmt;

/// Wire tag for board-state envelopes.
pub(crate) const KIND_GAME_STATE: &str = "game_state";

/// Wire tag for chat envelopes.
pub(crate) const KIND_MESSAGE: &str = "message";

/// A decoded wire envelope.
///
/// This is a *closed* tagged-variant type: the session matches on it
/// exhaustively, so a new server message kind can never crash the client.
/// Kinds the codec doesn't recognize decode into [`Envelope::Unknown`]
/// instead of failing — a forward-compatibility policy, not an oversight.
/// The session ignores those; new kinds fail closed.
///
/// Envelopes are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// A board-state update (server → client), or a full-state request
    /// when `data` is empty (client → server).
    ///
    /// `data` is a semicolon-delimited board encoding; its grammar is
    /// owned by the board layer, opaque here.
    GameState { data: String },

    /// A chat message. `data` is freeform text.
    Message { data: String },

    /// A syntactically valid envelope whose `type` tag is not one of the
    /// known kinds. Carried for logging; never encoded back out.
    Unknown { kind: String },
}

impl Envelope {
    /// The mandatory handshake: an empty `game_state` envelope asking the
    /// server to send the full board. The client never assumes board
    /// state — it always asks.
    pub fn handshake() -> Self {
        Envelope::GameState {
            data: String::new(),
        }
    }

    /// Wraps chat text in a `message` envelope.
    pub fn chat(text: impl Into<String>) -> Self {
        Envelope::Message { data: text.into() }
    }

    /// The wire tag for this envelope.
    pub fn kind(&self) -> &str {
        match self {
            Envelope::GameState { .. } => KIND_GAME_STATE,
            Envelope::Message { .. } => KIND_MESSAGE,
            Envelope::Unknown { kind } => kind,
        }
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}
