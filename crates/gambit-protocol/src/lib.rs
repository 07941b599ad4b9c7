//! Wire protocol for the Gambit chess client.
//!
//! This crate defines the "language" the client and the game server speak:
//!
//! - **Types** ([`Envelope`]) — the tagged message unit that travels on
//!   the wire, carrying either a chat message or a board-state update.
//! - **Codec** ([`WireCodec`] trait, [`JsonCodec`]) — how envelopes are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw frames) and session
//! (connection state). It doesn't know about channels or board state —
//! it only knows how to serialize and deserialize envelopes.
//!
//! ```text
//! Transport (bytes) → Protocol (Envelope) → Session (status, chat, board)
//! ```

mod codec;
mod envelope;
mod error;

pub use codec::{JsonCodec, WireCodec};
pub use envelope::Envelope;
pub use error::ProtocolError;
