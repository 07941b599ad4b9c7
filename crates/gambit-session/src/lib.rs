//! The session layer: the reactor core of the Gambit chess client.
//!
//! This crate owns the three pieces of client state the rendering layer
//! reads — connection status, chat log, board — behind one explicit
//! state machine, [`Session`]. The rendering layer never mutates any of
//! them directly; it calls [`Session::request_connect`] and
//! [`Session::send_chat`], and everything else arrives as channel
//! events from the transport.
//!
//! # How it fits in the stack
//!
//! ```text
//! Driver (async, above)  ← dials channels, pumps frames, does the I/O
//!     ↕
//! Session Layer (this crate)  ← pure state machine, run-to-completion
//!     ↕
//! Protocol / Board (below)  ← envelope codec, board payload parser
//! ```
//!
//! `Session` is deliberately NOT thread-safe — it's a plain struct
//! owned by a single driver task. Each event handler runs to completion
//! before the next event is dispatched, so status, chat and board never
//! need locking.

mod chat;
mod config;
mod error;
mod session;

pub use chat::{ChatLog, ChatMessage};
pub use config::ClientConfig;
pub use error::SessionError;
pub use session::{ConnectionStatus, Session, SessionMetrics};
