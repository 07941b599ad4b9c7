//! # Gambit
//!
//! A WebSocket chess client: the session protocol and state
//! synchronization layer between a chess UI and its game server.
//!
//! Gambit owns the connection lifecycle, the wire protocol, the chat
//! stream, and the synchronized board. A UI talks to one handle,
//! [`ChessClient`], and observes state through cheap immutable
//! [`ClientSnapshot`]s — it never touches a socket or parses a frame.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gambit::prelude::*;
//!
//! # async fn run() -> Result<(), GambitError> {
//! let client = ChessClient::builder()
//!     .endpoint("ws://localhost:3000/ws")
//!     .build();
//!
//! client.connect().await?;
//! client.send_chat("good luck!").await?;
//!
//! let snapshot = client.snapshot();
//! println!("{} pieces on the board", snapshot.board.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use client::{ChessClient, ChessClientBuilder, ClientSnapshot};
pub use error::GambitError;

/// One-stop imports for client applications.
pub mod prelude {
    pub use crate::client::{ChessClient, ChessClientBuilder, ClientSnapshot};
    pub use crate::error::GambitError;
    pub use gambit_board::{BoardState, Colour, Piece, PieceKind, Square};
    pub use gambit_protocol::{Envelope, JsonCodec, WireCodec};
    pub use gambit_session::{
        ChatMessage, ClientConfig, ConnectionStatus, Session, SessionError,
        SessionMetrics,
    };
    pub use gambit_transport::{ChannelId, TransportError};
}
