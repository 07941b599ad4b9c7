//! Transport abstraction layer for the Gambit chess client.
//!
//! Provides the [`Dialer`], [`Channel`] and [`Listener`] traits that
//! abstract over the persistent, message-oriented, full-duplex
//! connection to the game server.
//!
//! A dialed connection comes back in two halves: the [`Channel`]
//! (outbound) and the [`Listener`] (inbound). Splitting them means a
//! send never has to wait behind a pending receive — the session's
//! driver keeps the channel and hands the listener to a reader task.
//!
//! Frames are delivered in network arrival order; this layer does no
//! reordering and no deduplication.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketChannel, WebSocketDialer, WebSocketListener};

use std::fmt;

/// Opaque identifier for one dialed channel.
///
/// The session mints a fresh id for every connect attempt and tags all
/// channel events with it, so late events from a superseded channel can
/// be recognized and dropped rather than mutating current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Creates a new `ChannelId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chan-{}", self.0)
    }
}

/// Opens outbound connections to a server endpoint.
pub trait Dialer: Send + Sync + 'static {
    /// The outbound half produced by this dialer.
    type Channel: Channel;
    /// The inbound half produced by this dialer.
    type Listener: Listener;
    /// The error type for dial operations.
    type Error: std::error::Error + Send + Sync;

    /// Dials the endpoint and returns the two connection halves, both
    /// tagged with the caller-supplied id.
    async fn dial(
        &self,
        endpoint: &str,
        id: ChannelId,
    ) -> Result<(Self::Channel, Self::Listener), Self::Error>;
}

/// The outbound half of a connection.
pub trait Channel: Send + Sync + 'static {
    /// The error type for channel operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends one frame to the server.
    ///
    /// Sending on a closed channel fails with an error the caller can
    /// detect — a frame is never silently dropped.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Closes the connection.
    async fn close(&self) -> Result<(), Self::Error>;

    /// The id this channel was dialed with.
    fn id(&self) -> ChannelId;
}

/// The inbound half of a connection.
pub trait Listener: Send + 'static {
    /// The error type for receive operations.
    type Error: std::error::Error + Send + Sync;

    /// Waits for the next inbound frame.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn next_frame(&mut self)
        -> Result<Option<Vec<u8>>, Self::Error>;

    /// The id this listener was dialed with.
    fn id(&self) -> ChannelId;
}
