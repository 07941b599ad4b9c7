//! Error types for the session layer.
//!
//! Note what is NOT here: inbound decode failures and malformed board
//! payloads never become a `SessionError`. Those are recovered inside
//! the session — logged, counted in [`SessionMetrics`](crate::SessionMetrics),
//! and the session carries on. Only *caller-initiated* operations
//! surface errors.

use gambit_protocol::ProtocolError;

/// Errors returned by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An outbound operation was attempted with no live, open channel.
    /// Recoverable: the caller may connect and retry.
    #[error("not connected to the server")]
    NotConnected,

    /// The chat message exceeds the configured outbound bound.
    #[error("chat message of {len} bytes exceeds the {max} byte limit")]
    ChatTooLong {
        /// Length of the offending message.
        len: usize,
        /// The configured limit.
        max: usize,
    },

    /// Encoding an outbound envelope failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
