//! Unified error type for the Gambit client.

use gambit_board::BoardError;
use gambit_protocol::ProtocolError;
use gambit_session::SessionError;
use gambit_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `gambit` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum GambitError {
    /// A transport-level error (dial, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, malformed envelope).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (not connected, chat too long).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A board payload parse error.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The client's background task has shut down; the handle is dead.
    #[error("client is shut down")]
    ClientClosed,
}
