//! Error types for the protocol layer.
//!
//! When you see a `ProtocolError`, the problem is in encoding or
//! decoding an envelope — not in networking or session state. Decoding
//! errors are always returned to the caller, never thrown past it; the
//! session converts them into a logged diagnostic and carries on.

/// Errors that can occur while encoding or decoding envelopes.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning an envelope into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The payload is not well-formed structured text, or the `type`
    /// field is absent or not a string.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The `type` tag named a known kind but `data` was absent.
    #[error("envelope of kind {kind:?} is missing its data field")]
    MissingData {
        /// The wire tag of the offending envelope.
        kind: String,
    },

    /// Tried to encode an [`Unknown`](crate::Envelope::Unknown) envelope.
    /// Unknown envelopes exist only on the inbound path.
    #[error("cannot encode envelope of unknown kind {0:?}")]
    UnknownKind(String),
}
