//! Codec trait and the JSON implementation.
//!
//! A codec converts between [`Envelope`]s and raw bytes. The session
//! doesn't care HOW envelopes are serialized — it just needs something
//! that implements the [`WireCodec`] trait, so a different wire format
//! can be swapped in without touching the state machine.

use serde::{Deserialize, Serialize};

use crate::envelope::{KIND_GAME_STATE, KIND_MESSAGE};
use crate::{Envelope, ProtocolError};

/// Encodes and decodes envelopes.
///
/// `Send + Sync + 'static` because the codec lives inside the session,
/// which is owned by a long-lived Tokio task.
pub trait WireCodec: Send + Sync + 'static {
    /// Serializes an envelope into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnknownKind`] for [`Envelope::Unknown`]
    /// (those exist only on the inbound path), or
    /// [`ProtocolError::Encode`] if serialization itself fails.
    fn encode(&self, envelope: &Envelope) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes into an envelope.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] when the bytes are not
    /// well-formed structured text or the `type` field is absent, and
    /// [`ProtocolError::MissingData`] when a known kind arrives without
    /// its `data` field. An unrecognized-but-well-formed `type` is NOT
    /// an error — it decodes to [`Envelope::Unknown`].
    fn decode(&self, data: &[u8]) -> Result<Envelope, ProtocolError>;
}

/// The raw shape of an envelope on the wire. Decoding goes through this
/// struct first so that an unknown `type` tag can be classified instead
/// of rejected.
#[derive(Debug, Serialize, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

/// A [`WireCodec`] that uses JSON (via `serde_json`).
///
/// The game server speaks JSON text frames, so this is the production
/// codec, not just a debugging aid.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl WireCodec for JsonCodec {
    fn encode(&self, envelope: &Envelope) -> Result<Vec<u8>, ProtocolError> {
        let raw = match envelope {
            Envelope::GameState { data } => RawEnvelope {
                kind: KIND_GAME_STATE.to_string(),
                data: Some(data.clone()),
            },
            Envelope::Message { data } => RawEnvelope {
                kind: KIND_MESSAGE.to_string(),
                data: Some(data.clone()),
            },
            Envelope::Unknown { kind } => {
                return Err(ProtocolError::UnknownKind(kind.clone()));
            }
        };
        serde_json::to_vec(&raw).map_err(ProtocolError::Encode)
    }

    fn decode(&self, data: &[u8]) -> Result<Envelope, ProtocolError> {
        let raw: RawEnvelope =
            serde_json::from_slice(data).map_err(ProtocolError::Decode)?;

        match raw.kind.as_str() {
            KIND_GAME_STATE => match raw.data {
                Some(data) => Ok(Envelope::GameState { data }),
                None => Err(ProtocolError::MissingData { kind: raw.kind }),
            },
            KIND_MESSAGE => match raw.data {
                Some(data) => Ok(Envelope::Message { data }),
                None => Err(ProtocolError::MissingData { kind: raw.kind }),
            },
            _ => Ok(Envelope::Unknown { kind: raw.kind }),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The wire format is an external contract with the game server, so
    //! these tests pin the exact JSON shapes — a mismatch means the
    //! server can't parse our frames.

    use super::*;

    #[test]
    fn test_encode_message_json_shape() {
        let bytes = JsonCodec.encode(&Envelope::chat("hello")).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["type"], "message");
        assert_eq!(json["data"], "hello");
    }

    #[test]
    fn test_encode_handshake_json_shape() {
        // The handshake is an empty game_state request — the empty string
        // is the "send me everything" marker.
        let bytes = JsonCodec.encode(&Envelope::handshake()).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["type"], "game_state");
        assert_eq!(json["data"], "");
    }

    #[test]
    fn test_encode_unknown_returns_error() {
        let result = JsonCodec.encode(&Envelope::Unknown {
            kind: "clock".into(),
        });
        assert!(matches!(
            result,
            Err(ProtocolError::UnknownKind(kind)) if kind == "clock"
        ));
    }

    #[test]
    fn test_decode_message_envelope() {
        let env = JsonCodec
            .decode(br#"{"type":"message","data":"hi"}"#)
            .unwrap();
        assert_eq!(env, Envelope::chat("hi"));
    }

    #[test]
    fn test_decode_game_state_envelope() {
        let env = JsonCodec
            .decode(br#"{"type":"game_state","data":"e2,White,Pawn"}"#)
            .unwrap();
        assert_eq!(
            env,
            Envelope::GameState {
                data: "e2,White,Pawn".into()
            }
        );
    }

    #[test]
    fn test_decode_unknown_kind_is_not_an_error() {
        // Forward compatibility: a new server message kind must decode
        // into Unknown so the session can ignore it, not crash on it.
        let env = JsonCodec
            .decode(br#"{"type":"clock_update","data":"0:05"}"#)
            .unwrap();
        assert_eq!(
            env,
            Envelope::Unknown {
                kind: "clock_update".into()
            }
        );
    }

    #[test]
    fn test_decode_garbage_returns_decode_error() {
        let result = JsonCodec.decode(b"not json at all");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_missing_type_returns_decode_error() {
        let result = JsonCodec.decode(br#"{"data":"hi"}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_non_string_type_returns_decode_error() {
        let result = JsonCodec.decode(br#"{"type":42,"data":"hi"}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_known_kind_without_data_returns_missing_data() {
        let result = JsonCodec.decode(br#"{"type":"message"}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::MissingData { kind }) if kind == "message"
        ));
    }

    #[test]
    fn test_decode_unknown_kind_without_data_is_fine() {
        // Unknown envelopes are ignored anyway; requiring data for them
        // would defeat the forward-compatibility policy.
        let env = JsonCodec.decode(br#"{"type":"ping"}"#).unwrap();
        assert_eq!(env, Envelope::Unknown { kind: "ping".into() });
    }

    #[test]
    fn test_decode_non_string_data_returns_decode_error() {
        let result =
            JsonCodec.decode(br#"{"type":"message","data":[1,2]}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_round_trip_preserves_envelope() {
        let envelope = Envelope::GameState {
            data: "e2,White,Pawn;e7,Black,Pawn".into(),
        };
        let bytes = JsonCodec.encode(&envelope).unwrap();
        let decoded = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(envelope, decoded);
    }
}
