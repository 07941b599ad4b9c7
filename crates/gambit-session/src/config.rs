//! Client configuration.

/// Configuration for a client session.
///
/// The endpoint is injected here — the core never computes or guesses a
/// server address. Sensible defaults are provided for local play.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint of the game server.
    pub endpoint: String,

    /// Maximum length, in bytes, of an outbound chat message. Longer
    /// messages are rejected locally before anything is sent. Inbound
    /// chat is accepted as-is; the server is authoritative for what it
    /// relays.
    pub max_chat_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://localhost:3000/ws".to_string(),
            max_chat_len: 1024,
        }
    }
}
