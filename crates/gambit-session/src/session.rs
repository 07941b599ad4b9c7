//! The session state machine.
//!
//! One `Session` is one logical lifetime of the connection-plus-state
//! triad (status, chat, board), from the first connect attempt to final
//! teardown. The async driver above feeds it four kinds of events —
//! local intents (`request_connect`, `send_chat`) and channel events
//! (`handle_open`, `handle_frame`, `handle_close`) — and performs
//! whatever I/O the session hands back.
//!
//! The status state machine:
//!
//! ```text
//!              request_connect()            handle_open(current)
//! Disconnected ────────────────→ Connecting ────────────────────→ Connected
//!       ↑                            │                                │
//!       └────── handle_close(current) ┴────────────────────────────────┘
//! ```
//!
//! There is no terminal state — after any close the session can connect
//! again, minting a fresh channel id. Events tagged with a superseded
//! id are dropped without touching current state.

use std::fmt;

use gambit_board::BoardState;
use gambit_protocol::{Envelope, WireCodec};
use gambit_transport::ChannelId;

use crate::{ChatLog, ClientConfig, SessionError};

// ---------------------------------------------------------------------------
// ConnectionStatus
// ---------------------------------------------------------------------------

/// The connection lifecycle state.
///
/// Exactly one value at any time, owned exclusively by the session.
/// Nothing outside this module ever sets it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No channel. The initial state, and the state after any close.
    #[default]
    Disconnected,

    /// A channel is being dialed; the handshake has not completed.
    /// No timeout applies — a hung dial stays here until the driver
    /// reports a close (a hardening concern, noted and not solved).
    Connecting,

    /// The channel is open and the handshake has been sent.
    Connected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Disconnected => write!(f, "disconnected"),
            ConnectionStatus::Connecting => write!(f, "connecting"),
            ConnectionStatus::Connected => write!(f, "connected"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionMetrics
// ---------------------------------------------------------------------------

/// Counters for faults the session recovers from silently.
///
/// These are the observability sink for everything that is logged but
/// never escalated: the session is designed to survive any single
/// malformed message, and these say how often it had to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionMetrics {
    /// Events that arrived tagged with a superseded channel id.
    pub stale_events: u64,

    /// Inbound frames that failed envelope decoding.
    pub decode_errors: u64,

    /// `game_state` payloads rejected by the board parser.
    pub board_errors: u64,

    /// Frames delivered outside the `Connected` state on the live
    /// channel — impossible by construction, so each one means a
    /// transport contract violation.
    pub invariant_violations: u64,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The client session state machine.
///
/// Generic over the codec so tests (or a future binary format) can swap
/// the wire encoding without touching any transition logic.
pub struct Session<C: WireCodec> {
    codec: C,
    config: ClientConfig,
    status: ConnectionStatus,
    /// The id of the one live (or dialing) channel. Events carrying any
    /// other id are stale.
    current: Option<ChannelId>,
    /// Mint for channel ids; never reused within a session.
    next_channel: u64,
    chat: ChatLog,
    board: BoardState,
    metrics: SessionMetrics,
}

impl<C: WireCodec> Session<C> {
    /// Creates a fresh session: disconnected, empty chat, empty board.
    pub fn new(codec: C, config: ClientConfig) -> Self {
        Self {
            codec,
            config,
            status: ConnectionStatus::Disconnected,
            current: None,
            next_channel: 0,
            chat: ChatLog::new(),
            board: BoardState::new(),
            metrics: SessionMetrics::default(),
        }
    }

    // -- Local intents ----------------------------------------------------

    /// Requests a connection to the configured endpoint.
    ///
    /// In `Disconnected`: mints a fresh [`ChannelId`], moves to
    /// `Connecting`, and returns the id for the driver to dial.
    ///
    /// While already `Connecting` or `Connected` this is a no-op and
    /// returns `None` — calling it twice must never open a second
    /// channel.
    pub fn request_connect(&mut self) -> Option<ChannelId> {
        if self.status != ConnectionStatus::Disconnected {
            tracing::debug!(
                status = %self.status,
                "connect requested while not disconnected; ignoring"
            );
            return None;
        }

        self.next_channel += 1;
        let id = ChannelId::new(self.next_channel);
        self.current = Some(id);
        self.status = ConnectionStatus::Connecting;
        tracing::info!(%id, endpoint = %self.config.endpoint, "connecting");
        Some(id)
    }

    /// Wraps chat text in a `message` envelope and encodes it for the
    /// driver to send.
    ///
    /// # Errors
    /// [`SessionError::NotConnected`] when there is no open channel (the
    /// call has no side effect — the caller can always detect a failed
    /// send), or [`SessionError::ChatTooLong`] past the configured
    /// outbound bound.
    pub fn send_chat(&mut self, text: &str) -> Result<Vec<u8>, SessionError> {
        if self.status != ConnectionStatus::Connected {
            return Err(SessionError::NotConnected);
        }
        if text.len() > self.config.max_chat_len {
            return Err(SessionError::ChatTooLong {
                len: text.len(),
                max: self.config.max_chat_len,
            });
        }

        Ok(self.codec.encode(&Envelope::chat(text))?)
    }

    // -- Channel events ---------------------------------------------------

    /// The channel with the given id finished opening.
    ///
    /// For the current channel this sends the mandatory handshake — the
    /// returned frame is an empty `game_state` request the driver must
    /// send before anything else — and moves to `Connected`. The client
    /// never assumes board state; it always asks.
    ///
    /// A stale id (a superseded dial completing late) returns `None`;
    /// the driver should close that straggler.
    pub fn handle_open(
        &mut self,
        id: ChannelId,
    ) -> Result<Option<Vec<u8>>, SessionError> {
        if self.current != Some(id) {
            self.metrics.stale_events += 1;
            tracing::debug!(%id, "open from a superseded channel; ignoring");
            return Ok(None);
        }

        if self.status != ConnectionStatus::Connecting {
            self.metrics.invariant_violations += 1;
            tracing::error!(
                %id,
                status = %self.status,
                "open on the live channel outside Connecting"
            );
            return Ok(None);
        }

        let handshake = self.codec.encode(&Envelope::handshake())?;
        self.status = ConnectionStatus::Connected;
        tracing::info!(%id, "connected; requesting full board state");
        Ok(Some(handshake))
    }

    /// The channel with the given id closed (cleanly or not).
    ///
    /// For the current channel: back to `Disconnected`, handle cleared.
    /// Chat and board are kept in memory for display, but a later
    /// reconnect always re-requests the full board rather than trusting
    /// what it has. Stale ids are counted and ignored.
    pub fn handle_close(&mut self, id: ChannelId) {
        if self.current != Some(id) {
            self.metrics.stale_events += 1;
            tracing::debug!(%id, "close from a superseded channel; ignoring");
            return;
        }

        self.current = None;
        self.status = ConnectionStatus::Disconnected;
        tracing::info!(%id, "disconnected");
    }

    /// An inbound frame arrived on the channel with the given id.
    ///
    /// Every fault on this path is recovered locally: stale frames are
    /// dropped, undecodable frames are discarded, malformed board
    /// payloads leave the previous board untouched, and unknown
    /// envelope kinds are ignored. Nothing tears the session down.
    pub fn handle_frame(&mut self, id: ChannelId, bytes: &[u8]) {
        if self.current != Some(id) {
            // An old channel's late frame must not mutate current state.
            self.metrics.stale_events += 1;
            tracing::debug!(%id, "frame from a superseded channel; dropping");
            return;
        }

        if self.status != ConnectionStatus::Connected {
            self.metrics.invariant_violations += 1;
            tracing::error!(
                %id,
                status = %self.status,
                "frame on the live channel outside Connected; dropping"
            );
            return;
        }

        let envelope = match self.codec.decode(bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                self.metrics.decode_errors += 1;
                tracing::warn!(%id, error = %e, "discarding undecodable frame");
                return;
            }
        };

        match envelope {
            Envelope::Message { data } => {
                let sequence = self.chat.append(data);
                tracing::debug!(sequence, "chat message appended");
            }
            Envelope::GameState { data } => self.sync_board(&data),
            Envelope::Unknown { kind } => {
                // Forward compatibility: new server message kinds fail
                // closed.
                tracing::debug!(%kind, "ignoring unknown envelope kind");
            }
        }
    }

    /// Applies a `game_state` payload to the board.
    fn sync_board(&mut self, payload: &str) {
        // An empty payload means "no update", never "clear the board" —
        // otherwise a spurious echo of our own handshake would wipe a
        // valid board.
        if payload.is_empty() {
            tracing::debug!("empty game_state payload; board unchanged");
            return;
        }

        match BoardState::parse(payload) {
            Ok(board) => {
                tracing::debug!(pieces = board.len(), "board replaced");
                self.board = board;
            }
            Err(e) => {
                self.metrics.board_errors += 1;
                tracing::warn!(
                    error = %e,
                    "rejecting malformed board payload; previous board kept"
                );
            }
        }
    }

    // -- Read-only views --------------------------------------------------

    /// Current connection status.
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// The chat log, read-only and in arrival order.
    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    /// The board as last synchronized from the server.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Counters for recovered faults.
    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// The id of the live (or dialing) channel, if any.
    pub fn current_channel(&self) -> Option<ChannelId> {
        self.current
    }

    /// The injected configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

// =========================================================================
// Tests
// =========================================================================
