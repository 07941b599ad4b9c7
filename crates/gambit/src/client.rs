//! `ChessClient` handle and the background reactor task.
//!
//! This is the entry point for using the Gambit client. It ties
//! together all the layers: transport → protocol → session → board.
//!
//! All mutable state lives inside a single spawned reactor task that
//! owns the [`Session`] state machine outright. The [`ChessClient`]
//! handle is a thin mailbox: intents go in over an mpsc channel, state
//! comes out as immutable [`ClientSnapshot`]s over a watch channel.
//! Nothing is shared, so nothing is locked.

use gambit_board::BoardState;
use gambit_protocol::JsonCodec;
use gambit_session::{
    ChatMessage, ClientConfig, ConnectionStatus, Session, SessionError,
    SessionMetrics,
};
use gambit_transport::{
    Channel, ChannelId, Dialer, Listener, WebSocketChannel, WebSocketDialer,
    WebSocketListener,
};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::GambitError;

/// An immutable view of the client state at one moment.
///
/// Published to subscribers after every state transition. Cloning is
/// cheap enough for a UI to do on every repaint.
#[derive(Debug, Clone, Default)]
pub struct ClientSnapshot {
    /// Where the connection lifecycle currently stands.
    pub status: ConnectionStatus,
    /// The full chat log, in arrival order.
    pub chat: Vec<ChatMessage>,
    /// The board as last synchronized from the server.
    pub board: BoardState,
    /// Counters for faults the session recovered from.
    pub metrics: SessionMetrics,
}

/// A request from the handle to the reactor.
enum Intent {
    Connect,
    SendChat {
        text: String,
        reply: oneshot::Sender<Result<(), GambitError>>,
    },
    Shutdown,
}

/// Something that happened on a channel, tagged with its id.
///
/// The session decides what each event means; a stale id makes the
/// whole event a no-op regardless of its content.
enum ChannelEvent {
    Opened {
        id: ChannelId,
        channel: WebSocketChannel,
        listener: WebSocketListener,
    },
    Frame {
        id: ChannelId,
        bytes: Vec<u8>,
    },
    Closed {
        id: ChannelId,
    },
}

/// Builder for configuring and starting a [`ChessClient`].
///
/// # Example
///
/// ```rust,no_run
/// use gambit::prelude::*;
///
/// # fn demo() {
/// let client = ChessClient::builder()
///     .endpoint("ws://localhost:3000/ws")
///     .max_chat_len(512)
///     .build();
/// # }
/// ```
pub struct ChessClientBuilder {
    config: ClientConfig,
}

impl ChessClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Sets the WebSocket endpoint to connect to.
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.config.endpoint = endpoint.to_string();
        self
    }

    /// Sets the maximum outbound chat message length in bytes.
    pub fn max_chat_len(mut self, max: usize) -> Self {
        self.config.max_chat_len = max;
        self
    }

    /// Builds the client and spawns its reactor task.
    ///
    /// Must be called within a Tokio runtime. The client starts
    /// disconnected; call [`ChessClient::connect`] to dial.
    pub fn build(self) -> ChessClient {
        let (intents_tx, intents_rx) = mpsc::channel(32);
        let (events_tx, events_rx) = mpsc::channel(64);
        let (snapshots_tx, snapshots_rx) =
            watch::channel(ClientSnapshot::default());

        let reactor = Reactor {
            session: Session::new(JsonCodec, self.config),
            dialer: WebSocketDialer,
            intents: intents_rx,
            events_tx,
            events_rx,
            live: None,
            snapshots: snapshots_tx,
        };
        let task = tokio::spawn(reactor.run());

        ChessClient {
            intents: intents_tx,
            snapshots: snapshots_rx,
            task,
        }
    }
}

impl Default for ChessClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running chess client.
///
/// Cheap to use from any task; all methods go through the reactor's
/// mailbox. Dropping the handle shuts the reactor down (its mailbox
/// closes), but [`shutdown()`](Self::shutdown) is the tidy way out.
pub struct ChessClient {
    intents: mpsc::Sender<Intent>,
    snapshots: watch::Receiver<ClientSnapshot>,
    task: JoinHandle<()>,
}

impl ChessClient {
    /// Creates a new builder.
    pub fn builder() -> ChessClientBuilder {
        ChessClientBuilder::new()
    }

    /// Asks the reactor to connect to the configured endpoint.
    ///
    /// Idempotent: while a connection attempt is in flight or a channel
    /// is open this does nothing. Returns once the request is queued —
    /// watch [`subscribe()`](Self::subscribe) for the status change.
    pub async fn connect(&self) -> Result<(), GambitError> {
        self.intents
            .send(Intent::Connect)
            .await
            .map_err(|_| GambitError::ClientClosed)
    }

    /// Sends a chat message, waiting until it has been handed to the
    /// transport.
    ///
    /// # Errors
    /// [`SessionError::NotConnected`] (wrapped) when there is no open
    /// channel, [`SessionError::ChatTooLong`] past the configured
    /// bound, or a transport error if the send itself fails.
    pub async fn send_chat(&self, text: &str) -> Result<(), GambitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.intents
            .send(Intent::SendChat {
                text: text.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| GambitError::ClientClosed)?;
        reply_rx.await.map_err(|_| GambitError::ClientClosed)?
    }

    /// Subscribes to state changes.
    ///
    /// The receiver yields a fresh [`ClientSnapshot`] after every
    /// transition the reactor processes.
    pub fn subscribe(&self) -> watch::Receiver<ClientSnapshot> {
        self.snapshots.clone()
    }

    /// Returns the current state without waiting.
    pub fn snapshot(&self) -> ClientSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Shuts the client down: closes any open channel and waits for
    /// the reactor task to finish.
    pub async fn shutdown(self) {
        let _ = self.intents.send(Intent::Shutdown).await;
        let _ = self.task.await;
    }
}

// ---------------------------------------------------------------------------
// Reactor
// ---------------------------------------------------------------------------

/// One iteration's worth of input, pulled out of `select!` so the
/// handlers can borrow `self` mutably without fighting the macro.
enum Step {
    Intent(Option<Intent>),
    Event(Option<ChannelEvent>),
}

/// The background task that owns the session and drives all I/O.
struct Reactor {
    session: Session<JsonCodec>,
    dialer: WebSocketDialer,
    intents: mpsc::Receiver<Intent>,
    /// Cloned into dial and pump tasks so they can report back.
    events_tx: mpsc::Sender<ChannelEvent>,
    events_rx: mpsc::Receiver<ChannelEvent>,
    /// Send half of the open channel, kept out of the session so the
    /// state machine stays free of I/O handles.
    live: Option<WebSocketChannel>,
    snapshots: watch::Sender<ClientSnapshot>,
}

impl Reactor {
    /// Runs until shutdown is requested or every handle is dropped.
    async fn run(mut self) {
        loop {
            let step = tokio::select! {
                intent = self.intents.recv() => Step::Intent(intent),
                event = self.events_rx.recv() => Step::Event(event),
            };

            match step {
                // A closed mailbox means every ChessClient handle is
                // gone; treat it like an explicit shutdown.
                Step::Intent(None) | Step::Intent(Some(Intent::Shutdown)) => {
                    break;
                }
                Step::Intent(Some(intent)) => self.handle_intent(intent).await,
                Step::Event(Some(event)) => self.handle_event(event).await,
                // Unreachable while we hold events_tx, but harmless.
                Step::Event(None) => break,
            }

            self.publish();
        }

        if let Some(channel) = self.live.take() {
            let _ = channel.close().await;
        }
        if let Some(id) = self.session.current_channel() {
            self.session.handle_close(id);
        }
        self.publish();
        tracing::debug!("reactor stopped");
    }

    async fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Connect => {
                if let Some(id) = self.session.request_connect() {
                    self.spawn_dial(id);
                }
            }
            Intent::SendChat { text, reply } => {
                let result = self.send_chat(&text).await;
                let _ = reply.send(result);
            }
            // Handled in run() before we get here.
            Intent::Shutdown => {}
        }
    }

    async fn handle_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Opened {
                id,
                channel,
                listener,
            } => self.handle_opened(id, channel, listener).await,
            ChannelEvent::Frame { id, bytes } => {
                self.session.handle_frame(id, &bytes);
            }
            ChannelEvent::Closed { id } => {
                if self.live.as_ref().is_some_and(|c| c.id() == id) {
                    self.live = None;
                }
                self.session.handle_close(id);
            }
        }
    }

    async fn handle_opened(
        &mut self,
        id: ChannelId,
        channel: WebSocketChannel,
        listener: WebSocketListener,
    ) {
        match self.session.handle_open(id) {
            Ok(Some(handshake)) => {
                // The handshake must be the first frame on the wire,
                // so send it before the pump can deliver anything.
                if let Err(e) = channel.send(&handshake).await {
                    tracing::warn!(%id, error = %e, "handshake send failed");
                    self.session.handle_close(id);
                    let _ = channel.close().await;
                    return;
                }
                self.live = Some(channel);
                tokio::spawn(pump(listener, self.events_tx.clone()));
            }
            Ok(None) => {
                // A superseded dial finishing late. Close the straggler
                // off the reactor's critical path.
                tokio::spawn(async move {
                    let _ = channel.close().await;
                });
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "handshake encode failed");
                self.session.handle_close(id);
                let _ = channel.close().await;
            }
        }
    }

    async fn send_chat(&mut self, text: &str) -> Result<(), GambitError> {
        let bytes = self.session.send_chat(text)?;
        let channel =
            self.live.as_ref().ok_or(SessionError::NotConnected)?;
        channel.send(&bytes).await?;
        Ok(())
    }

    /// Dials the endpoint off-task; the outcome comes back as an event.
    fn spawn_dial(&self, id: ChannelId) {
        let dialer = self.dialer;
        let endpoint = self.session.config().endpoint.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            match dialer.dial(&endpoint, id).await {
                Ok((channel, listener)) => {
                    let _ = events
                        .send(ChannelEvent::Opened {
                            id,
                            channel,
                            listener,
                        })
                        .await;
                }
                Err(e) => {
                    tracing::warn!(%id, error = %e, "dial failed");
                    let _ = events.send(ChannelEvent::Closed { id }).await;
                }
            }
        });
    }

    fn publish(&self) {
        self.snapshots.send_replace(ClientSnapshot {
            status: self.session.status(),
            chat: self.session.chat().messages().to_vec(),
            board: self.session.board().clone(),
            metrics: *self.session.metrics(),
        });
    }
}

/// Forwards inbound frames from one channel to the reactor until the
/// channel closes, then reports the close. One pump task per channel;
/// a pump for a superseded channel keeps running harmlessly, its tagged
/// events dropped by the session.
async fn pump(
    mut listener: WebSocketListener,
    events: mpsc::Sender<ChannelEvent>,
) {
    let id = listener.id();
    loop {
        match listener.next_frame().await {
            Ok(Some(bytes)) => {
                if events
                    .send(ChannelEvent::Frame { id, bytes })
                    .await
                    .is_err()
                {
                    // Reactor gone; nothing left to deliver to.
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(%id, error = %e, "receive failed");
                break;
            }
        }
    }
    let _ = events.send(ChannelEvent::Closed { id }).await;
}
