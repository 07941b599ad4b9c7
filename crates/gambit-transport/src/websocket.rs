//! WebSocket transport implementation using `tokio-tungstenite`.

use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::{Channel, ChannelId, Dialer, Listener, TransportError};

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// A [`Dialer`] that opens WebSocket connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketDialer;

impl Dialer for WebSocketDialer {
    type Channel = WebSocketChannel;
    type Listener = WebSocketListener;
    type Error = TransportError;

    async fn dial(
        &self,
        endpoint: &str,
        id: ChannelId,
    ) -> Result<(Self::Channel, Self::Listener), Self::Error> {
        let (ws, _response) = tokio_tungstenite::connect_async(endpoint)
            .await
            .map_err(|e| {
                TransportError::ConnectFailed(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    e,
                ))
            })?;

        tracing::debug!(%id, endpoint, "WebSocket connection established");

        // Split so the session driver can send while a reader task sits
        // in next_frame.
        let (sink, stream) = ws.split();

        let channel = WebSocketChannel {
            id,
            sink: Arc::new(Mutex::new(sink)),
        };
        let listener = WebSocketListener { id, stream };
        Ok((channel, listener))
    }
}

/// The outbound half of a WebSocket connection.
pub struct WebSocketChannel {
    id: ChannelId,
    sink: Arc<Mutex<SplitSink<WsStream, Message>>>,
}

impl Channel for WebSocketChannel {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        // The wire protocol is textual JSON, so frames go out as Text.
        let text = std::str::from_utf8(data).map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e,
            ))
        })?;

        self.sink
            .lock()
            .await
            .send(Message::Text(text.into()))
            .await
            .map_err(map_send_error)
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.sink.lock().await.close().await.map_err(map_send_error)
    }

    fn id(&self) -> ChannelId {
        self.id
    }
}

/// The inbound half of a WebSocket connection.
pub struct WebSocketListener {
    id: ChannelId,
    stream: SplitStream<WsStream>,
}

impl Listener for WebSocketListener {
    type Error = TransportError;

    async fn next_frame(
        &mut self,
    ) -> Result<Option<Vec<u8>>, Self::Error> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(data.into()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // skip ping/pong/frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(
                        std::io::Error::new(
                            std::io::ErrorKind::ConnectionReset,
                            e,
                        ),
                    ));
                }
            }
        }
    }

    fn id(&self) -> ChannelId {
        self.id
    }
}

/// Maps a tungstenite send-side error. A send on an already-closed
/// stream must surface as `NotConnected` so the caller can tell "the
/// channel is gone" apart from a transmission fault.
fn map_send_error(e: tungstenite::Error) -> TransportError {
    match e {
        tungstenite::Error::ConnectionClosed
        | tungstenite::Error::AlreadyClosed => TransportError::NotConnected,
        other => TransportError::SendFailed(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            other,
        )),
    }
}
