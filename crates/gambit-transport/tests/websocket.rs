//! Integration tests for the WebSocket transport.
//!
//! These tests spin up a real loopback WebSocket server and dial it, to
//! verify that frames actually flow over the network in both directions
//! and that closes surface the way the contract says.

#[cfg(feature = "websocket")]
mod websocket {
    use futures_util::{SinkExt, StreamExt};
    use gambit_transport::{
        Channel, ChannelId, Dialer, Listener, TransportError,
        WebSocketDialer,
    };
    use tokio::net::{TcpListener, TcpStream};
    use tokio_tungstenite::tungstenite::Message;
    use tokio_tungstenite::WebSocketStream;

    /// Binds a loopback listener on a random port and returns its
    /// address plus a task that accepts exactly one WebSocket upgrade.
    async fn one_shot_server() -> (
        String,
        tokio::task::JoinHandle<WebSocketStream<TcpStream>>,
    ) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = listener.local_addr().expect("local addr").to_string();

        let handle = tokio::spawn(async move {
            let (stream, _) =
                listener.accept().await.expect("should accept");
            tokio_tungstenite::accept_async(stream)
                .await
                .expect("should upgrade")
        });

        (addr, handle)
    }

    #[tokio::test]
    async fn test_dial_and_exchange_frames() {
        let (addr, server) = one_shot_server().await;

        let (channel, mut listener) = WebSocketDialer
            .dial(&format!("ws://{addr}"), ChannelId::new(1))
            .await
            .expect("should dial");

        assert_eq!(channel.id(), ChannelId::new(1));
        assert_eq!(listener.id(), ChannelId::new(1));

        let mut server_ws = server.await.expect("server task");

        // --- Client sends, server receives (as a Text frame) ---
        channel
            .send(br#"{"type":"message","data":"hi"}"#)
            .await
            .expect("send should succeed");

        let msg = server_ws.next().await.unwrap().unwrap();
        assert!(msg.is_text());
        assert_eq!(
            msg.into_data().as_ref(),
            br#"{"type":"message","data":"hi"}"#
        );

        // --- Server sends, client receives ---
        server_ws
            .send(Message::text("from server"))
            .await
            .unwrap();

        let frame = listener
            .next_frame()
            .await
            .expect("recv should succeed")
            .expect("should have a frame");
        assert_eq!(frame, b"from server");
    }

    #[tokio::test]
    async fn test_listener_sees_binary_frames_too() {
        let (addr, server) = one_shot_server().await;

        let (_channel, mut listener) = WebSocketDialer
            .dial(&format!("ws://{addr}"), ChannelId::new(2))
            .await
            .expect("should dial");

        let mut server_ws = server.await.expect("server task");
        server_ws
            .send(Message::Binary(b"raw bytes".to_vec().into()))
            .await
            .unwrap();

        let frame = listener.next_frame().await.unwrap().unwrap();
        assert_eq!(frame, b"raw bytes");
    }

    #[tokio::test]
    async fn test_next_frame_returns_none_on_server_close() {
        let (addr, server) = one_shot_server().await;

        let (_channel, mut listener) = WebSocketDialer
            .dial(&format!("ws://{addr}"), ChannelId::new(3))
            .await
            .expect("should dial");

        let mut server_ws = server.await.expect("server task");
        server_ws.send(Message::Close(None)).await.unwrap();

        let result = listener
            .next_frame()
            .await
            .expect("clean close is not an error");
        assert!(result.is_none(), "should surface clean close as None");
    }

    #[tokio::test]
    async fn test_send_after_close_is_detectable() {
        let (addr, server) = one_shot_server().await;

        let (channel, mut listener) = WebSocketDialer
            .dial(&format!("ws://{addr}"), ChannelId::new(4))
            .await
            .expect("should dial");

        let _server_ws = server.await.expect("server task");

        channel.close().await.expect("close should succeed");
        // Drain the close reply so the stream is fully shut down.
        while listener.next_frame().await.ok().flatten().is_some() {}

        let result = channel.send(b"too late").await;
        assert!(
            matches!(
                result,
                Err(TransportError::NotConnected
                    | TransportError::SendFailed(_))
            ),
            "send after close must fail, got {result:?}"
        );
    }

    #[tokio::test]
    async fn test_dial_unreachable_endpoint_fails() {
        // Port 1 on loopback is essentially never listening.
        let result = WebSocketDialer
            .dial("ws://127.0.0.1:1", ChannelId::new(5))
            .await;
        assert!(matches!(
            result,
            Err(TransportError::ConnectFailed(_))
        ));
    }
}
