//! Shared helpers for integration tests: an in-process server on an
//! ephemeral port and a small WebSocket client.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use huddle_server::{
    ServerConfig,
    config::DEFAULT_CLIENT_URL,
    ui::{build_app, state::AppState},
};
use serde_json::Value;
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Chat server running inside the test runtime.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_client_url(DEFAULT_CLIENT_URL).await
    }

    /// Start with a custom CORS client origin.
    pub async fn start_with_client_url(client_url: &str) -> Self {
        let config = ServerConfig::try_parse_from(["huddle-server", "--client-url", client_url])
            .expect("Invalid test config");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let state = Arc::new(AppState::new(config.message_capacity));
        let app = build_app(state, &config.allowed_origins());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> WsClient {
        WsClient::connect(&self.ws_url()).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// WebSocket client speaking the `{type, data}` framing.
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(url: &str) -> Self {
        let (stream, _) = connect_async(url)
            .await
            .expect("Failed to connect WebSocket");
        Self { stream }
    }

    pub async fn send_json(&mut self, value: Value) {
        self.send_text(&value.to_string()).await;
    }

    pub async fn send_text(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn join(&mut self, identity: &str, room_id: &str) {
        self.send_json(serde_json::json!({
            "type": "join-room",
            "data": {"user": {"identity": identity, "displayName": identity}, "roomId": room_id}
        }))
        .await;
    }

    pub async fn send_message(&mut self, content: &str, author: &str, room_id: &str) {
        self.send_json(serde_json::json!({
            "type": "send-message",
            "data": {"content": content, "authorName": author, "roomId": room_id}
        }))
        .await;
    }

    /// Next text frame parsed as JSON; panics after a timeout.
    pub async fn recv_json(&mut self) -> Value {
        tokio::time::timeout(RECV_TIMEOUT, async {
            loop {
                let msg = self
                    .stream
                    .next()
                    .await
                    .expect("WebSocket closed")
                    .expect("WebSocket error");
                if let Message::Text(text) = msg {
                    return serde_json::from_str(text.as_str()).expect("Invalid JSON frame");
                }
            }
        })
        .await
        .expect("Timed out waiting for a frame")
    }

    /// Next frame, asserting its event type.
    pub async fn recv_event(&mut self, event_type: &str) -> Value {
        let frame = self.recv_json().await;
        assert_eq!(frame["type"], event_type, "unexpected frame: {frame}");
        frame["data"].clone()
    }

    /// Assert that no text frame arrives within `wait`.
    pub async fn expect_silence(&mut self, wait: Duration) {
        let result = tokio::time::timeout(wait, async {
            loop {
                match self.stream.next().await {
                    Some(Ok(Message::Text(text))) => return Some(text.as_str().to_string()),
                    Some(Ok(_)) => continue,
                    _ => return None,
                }
            }
        })
        .await;

        if let Ok(Some(frame)) = result {
            panic!("expected no frame, got {frame}");
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
