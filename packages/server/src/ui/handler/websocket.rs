//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{Identity, SessionId, SessionIdFactory, Timestamp},
    infrastructure::dto::websocket::ClientEvent,
    ui::{
        chat_handler::SessionContext,
        state::{AppState, ConnectQuery},
    },
    usecase::RequestError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert Option<String> -> Option<Identity> (Domain Model)
    let identity = match query.identity.map(Identity::try_from).transpose() {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!("Invalid identity in handshake: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let session_id = SessionIdFactory::generate().map_err(|e| {
        tracing::error!("Failed to generate session id: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut session = SessionContext::new(session_id);
    if let Some(identity) = identity {
        session = session.with_identity(identity);
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, mut session: SessionContext) {
    let session_id = session.session_id().clone();
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this session to receive outbound frames
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    state.hub.register(session_id.clone(), tx).await;
    tracing::info!("Session '{}' connected", session_id);

    let recv_state = state.clone();

    // Spawn a task to receive events from this session
    let recv_task = tokio::spawn(async move {
        let chat_handler = &recv_state.chat_handler;

        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!(
                        "WebSocket error on session '{}': {}",
                        session.session_id(),
                        e
                    );
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!(
                        "Received text from '{}': {}",
                        session.session_id(),
                        text.as_str()
                    );

                    match serde_json::from_str::<ClientEvent>(text.as_str()) {
                        Ok(event) => chat_handler.handle_event(&mut session, event).await,
                        Err(e) => {
                            let error = RequestError::Malformed(e.to_string());
                            chat_handler.reject(session.session_id(), error).await;
                        }
                    }
                }
                Message::Binary(_) => {
                    tracing::debug!("Ignoring binary frame from '{}'", session.session_id());
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session.session_id());
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued frames to this session
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    wait_for_either(recv_task, send_task).await;
    cleanup(&state, &session_id).await;
}

/// Wait until one task completes, then abort the other and wait for it to
/// stop, so nothing from this connection runs once this returns.
async fn wait_for_either(mut recv_task: JoinHandle<()>, mut send_task: JoinHandle<()>) {
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    };
}

/// Remove the session from every room and from the hub.
async fn cleanup(state: &AppState, session_id: &SessionId) {
    state.chat_handler.disconnect(session_id).await;

    if let Some(connected_at) = state.hub.connected_at(session_id).await {
        let duration_ms = Timestamp::now().value() - connected_at.value();
        tracing::info!(
            "Session '{}' disconnected after {} ms",
            session_id,
            duration_ms
        );
    }
    state.hub.unregister(session_id).await;
}
