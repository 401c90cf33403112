//! Connection registry and room broadcast scopes for WebSocket sessions.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{RoomId, SessionId, Timestamp},
    infrastructure::dto::websocket::ServerEvent,
};

use super::broadcaster::Broadcaster;

/// Client connection information
pub struct ClientInfo {
    /// Message sender channel (serialized JSON frames)
    pub sender: mpsc::UnboundedSender<String>,
    /// When the session connected
    pub connected_at: Timestamp,
}

#[derive(Default)]
struct HubState {
    clients: HashMap<SessionId, ClientInfo>,
    /// Broadcast scope of each room
    scopes: HashMap<RoomId, HashSet<SessionId>>,
}

/// Tracks live sessions and which room scopes they are subscribed to.
///
/// Sending only enqueues on the session's unbounded channel; the connection's
/// write task does the socket I/O.
#[derive(Default)]
pub struct ConnectionHub {
    state: Mutex<HubState>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session and its outbound channel.
    pub async fn register(&self, session_id: SessionId, sender: mpsc::UnboundedSender<String>) {
        let mut state = self.state.lock().await;
        state.clients.insert(
            session_id,
            ClientInfo {
                sender,
                connected_at: Timestamp::now(),
            },
        );
    }

    /// Forget a session and drop it from every room scope.
    pub async fn unregister(&self, session_id: &SessionId) {
        let mut state = self.state.lock().await;
        state.clients.remove(session_id);
        state.scopes.retain(|_, members| {
            members.remove(session_id);
            !members.is_empty()
        });
    }

    pub async fn connection_count(&self) -> usize {
        self.state.lock().await.clients.len()
    }

    /// When the session connected, if it is still registered.
    pub async fn connected_at(&self, session_id: &SessionId) -> Option<Timestamp> {
        let state = self.state.lock().await;
        state.clients.get(session_id).map(|info| info.connected_at)
    }

    fn encode(event: &ServerEvent) -> Option<String> {
        match serde_json::to_string(event) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("Failed to serialize server event: {}", e);
                None
            }
        }
    }

    fn deliver(state: &HubState, session_id: &SessionId, json: &str) {
        match state.clients.get(session_id) {
            Some(client) => {
                if client.sender.send(json.to_string()).is_err() {
                    tracing::warn!("Failed to send event to session '{}'", session_id);
                }
            }
            None => tracing::debug!("Session '{}' is not connected, dropping event", session_id),
        }
    }

    async fn broadcast_filtered(
        &self,
        room_id: &RoomId,
        except: Option<&SessionId>,
        event: &ServerEvent,
    ) {
        let Some(json) = Self::encode(event) else {
            return;
        };
        let state = self.state.lock().await;
        let Some(members) = state.scopes.get(room_id) else {
            return;
        };
        for session_id in members.iter().filter(|id| Some(*id) != except) {
            Self::deliver(&state, session_id, &json);
        }
    }
}

#[async_trait]
impl Broadcaster for ConnectionHub {
    async fn subscribe(&self, session_id: &SessionId, room_id: &RoomId) {
        let mut state = self.state.lock().await;
        state
            .scopes
            .entry(room_id.clone())
            .or_default()
            .insert(session_id.clone());
    }

    async fn unsubscribe(&self, session_id: &SessionId, room_id: &RoomId) {
        let mut state = self.state.lock().await;
        if let Some(members) = state.scopes.get_mut(room_id) {
            members.remove(session_id);
            if members.is_empty() {
                state.scopes.remove(room_id);
            }
        }
    }

    async fn send_to(&self, session_id: &SessionId, event: &ServerEvent) {
        let Some(json) = Self::encode(event) else {
            return;
        };
        let state = self.state.lock().await;
        Self::deliver(&state, session_id, &json);
    }

    async fn broadcast_to_room(&self, room_id: &RoomId, event: &ServerEvent) {
        self.broadcast_filtered(room_id, None, event).await;
    }

    async fn broadcast_to_room_except(
        &self,
        room_id: &RoomId,
        except: &SessionId,
        event: &ServerEvent,
    ) {
        self.broadcast_filtered(room_id, Some(except), event).await;
    }
}
