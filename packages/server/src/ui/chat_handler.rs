//! Session router: turns inbound client events into registry calls and
//! scoped outbound events.
//!
//! The handler keeps no per-session data. What it needs to know about a
//! connection (its session id and acting identity) is passed in as a
//! [`SessionContext`] owned by the connection task.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{Identity, RoomRepository, SessionId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    usecase::{
        DisconnectParticipantUseCase, JoinRoomRequest, JoinRoomUseCase, LeaveRoomRequest,
        LeaveRoomUseCase, SendMessageError, SendMessageRequest, SendMessageUseCase,
    },
};

use super::broadcaster::Broadcaster;

/// Per-connection state owned by the transport.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: SessionId,
    identity: Option<Identity>,
}

impl SessionContext {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            identity: None,
        }
    }

    /// Seed the acting identity (e.g. from the connection handshake).
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Identity used for `leave-room`: the last joined identity, else the
    /// handshake identity, else the raw session id.
    pub fn acting_identity(&self) -> Identity {
        self.identity
            .clone()
            .unwrap_or_else(|| Identity::from(&self.session_id))
    }
}

/// Chat event handler shared by every connection.
pub struct ChatHandler {
    join_room_usecase: JoinRoomUseCase,
    leave_room_usecase: LeaveRoomUseCase,
    send_message_usecase: SendMessageUseCase,
    disconnect_usecase: DisconnectParticipantUseCase,
    broadcaster: Arc<dyn Broadcaster>,
    /// Held across "store message + broadcast" and across "subscribe +
    /// snapshot + room-joined" so each session sees every message exactly
    /// once, in registry insertion order.
    message_order: Mutex<()>,
}

impl ChatHandler {
    pub fn new(repository: Arc<dyn RoomRepository>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            join_room_usecase: JoinRoomUseCase::new(repository.clone()),
            leave_room_usecase: LeaveRoomUseCase::new(repository.clone()),
            send_message_usecase: SendMessageUseCase::new(repository.clone()),
            disconnect_usecase: DisconnectParticipantUseCase::new(repository),
            broadcaster,
            message_order: Mutex::new(()),
        }
    }

    /// Validate and dispatch one decoded client event.
    pub async fn handle_event(&self, session: &mut SessionContext, event: ClientEvent) {
        match event {
            ClientEvent::JoinRoom(payload) => match JoinRoomRequest::try_from(payload) {
                Ok(request) => self.join(session, request).await,
                Err(e) => self.reject(session.session_id(), e).await,
            },
            ClientEvent::LeaveRoom(payload) => match LeaveRoomRequest::try_from(payload) {
                Ok(request) => self.leave(session, request).await,
                Err(e) => self.reject(session.session_id(), e).await,
            },
            ClientEvent::SendMessage(payload) => match SendMessageRequest::try_from(payload) {
                Ok(request) => self.send_message(session, request).await,
                Err(e) => self.reject(session.session_id(), e).await,
            },
        }
    }

    /// Send a scoped `error` event to the originating session only.
    pub async fn reject<E>(&self, session_id: &SessionId, error: E)
    where
        E: std::fmt::Display + Send,
    {
        let event = ServerEvent::error(&error);
        tracing::warn!("Rejected event from session '{}': {}", session_id, error);
        self.broadcaster.send_to(session_id, &event).await;
    }

    pub async fn join(&self, session: &mut SessionContext, request: JoinRoomRequest) {
        let session_id = session.session_id().clone();
        let room_id = request.room_id.clone();

        let (room, user) = {
            let _order = self.message_order.lock().await;
            self.broadcaster.subscribe(&session_id, &room_id).await;
            let (room, user) = self.join_room_usecase.execute(request, session_id.clone()).await;
            self.broadcaster
                .send_to(&session_id, &ServerEvent::room_joined(&room))
                .await;
            (room, user)
        };
        session.identity = Some(user.identity.clone());

        let joined = ServerEvent::user_joined(&user, &room);
        self.broadcaster
            .broadcast_to_room_except(&room_id, &session_id, &joined)
            .await;

        tracing::info!(
            "User '{}' joined room {} (session '{}')",
            user.identity,
            room_id,
            session_id
        );
    }

    pub async fn leave(&self, session: &SessionContext, request: LeaveRoomRequest) {
        let session_id = session.session_id();
        let room_id = request.room_id.clone();
        let identity = session.acting_identity();

        let Some((room, user)) = self.leave_room_usecase.execute(request, &identity).await else {
            tracing::debug!(
                "Session '{}' ({}) is not in room {}, ignoring leave",
                session_id,
                identity,
                room_id
            );
            return;
        };

        self.broadcaster.unsubscribe(session_id, &room_id).await;
        let left = ServerEvent::user_left(&user, &room);
        self.broadcaster
            .broadcast_to_room_except(&room_id, session_id, &left)
            .await;
    }

    pub async fn send_message(&self, session: &SessionContext, request: SendMessageRequest) {
        let session_id = session.session_id();
        let _order = self.message_order.lock().await;

        match self.send_message_usecase.execute(session_id, request).await {
            Ok(message) => {
                tracing::debug!(
                    "Broadcasting message {} to room {}",
                    message.id,
                    message.room_id
                );
                self.broadcaster
                    .broadcast_to_room(&message.room_id, &ServerEvent::message(&message))
                    .await;
            }
            Err(SendMessageError::RoomVanished(room_id)) => {
                tracing::warn!(
                    "Dropped message from session '{}': room {} disappeared",
                    session_id,
                    room_id
                );
            }
            Err(e) => self.reject(session_id, e).await,
        }
    }

    /// Clean up after a terminated connection. Call exactly once per session.
    pub async fn disconnect(&self, session_id: &SessionId) {
        for (room, user) in self.disconnect_usecase.execute(session_id).await {
            let left = ServerEvent::user_left(&user, &room);
            self.broadcaster
                .broadcast_to_room_except(&room.id, session_id, &left)
                .await;
        }
    }
}
