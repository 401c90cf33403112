//! Outbound side of the transport, as seen by the chat handler.

use async_trait::async_trait;

use crate::{
    domain::{RoomId, SessionId},
    infrastructure::dto::websocket::ServerEvent,
};

/// Delivery primitives the chat handler needs from the transport.
///
/// A session receives room broadcasts only while it is subscribed to the
/// room's broadcast scope. Delivery is fire-and-forget; failures are logged by
/// the implementation.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Add the session to the room's broadcast scope.
    async fn subscribe(&self, session_id: &SessionId, room_id: &RoomId);

    /// Remove the session from the room's broadcast scope.
    async fn unsubscribe(&self, session_id: &SessionId, room_id: &RoomId);

    /// Send to one session.
    async fn send_to(&self, session_id: &SessionId, event: &ServerEvent);

    /// Send to every session subscribed to the room.
    async fn broadcast_to_room(&self, room_id: &RoomId, event: &ServerEvent);

    /// Send to every session subscribed to the room except `except`.
    async fn broadcast_to_room_except(
        &self,
        room_id: &RoomId,
        except: &SessionId,
        event: &ServerEvent,
    );
}
