//! Room registry abstraction.
//!
//! The registry is the only owner of room state. Implementations must make
//! every operation atomic with respect to the others; callers only ever see
//! snapshots.

use async_trait::async_trait;

use super::{
    AuthorName, Identity, Message, MessageContent, Room, RoomId, RoomStats, SessionId, User,
};

/// Room registry (Repository pattern).
///
/// Absence is reported through `Option` and empty results; none of these
/// operations fail.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Return the room, creating an empty one named "Room <id>" if unknown.
    async fn get_or_create_room(&self, room_id: &RoomId) -> Room;

    /// Add `user` to the room (creating it if needed).
    ///
    /// If the identity is already a participant only its session id is
    /// replaced, in place.
    async fn add_user(&self, room_id: &RoomId, user: User) -> Room;

    /// Remove a participant by identity.
    ///
    /// Returns the room after removal together with the removed user, or
    /// `None` if the room or the participant does not exist. Empty rooms are
    /// kept.
    async fn remove_user(&self, room_id: &RoomId, identity: &Identity) -> Option<(Room, User)>;

    /// Remove every participant bound to `session_id`, across all rooms.
    async fn remove_user_by_session(&self, session_id: &SessionId) -> Vec<(Room, User)>;

    /// Store a new message with a generated id.
    ///
    /// Returns `None` if the room does not exist.
    async fn add_message(
        &self,
        room_id: &RoomId,
        author_name: AuthorName,
        content: MessageContent,
    ) -> Option<Message>;

    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// All rooms, oldest first.
    async fn list_rooms(&self) -> Vec<Room>;

    async fn stats(&self) -> RoomStats;
}
