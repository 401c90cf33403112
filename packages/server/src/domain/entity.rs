//! Core domain models for the chat application.

use serde::{Deserialize, Serialize};

use super::value_object::{
    AuthorName, DisplayName, Identity, MessageContent, MessageId, RoomId, SessionId, Timestamp,
};

/// Default maximum number of messages retained per room
pub const DEFAULT_MESSAGE_CAPACITY: usize = 100;

/// A participant of a room.
///
/// `identity` is stable across reconnects; `session_id` is the connection the
/// user is currently reachable on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub identity: Identity,
    pub display_name: DisplayName,
    pub session_id: SessionId,
}

impl User {
    /// Create a new user bound to a session
    pub fn new(identity: Identity, display_name: DisplayName, session_id: SessionId) -> Self {
        Self {
            identity,
            display_name,
            session_id,
        }
    }
}

/// A chat message stored in a room's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Registry-assigned identifier
    pub id: MessageId,
    pub author_name: AuthorName,
    pub content: MessageContent,
    pub created_at: Timestamp,
    pub room_id: RoomId,
}

/// Represents a chat room with participants and a bounded message history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Human readable name ("Room <id>")
    pub display_name: String,
    /// Participants in join order, unique by identity
    pub participants: Vec<User>,
    /// Message history, oldest first
    pub messages: Vec<Message>,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
    /// Maximum number of messages retained (default: 100)
    pub message_capacity: usize,
}

impl Room {
    /// Create a new empty room with the given ID and creation timestamp
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self::with_capacity(id, created_at, DEFAULT_MESSAGE_CAPACITY)
    }

    /// Create a new empty room with a custom message capacity
    pub fn with_capacity(id: RoomId, created_at: Timestamp, message_capacity: usize) -> Self {
        Self {
            display_name: format!("Room {id}"),
            id,
            participants: Vec::new(),
            messages: Vec::new(),
            created_at,
            message_capacity,
        }
    }

    /// Add a participant, or rebind an existing identity to a new session.
    ///
    /// A rejoin keeps the participant's position and display name and only
    /// replaces the session id.
    ///
    /// Returns `true` if the identity was already present.
    pub fn upsert_participant(&mut self, user: User) -> bool {
        match self
            .participants
            .iter_mut()
            .find(|p| p.identity == user.identity)
        {
            Some(existing) => {
                existing.session_id = user.session_id;
                true
            }
            None => {
                self.participants.push(user);
                false
            }
        }
    }

    /// Remove a participant by identity, returning the removed user
    pub fn remove_participant(&mut self, identity: &Identity) -> Option<User> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.identity == identity)?;
        Some(self.participants.remove(index))
    }

    /// Remove every participant currently bound to `session_id`
    pub fn remove_participants_by_session(&mut self, session_id: &SessionId) -> Vec<User> {
        let (removed, kept): (Vec<User>, Vec<User>) = std::mem::take(&mut self.participants)
            .into_iter()
            .partition(|p| &p.session_id == session_id);
        self.participants = kept;
        removed
    }

    /// Append a message, evicting the oldest entries beyond capacity.
    ///
    /// Returns the number of evicted messages.
    pub fn push_message(&mut self, message: Message) -> usize {
        self.messages.push(message);
        let excess = self.messages.len().saturating_sub(self.message_capacity);
        if excess > 0 {
            self.messages.drain(..excess);
        }
        excess
    }

    /// Get a participant by identity
    pub fn get_participant(&self, identity: &Identity) -> Option<&User> {
        self.participants.iter().find(|p| &p.identity == identity)
    }

    /// Whether a participant is currently bound to `session_id`
    pub fn has_session(&self, session_id: &SessionId) -> bool {
        self.participants.iter().any(|p| &p.session_id == session_id)
    }
}

/// Aggregate counters over every room in the registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStats {
    pub room_count: usize,
    /// Sum of participants over all rooms
    pub participant_count: usize,
    /// Sum of retained messages over all rooms
    pub message_count: usize,
}
