//! Domain factories for creating generated identifiers.

use super::{MessageId, SessionId};

/// Factory for generating MessageId instances.
///
/// Message ids are always assigned on insertion, never taken from clients.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating SessionId instances for new connections.
pub struct SessionIdFactory;

impl SessionIdFactory {
    /// Generate a new SessionId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice (a UUID is 36 characters), but
    /// returns Result for consistency with the domain error handling pattern.
    pub fn generate() -> Result<SessionId, super::ValueObjectError> {
        SessionId::new(uuid::Uuid::new_v4().to_string())
    }
}
