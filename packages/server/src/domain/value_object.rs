//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.
//!
//! `Identity` and `SessionId` are deliberately separate types: an identity is
//! supplied by the client and survives reconnects, a session id is assigned by
//! the transport and lives as long as one connection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of identifiers and names.
pub const MAX_ID_LENGTH: usize = 100;

/// Maximum length of a message body.
pub const MAX_MESSAGE_CONTENT_LENGTH: usize = 10000;

fn validate_bounded(field: &'static str, value: &str) -> Result<(), ValueObjectError> {
    if value.is_empty() {
        return Err(ValueObjectError::Empty { field });
    }
    let len = value.len();
    if len > MAX_ID_LENGTH {
        return Err(ValueObjectError::TooLong {
            field,
            max: MAX_ID_LENGTH,
            actual: len,
        });
    }
    Ok(())
}

/// Declares a non-empty string newtype capped at [`MAX_ID_LENGTH`].
macro_rules! bounded_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new ", stringify!($name), ".")]
            ///
            /// # Errors
            ///
            /// Returns an error if the value is empty or longer than
            /// [`MAX_ID_LENGTH`] bytes.
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                validate_bounded(stringify!($name), &value)?;
                Ok(Self(value))
            }

            /// Get the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert to owned String.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

bounded_string!(
    /// Stable, client-supplied user identifier. Survives reconnects.
    Identity
);

bounded_string!(
    /// Ephemeral identifier of one live transport connection.
    SessionId
);

bounded_string!(
    /// Room identifier value object.
    RoomId
);

bounded_string!(
    /// Name a user shows to the other participants.
    DisplayName
);

bounded_string!(
    /// Author name attached to a chat message.
    AuthorName
);

impl From<&SessionId> for Identity {
    /// Fallback identity for a session that never supplied one.
    fn from(session_id: &SessionId) -> Self {
        Self(session_id.0.clone())
    }
}

/// Message identifier value object.
///
/// Always generated by the registry (see [`super::factory::MessageIdFactory`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageId(String);

impl MessageId {
    /// Create a MessageId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_bounded("MessageId", &value)?;
        Ok(Self(value))
    }
}

impl From<MessageId> for String {
    fn from(value: MessageId) -> Self {
        value.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
///
/// Surrounding whitespace is trimmed on construction; the trimmed content
/// must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw message content string
    ///
    /// # Returns
    ///
    /// A Result containing the trimmed MessageContent or an error if validation fails
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        let len = trimmed.len();
        if len > MAX_MESSAGE_CONTENT_LENGTH {
            return Err(ValueObjectError::MessageContentTooLong {
                max: MAX_MESSAGE_CONTENT_LENGTH,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageContent> for String {
    fn from(value: MessageContent) -> Self {
        value.0
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp from Unix milliseconds.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current time.
    pub fn now() -> Self {
        Self(huddle_shared::time::get_jst_timestamp())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
