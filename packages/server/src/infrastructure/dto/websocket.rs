//! WebSocket message DTOs for the chat application.
//!
//! Every frame is a JSON object `{"type": "<event>", "data": <payload>}` with
//! camelCase field names. Inbound payloads keep every field optional so that
//! a missing field becomes a scoped validation error instead of a parse
//! failure; [`TryFrom`] turns them into validated use case requests.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Message, Room, User, ValueObjectError},
    usecase::{JoinRoomRequest, LeaveRoomRequest, RequestError, SendMessageRequest},
};

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// Events sent by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom(JoinRoomPayload),
    LeaveRoom(LeaveRoomPayload),
    SendMessage(SendMessagePayload),
}

/// User fields supplied on join (the session id is assigned by the server)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPayload {
    pub identity: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub user: Option<UserPayload>,
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaveRoomPayload {
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub content: Option<String>,
    pub author_name: Option<String>,
    pub room_id: Option<String>,
}

/// Validate one required field into its value object.
fn required<T>(
    event: &'static str,
    field: &'static str,
    value: Option<String>,
) -> Result<T, RequestError>
where
    T: TryFrom<String, Error = ValueObjectError>,
{
    let value = value.ok_or(RequestError::MissingField { event, field })?;
    T::try_from(value).map_err(|source| RequestError::InvalidField { event, source })
}

impl TryFrom<JoinRoomPayload> for JoinRoomRequest {
    type Error = RequestError;

    fn try_from(payload: JoinRoomPayload) -> Result<Self, Self::Error> {
        const EVENT: &str = "join-room";
        let user = payload.user.ok_or(RequestError::MissingField {
            event: EVENT,
            field: "user",
        })?;
        Ok(Self {
            identity: required(EVENT, "user.identity", user.identity)?,
            display_name: required(EVENT, "user.displayName", user.display_name)?,
            room_id: required(EVENT, "roomId", payload.room_id)?,
        })
    }
}

impl TryFrom<LeaveRoomPayload> for LeaveRoomRequest {
    type Error = RequestError;

    fn try_from(payload: LeaveRoomPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            room_id: required("leave-room", "roomId", payload.room_id)?,
        })
    }
}

impl TryFrom<SendMessagePayload> for SendMessageRequest {
    type Error = RequestError;

    fn try_from(payload: SendMessagePayload) -> Result<Self, Self::Error> {
        const EVENT: &str = "send-message";
        Ok(Self {
            content: required(EVENT, "content", payload.content)?,
            author_name: required(EVENT, "authorName", payload.author_name)?,
            room_id: required(EVENT, "roomId", payload.room_id)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Snapshot for the joining session only
    RoomJoined(RoomJoinedPayload),
    /// To every other session in the room
    UserJoined(MembershipPayload),
    /// To every other session in the room
    UserLeft(MembershipPayload),
    /// To every session in the room, sender included
    Message(MessageDto),
    /// To the originating session only
    Error(String),
}

impl ServerEvent {
    pub fn room_joined(room: &Room) -> Self {
        Self::RoomJoined(RoomJoinedPayload {
            room: RoomInfoDto::from(room),
            messages: room.messages.iter().map(MessageDto::from).collect(),
            participants: participants(room),
        })
    }

    pub fn user_joined(user: &User, room: &Room) -> Self {
        Self::UserJoined(MembershipPayload {
            user: UserDto::from(user),
            participants: participants(room),
        })
    }

    pub fn user_left(user: &User, room: &Room) -> Self {
        Self::UserLeft(MembershipPayload {
            user: UserDto::from(user),
            participants: participants(room),
        })
    }

    pub fn message(message: &Message) -> Self {
        Self::Message(MessageDto::from(message))
    }

    pub fn error(reason: impl std::fmt::Display) -> Self {
        Self::Error(reason.to_string())
    }
}

fn participants(room: &Room) -> Vec<UserDto> {
    room.participants.iter().map(UserDto::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub identity: String,
    pub display_name: String,
    pub session_id: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            identity: user.identity.as_str().to_string(),
            display_name: user.display_name.as_str().to_string(),
            session_id: user.session_id.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub author_name: String,
    pub content: String,
    /// Unix timestamp (milliseconds since epoch)
    pub created_at: i64,
    pub room_id: String,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            author_name: message.author_name.as_str().to_string(),
            content: message.content.as_str().to_string(),
            created_at: message.created_at.value(),
            room_id: message.room_id.as_str().to_string(),
        }
    }
}

/// Room metadata without participants or history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfoDto {
    pub id: String,
    pub display_name: String,
    /// Unix timestamp (milliseconds since epoch)
    pub created_at: i64,
}

impl From<&Room> for RoomInfoDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            display_name: room.display_name.clone(),
            created_at: room.created_at.value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomJoinedPayload {
    pub room: RoomInfoDto,
    pub messages: Vec<MessageDto>,
    pub participants: Vec<UserDto>,
}

/// Payload of `user-joined` / `user-left`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPayload {
    pub user: UserDto,
    pub participants: Vec<UserDto>,
}
