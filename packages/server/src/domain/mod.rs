//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{DEFAULT_MESSAGE_CAPACITY, Message, Room, RoomStats, User};
pub use error::ValueObjectError;
pub use factory::{MessageIdFactory, SessionIdFactory};
pub use repository::RoomRepository;
pub use value_object::{
    AuthorName, DisplayName, Identity, MessageContent, MessageId, RoomId, SessionId, Timestamp,
};
