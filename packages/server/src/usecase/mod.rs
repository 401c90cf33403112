//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（ChatHandler）から呼び出され、Domain 層を操作します。
//! 受信イベント 1 種類につき 1 つのユースケースがあります。

pub mod disconnect_participant;
pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod send_message;

pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{RequestError, SendMessageError};
pub use join_room::{JoinRoomRequest, JoinRoomUseCase};
pub use leave_room::{LeaveRoomRequest, LeaveRoomUseCase};
pub use send_message::{SendMessageRequest, SendMessageUseCase};
