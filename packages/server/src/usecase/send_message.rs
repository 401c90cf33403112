//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信前の検証（ルームの存在、送信元セッションの参加確認）とメッセージ履歴への追加
//!
//! ### なぜこのテストが必要か
//! - 参加していないセッションからのメッセージで履歴が変わらないことを保証
//! - 確認と追加の間にルームが消えた場合（競合）にパニックしないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者からのメッセージ送信
//! - 異常系：存在しないルーム、参加していないセッション
//! - エッジケース：追加時にルームが消えている（Repository のモックで再現）

use std::sync::Arc;

use crate::domain::{AuthorName, Message, MessageContent, RoomId, RoomRepository, SessionId};

use super::error::SendMessageError;

/// 検証済みの send-message リクエスト（content はトリム済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub content: MessageContent,
    pub author_name: AuthorName,
    pub room_id: RoomId,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 送信元セッションの ID
    /// * `request` - 検証済みのリクエスト
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 保存されたメッセージ（ルーム全員にブロードキャストする）
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        session_id: &SessionId,
        request: SendMessageRequest,
    ) -> Result<Message, SendMessageError> {
        // 1. ルームの存在と送信元の参加を確認
        let room = self
            .repository
            .get_room(&request.room_id)
            .await
            .ok_or(SendMessageError::RoomNotFound)?;
        if !room.has_session(session_id) {
            return Err(SendMessageError::NotInRoom);
        }

        // 2. Repository 経由でメッセージを Room に追加
        self.repository
            .add_message(&request.room_id, request.author_name, request.content)
            .await
            .ok_or(SendMessageError::RoomVanished(request.room_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            DisplayName, Identity, Room, Timestamp, User, repository::MockRoomRepository,
        },
        infrastructure::repository::InMemoryRoomRepository,
    };

    fn room_id() -> RoomId {
        RoomId::new("AB12".to_string()).unwrap()
    }

    fn session(id: &str) -> SessionId {
        SessionId::new(id.to_string()).unwrap()
    }

    fn user(identity: &str, session_id: &str) -> User {
        User::new(
            Identity::new(identity.to_string()).unwrap(),
            DisplayName::new(identity.to_string()).unwrap(),
            session(session_id),
        )
    }

    fn request(content: &str) -> SendMessageRequest {
        SendMessageRequest {
            content: MessageContent::new(content.to_string()).unwrap(),
            author_name: AuthorName::new("U1".to_string()).unwrap(),
            room_id: room_id(),
        }
    }

    #[tokio::test]
    async fn test_send_message_success() {
        // テスト項目: 参加者からのメッセージが保存され、返される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        repository.add_user(&room_id(), user("u1", "s1")).await;
        let usecase = SendMessageUseCase::new(repository.clone());

        // when (操作):
        let result = usecase.execute(&session("s1"), request("  hi  ")).await;

        // then (期待する結果):
        let message = result.unwrap();
        assert_eq!(message.content.as_str(), "hi");
        assert_eq!(message.author_name.as_str(), "U1");
        assert_eq!(message.room_id, room_id());

        let room = repository.get_room(&room_id()).await.unwrap();
        assert_eq!(room.messages, vec![message]);
    }

    #[tokio::test]
    async fn test_send_message_room_not_found() {
        // テスト項目: 存在しないルームへの送信は RoomNotFound になり、ルームは作成されない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = SendMessageUseCase::new(repository.clone());

        // when (操作):
        let result = usecase.execute(&session("s1"), request("hi")).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::RoomNotFound));
        assert_eq!(repository.stats().await.room_count, 0);
    }

    #[tokio::test]
    async fn test_send_message_not_in_room() {
        // テスト項目: 参加していないセッションからの送信は拒否され、履歴は変わらない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        repository.add_user(&room_id(), user("u1", "s1")).await;
        let usecase = SendMessageUseCase::new(repository.clone());

        // when (操作):
        let result = usecase.execute(&session("intruder"), request("hi")).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::NotInRoom));
        assert_eq!(repository.stats().await.message_count, 0);
    }

    #[tokio::test]
    async fn test_send_message_not_in_room_never_adds() {
        // テスト項目: 参加確認に失敗した場合 add_message は呼ばれない
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository
            .expect_get_room()
            .returning(|id| Some(Room::new(id.clone(), Timestamp::new(0))));
        repository.expect_add_message().never();
        let usecase = SendMessageUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute(&session("s1"), request("hi")).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::NotInRoom));
    }

    #[tokio::test]
    async fn test_send_message_room_vanished() {
        // テスト項目: 参加確認後にルームが消えた場合は RoomVanished になる
        // given (前提条件):
        let mut room = Room::new(room_id(), Timestamp::new(0));
        room.upsert_participant(user("u1", "s1"));
        let mut repository = MockRoomRepository::new();
        repository
            .expect_get_room()
            .returning(move |_| Some(room.clone()));
        repository
            .expect_add_message()
            .times(1)
            .returning(|_, _, _| None);
        let usecase = SendMessageUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute(&session("s1"), request("hi")).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::RoomVanished(room_id())));
    }
}
