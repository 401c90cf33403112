//! UseCase: ルーム退出処理
//!
//! 退出はアイデンティティで行います。参加していない場合は何もしません。

use std::sync::Arc;

use crate::domain::{Identity, Room, RoomId, RoomRepository, User};

/// 検証済みの leave-room リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRoomRequest {
    pub room_id: RoomId,
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム退出を実行
    ///
    /// # Returns
    ///
    /// * `Some((Room, User))` - 退出後のルームと退出したユーザー（通知が必要）
    /// * `None` - ルームが存在しない、または参加していない（通知不要）
    pub async fn execute(
        &self,
        request: LeaveRoomRequest,
        identity: &Identity,
    ) -> Option<(Room, User)> {
        self.repository.remove_user(&request.room_id, identity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, SessionId},
        infrastructure::repository::InMemoryRoomRepository,
    };

    fn room_id() -> RoomId {
        RoomId::new("AB12".to_string()).unwrap()
    }

    fn identity(id: &str) -> Identity {
        Identity::new(id.to_string()).unwrap()
    }

    async fn repository_with(identities: &[&str]) -> Arc<InMemoryRoomRepository> {
        let repository = Arc::new(InMemoryRoomRepository::new());
        for (i, id) in identities.iter().enumerate() {
            let user = User::new(
                identity(id),
                DisplayName::new(id.to_string()).unwrap(),
                SessionId::new(format!("s{i}")).unwrap(),
            );
            repository.add_user(&room_id(), user).await;
        }
        repository
    }

    #[tokio::test]
    async fn test_leave_room_success() {
        // テスト項目: 参加者が退出すると、残りの参加者と退出したユーザーが返される
        // given (前提条件):
        let repository = repository_with(&["u1", "u2"]).await;
        let usecase = LeaveRoomUseCase::new(repository.clone());

        // when (操作):
        let result = usecase
            .execute(LeaveRoomRequest { room_id: room_id() }, &identity("u1"))
            .await;

        // then (期待する結果):
        let (room, user) = result.unwrap();
        assert_eq!(user.identity, identity("u1"));
        assert_eq!(room.participants.len(), 1);
        assert_eq!(room.participants[0].identity, identity("u2"));
    }

    #[tokio::test]
    async fn test_leave_room_not_a_participant() {
        // テスト項目: 参加していないアイデンティティの退出は None になり、状態は変わらない
        // given (前提条件):
        let repository = repository_with(&["u1"]).await;
        let usecase = LeaveRoomUseCase::new(repository.clone());

        // when (操作):
        let result = usecase
            .execute(LeaveRoomRequest { room_id: room_id() }, &identity("stranger"))
            .await;

        // then (期待する結果):
        assert!(result.is_none());
        assert_eq!(repository.stats().await.participant_count, 1);
    }

    #[tokio::test]
    async fn test_leave_unknown_room() {
        // テスト項目: 存在しないルームからの退出は None になり、ルームも作成されない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = LeaveRoomUseCase::new(repository.clone());

        // when (操作):
        let result = usecase
            .execute(LeaveRoomRequest { room_id: room_id() }, &identity("u1"))
            .await;

        // then (期待する結果):
        assert!(result.is_none());
        assert_eq!(repository.stats().await.room_count, 0);
    }
}
