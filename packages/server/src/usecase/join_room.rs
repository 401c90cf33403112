//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - セッション ID を付与したユーザーの追加、再参加時のセッション ID 更新
//!
//! ### なぜこのテストが必要か
//! - 参加者がアイデンティティで一意であることを保証する
//! - 通知に使うユーザー情報が Room に保存された値と一致することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しいルームへの参加
//! - 正常系：既存ルームへの 2 人目の参加
//! - エッジケース：同じアイデンティティでの再参加（別セッション）

use std::sync::Arc;

use crate::domain::{DisplayName, Identity, Room, RoomId, RoomRepository, SessionId, User};

/// 検証済みの join-room リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRoomRequest {
    pub identity: Identity,
    pub display_name: DisplayName,
    pub room_id: RoomId,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `request` - 検証済みのリクエスト
    /// * `session_id` - 参加するセッションの ID（トランスポートが採番）
    ///
    /// # Returns
    ///
    /// 参加後のルームと、ルームに保存されている参加者
    pub async fn execute(&self, request: JoinRoomRequest, session_id: SessionId) -> (Room, User) {
        let user = User::new(request.identity, request.display_name, session_id);
        let room = self.repository.add_user(&request.room_id, user.clone()).await;

        // 再参加の場合は保存済みの表示名が使われる
        let stored = room.get_participant(&user.identity).cloned().unwrap_or(user);

        (room, stored)
    }
}
