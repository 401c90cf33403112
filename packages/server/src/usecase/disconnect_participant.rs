//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - セッション ID による全ルーム横断の参加者削除
//!
//! ### なぜこのテストが必要か
//! - 異常切断時にはアイデンティティが分からず、セッション ID しか使えない
//! - 参加していた全ルームに user-left を通知するため、ルームごとの結果が必要
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 つのルームに参加していたセッションの切断
//! - エッジケース：どのルームにも参加していないセッションの切断（通知対象なし）
//! - エッジケース：同じセッションの 2 回目の切断（冪等）

use std::sync::Arc;

use crate::domain::{Room, RoomRepository, SessionId, User};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 切断されたセッションの ID
    ///
    /// # Returns
    ///
    /// 削除が行われたルーム（削除後）と削除されたユーザーの組。
    /// それぞれのルームの残りの参加者に通知します。
    pub async fn execute(&self, session_id: &SessionId) -> Vec<(Room, User)> {
        let left = self.repository.remove_user_by_session(session_id).await;
        tracing::debug!(
            "Session '{}' removed from {} room(s)",
            session_id,
            left.len()
        );
        left
    }
}
