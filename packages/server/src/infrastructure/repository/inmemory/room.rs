//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 排他制御
//!
//! レジストリ全体を 1 つの Mutex で保護します（粗粒度ロック）。
//! `remove_user_by_session` は全ルームを横断するため、ルーム単位のロックでは
//! 同じセッション ID での join との原子性を保証できません。
//! ロック中に行うのはメモリ上の操作のみです。
//!
//! ## ルームの寿命
//!
//! ルームは最初に参照されたときに作成され、削除されません。
//! 空のルームも履歴を保持したまま残ります（外部のリーパーが
//! `list_rooms` / `stats` を見て掃除する想定）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AuthorName, DEFAULT_MESSAGE_CAPACITY, Identity, Message, MessageContent, MessageIdFactory,
    Room, RoomId, RoomRepository, RoomStats, SessionId, Timestamp, User,
};

/// インメモリ Room Repository 実装
///
/// HashMap をインメモリ DB として使用する実装。
/// ドメイン層の RoomRepository trait を実装します（依存性の逆転）。
pub struct InMemoryRoomRepository {
    /// ルーム ID → Room ドメインモデル
    rooms: Mutex<HashMap<RoomId, Room>>,
    /// 新規ルームのメッセージ保持上限
    message_capacity: usize,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成（メッセージ上限 100 件）
    pub fn new() -> Self {
        Self::with_message_capacity(DEFAULT_MESSAGE_CAPACITY)
    }

    /// メッセージ保持上限を指定して作成
    pub fn with_message_capacity(message_capacity: usize) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            message_capacity,
        }
    }

    fn get_or_insert<'a>(
        &self,
        rooms: &'a mut HashMap<RoomId, Room>,
        room_id: &RoomId,
    ) -> &'a mut Room {
        rooms.entry(room_id.clone()).or_insert_with(|| {
            tracing::info!("Created new room: {}", room_id);
            Room::with_capacity(room_id.clone(), Timestamp::now(), self.message_capacity)
        })
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create_room(&self, room_id: &RoomId) -> Room {
        let mut rooms = self.rooms.lock().await;
        self.get_or_insert(&mut rooms, room_id).clone()
    }

    async fn add_user(&self, room_id: &RoomId, user: User) -> Room {
        let mut rooms = self.rooms.lock().await;
        let room = self.get_or_insert(&mut rooms, room_id);

        let identity = user.identity.clone();
        let session_id = user.session_id.clone();
        if room.upsert_participant(user) {
            tracing::info!(
                "User '{}' rejoined room {} with session {}",
                identity,
                room_id,
                session_id
            );
        } else {
            tracing::info!("User '{}' joined room {}", identity, room_id);
        }

        room.clone()
    }

    async fn remove_user(&self, room_id: &RoomId, identity: &Identity) -> Option<(Room, User)> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id)?;
        let user = room.remove_participant(identity)?;

        if room.participants.is_empty() {
            tracing::debug!("Room {} is now empty", room_id);
        }
        tracing::info!("User '{}' left room {}", user.identity, room_id);

        Some((room.clone(), user))
    }

    async fn remove_user_by_session(&self, session_id: &SessionId) -> Vec<(Room, User)> {
        let mut rooms = self.rooms.lock().await;
        let mut results = Vec::new();

        for room in rooms.values_mut() {
            let removed = room.remove_participants_by_session(session_id);
            for user in removed {
                tracing::info!(
                    "User '{}' disconnected from room {}",
                    user.identity,
                    room.id
                );
                results.push((room.clone(), user));
            }
        }

        results
    }

    async fn add_message(
        &self,
        room_id: &RoomId,
        author_name: AuthorName,
        content: MessageContent,
    ) -> Option<Message> {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get_mut(room_id) else {
            tracing::error!("Attempted to add message to non-existent room: {}", room_id);
            return None;
        };

        let message = Message {
            id: MessageIdFactory::generate(),
            author_name,
            content,
            created_at: Timestamp::now(),
            room_id: room.id.clone(),
        };
        let evicted = room.push_message(message.clone());
        if evicted > 0 {
            tracing::debug!("Evicted {} old message(s) from room {}", evicted, room_id);
        }
        tracing::debug!(
            "Message {} added to room {} by '{}'",
            message.id,
            room_id,
            message.author_name
        );

        Some(message)
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Room> = rooms.values().cloned().collect();
        list.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        list
    }

    async fn stats(&self) -> RoomStats {
        let rooms = self.rooms.lock().await;
        rooms.values().fold(
            RoomStats {
                room_count: rooms.len(),
                ..RoomStats::default()
            },
            |mut stats, room| {
                stats.participant_count += room.participants.len();
                stats.message_count += room.messages.len();
                stats
            },
        )
    }
}
