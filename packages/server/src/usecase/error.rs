//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RoomId, ValueObjectError};

/// 受信イベントの検証エラー
///
/// 送信元のセッションにだけ `error` イベントとして返されます。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// JSON として解釈できない、または未知のイベント種別
    #[error("Malformed event: {0}")]
    Malformed(String),

    /// 必須フィールドの欠落
    #[error("Invalid {event} data: missing {field}")]
    MissingField {
        event: &'static str,
        field: &'static str,
    },

    /// フィールドの値が不正
    #[error("Invalid {event} data: {source}")]
    InvalidField {
        event: &'static str,
        #[source]
        source: ValueObjectError,
    },
}

/// メッセージ送信のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("Room not found")]
    RoomNotFound,

    /// 送信元セッションがルームの参加者ではない
    #[error("You are not in this room")]
    NotInRoom,

    /// 参加確認と追加の間にルームが消えた（競合）
    #[error("Room {0} disappeared before the message was stored")]
    RoomVanished(RoomId),
}
