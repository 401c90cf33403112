//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use huddle_shared::time::{get_jst_timestamp, timestamp_to_jst_rfc3339};

use crate::{
    domain::{Room, RoomId},
    infrastructure::dto::{
        http::{
            EndpointsDto, HealthDto, RoomDetailDto, RoomListDto, RoomSummaryDto, ServerInfoDto,
            StatsDto,
        },
        websocket::UserDto,
    },
    ui::state::AppState,
};

fn now_rfc3339() -> String {
    timestamp_to_jst_rfc3339(get_jst_timestamp())
}

/// Server information and endpoint directory
pub async fn root_info() -> Json<ServerInfoDto> {
    Json(ServerInfoDto {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Real-time room-based chat server".to_string(),
        endpoints: EndpointsDto {
            health: "/api/health".to_string(),
            stats: "/api/stats".to_string(),
            rooms: "/api/rooms".to_string(),
            websocket: "/ws".to_string(),
        },
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "healthy".to_string(),
        timestamp: now_rfc3339(),
        uptime: state.uptime_secs(),
    })
}

/// Registry statistics and live connection count
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    let stats = state.repository.stats().await;
    let connection_count = state.hub.connection_count().await;

    Json(StatsDto {
        room_count: stats.room_count,
        participant_count: stats.participant_count,
        message_count: stats.message_count,
        connection_count,
        timestamp: now_rfc3339(),
        uptime: state.uptime_secs(),
    })
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<RoomListDto> {
    let rooms = state
        .repository
        .list_rooms()
        .await
        .iter()
        .map(|room| RoomSummaryDto {
            id: room.id.as_str().to_string(),
            display_name: room.display_name.clone(),
            participant_count: room.participants.len(),
            message_count: room.messages.len(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        })
        .collect();

    Json(RoomListDto { rooms })
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let Ok(room_id) = RoomId::try_from(room_id) else {
        return Err(StatusCode::NOT_FOUND);
    };

    let room = state
        .repository
        .get_room(&room_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(room_detail(&room)))
}

fn room_detail(room: &Room) -> RoomDetailDto {
    RoomDetailDto {
        id: room.id.as_str().to_string(),
        display_name: room.display_name.clone(),
        participants: room.participants.iter().map(UserDto::from).collect(),
        message_count: room.messages.len(),
        created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
    }
}
