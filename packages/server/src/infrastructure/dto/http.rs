//! HTTP API response DTOs for the chat application.

use serde::{Deserialize, Serialize};

use super::websocket::UserDto;

/// Server information for the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfoDto {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: EndpointsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsDto {
    pub health: String,
    pub stats: String,
    pub rooms: String,
    pub websocket: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub timestamp: String, // ISO 8601
    /// Seconds since the server started
    pub uptime: f64,
}

/// Registry statistics plus live connection count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub room_count: usize,
    pub participant_count: usize,
    pub message_count: usize,
    pub connection_count: usize,
    pub timestamp: String, // ISO 8601
    pub uptime: f64,
}

/// Room summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub display_name: String,
    pub participant_count: usize,
    pub message_count: usize,
    pub created_at: String, // ISO 8601
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomListDto {
    pub rooms: Vec<RoomSummaryDto>,
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub display_name: String,
    pub participants: Vec<UserDto>,
    pub message_count: usize,
    pub created_at: String, // ISO 8601
}
