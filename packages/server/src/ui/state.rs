//! Server state shared by every handler.

use serde::Deserialize;
use std::{sync::Arc, time::Instant};

use crate::{
    domain::RoomRepository,
    infrastructure::repository::InMemoryRoomRepository,
    ui::{chat_handler::ChatHandler, hub::ConnectionHub},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    /// Optional identity used for `leave-room` before the first join
    pub identity: Option<String>,
}

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn RoomRepository>,
    /// Live sessions and room broadcast scopes
    pub hub: Arc<ConnectionHub>,
    pub chat_handler: Arc<ChatHandler>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(message_capacity: usize) -> Self {
        let repository: Arc<dyn RoomRepository> =
            Arc::new(InMemoryRoomRepository::with_message_capacity(message_capacity));
        let hub = Arc::new(ConnectionHub::new());
        let chat_handler = Arc::new(ChatHandler::new(repository.clone(), hub.clone()));

        Self {
            repository,
            hub,
            chat_handler,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the server started
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
