//! Router assembly and server main loop.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    ui::{
        handler::{
            get_room_detail, get_rooms, get_stats, health_check, root_info, websocket_handler,
        },
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the axum application for the given state, accepting cross-origin
/// requests from `allowed_origins`.
pub fn build_app(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root_info))
        .route("/api/health", get(health_check))
        .route("/api/stats", get(get_stats))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_id}", get(get_room_detail))
        .route("/ws", get(websocket_handler))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
}

/// Run the chat server until a shutdown signal is received.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(config.message_capacity));
    let allowed_origins = config.allowed_origins();
    let app = build_app(state.clone(), &allowed_origins);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Chat server listening on {}", listener.local_addr()?);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Accepting cross-origin requests from: {}", allowed_origins.join(", "));

    let stats_task = config
        .stats_interval()
        .map(|interval| tokio::spawn(log_stats(state, interval)));

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(task) = stats_task {
        task.abort();
    }
    tracing::info!("Server stopped");
    result
}

/// Periodically log registry and connection counts.
async fn log_stats(state: Arc<AppState>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let stats = state.repository.stats().await;
        let connections = state.hub.connection_count().await;
        tracing::info!(
            "Stats - Rooms: {}, Users: {}, Messages: {}, Connections: {}",
            stats.room_count,
            stats.participant_count,
            stats.message_count,
            connections
        );
    }
}
