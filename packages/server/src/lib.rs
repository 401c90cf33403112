//! Real-time room-based chat server library.
//!
//! Clients join named rooms over WebSocket, exchange messages, and receive
//! membership updates. Rooms keep a bounded message history so late joiners
//! get recent context.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
