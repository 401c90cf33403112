//! WebSocket chat server implementation.

pub mod broadcaster;
pub mod chat_handler;
mod handler;
pub mod hub;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_app, run};
