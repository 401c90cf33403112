//! Real-time room-based chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-server -- --port 3001
//! ```

use clap::Parser;
use huddle_server::ServerConfig;
use huddle_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = huddle_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
