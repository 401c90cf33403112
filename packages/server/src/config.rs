//! Server configuration (command-line flags with environment fallbacks).

use std::time::Duration;

use clap::Parser;

use crate::domain::DEFAULT_MESSAGE_CAPACITY;

/// Origin of the bundled web client during development; always allowed.
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:3000";

/// Real-time room-based chat server.
#[derive(Parser, Debug, Clone)]
#[command(name = "huddle-server", version, about)]
pub struct ServerConfig {
    /// Host to bind.
    #[arg(long, env = "HUDDLE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind (0 for auto-assign).
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Messages kept per room before the oldest are evicted (at least 1).
    #[arg(
        long,
        env = "HUDDLE_MESSAGE_CAPACITY",
        default_value_t = DEFAULT_MESSAGE_CAPACITY,
        value_parser = parse_message_capacity
    )]
    pub message_capacity: usize,

    /// Web client origin allowed by CORS.
    #[arg(long, env = "CLIENT_URL", default_value = DEFAULT_CLIENT_URL)]
    pub client_url: String,

    /// Seconds between stats log lines (0 disables).
    #[arg(long, env = "HUDDLE_STATS_INTERVAL_SECS", default_value_t = 30)]
    pub stats_interval_secs: u64,

    /// Default log level when RUST_LOG is not set.
    #[arg(long, env = "HUDDLE_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn stats_interval(&self) -> Option<Duration> {
        (self.stats_interval_secs > 0).then(|| Duration::from_secs(self.stats_interval_secs))
    }

    /// Origins accepted for cross-origin requests: the configured client URL
    /// plus [`DEFAULT_CLIENT_URL`].
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![self.client_url.clone()];
        if self.client_url != DEFAULT_CLIENT_URL {
            origins.push(DEFAULT_CLIENT_URL.to_string());
        }
        origins
    }
}

fn parse_message_capacity(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("message capacity must be at least 1".to_string()),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしでデフォルト値が使われる
        // when (操作):
        let config = ServerConfig::try_parse_from(["huddle-server"]).unwrap();

        // then (期待する結果):
        assert_eq!(config.message_capacity, 100);
        assert_eq!(config.stats_interval(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_flags_override_defaults() {
        // テスト項目: フラグで各値を上書きできる
        // when (操作):
        let config = ServerConfig::try_parse_from([
            "huddle-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--stats-interval-secs",
            "0",
        ])
        .unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.stats_interval(), None);
    }

    #[test]
    fn test_zero_message_capacity_is_rejected() {
        // テスト項目: メッセージ保持数 0 は設定できない
        // when (操作):
        let zero = ServerConfig::try_parse_from(["huddle-server", "--message-capacity", "0"]);
        let one = ServerConfig::try_parse_from(["huddle-server", "--message-capacity", "1"]);

        // then (期待する結果):
        assert!(zero.is_err());
        assert_eq!(one.unwrap().message_capacity, 1);
    }

    #[test]
    fn test_allowed_origins() {
        // テスト項目: 設定したクライアント URL と localhost:3000 が許可され、重複しない
        // when (操作):
        let custom = ServerConfig::try_parse_from([
            "huddle-server",
            "--client-url",
            "https://chat.example.com",
        ])
        .unwrap();
        let local = ServerConfig::try_parse_from([
            "huddle-server",
            "--client-url",
            "http://localhost:3000",
        ])
        .unwrap();

        // then (期待する結果):
        assert_eq!(
            custom.allowed_origins(),
            vec!["https://chat.example.com", "http://localhost:3000"]
        );
        assert_eq!(local.allowed_origins(), vec!["http://localhost:3000"]);
    }
}
