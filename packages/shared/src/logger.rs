//! Logger setup based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise `name` (and the server library
/// crate) are logged at `default_level`, HTTP tracing at `info`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_logger(name: &str, default_level: &str) {
    let target = name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{target}={default_level},huddle_server={default_level},tower_http=info"
        ))
    });

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();

    if result.is_err() {
        tracing::debug!("Logger already initialized, skipping");
    }
}
