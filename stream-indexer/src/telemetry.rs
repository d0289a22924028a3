//! Telemetry initialization.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// The filter comes from `RUST_LOG` (default `info`); setting
/// `LOG_FORMAT=json` switches to JSON-formatted output.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
