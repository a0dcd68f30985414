//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
///
/// Reads the filter from `RUST_LOG`, falling back to `info`.
pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Initialize tracing with a custom fallback filter used when `RUST_LOG` is unset
pub fn init_tracing_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second initialisation (tests, embedding hosts) is not an error for us.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
