//! Tracing initialization for the composition root.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber with `RUST_LOG` filtering,
/// defaulting to `info`. Call once, as early as possible, from the binary
/// that embeds this library.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
