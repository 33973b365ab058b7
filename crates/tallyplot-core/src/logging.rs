//! Logging setup built on `tracing-subscriber`.
//!
//! Engine crates only emit `tracing` events; installing a subscriber is the
//! host application's choice. These helpers give hosts and tests a one-line
//! default.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,tallyplot=debug,tallyplot_geometry=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global fmt subscriber.
///
/// Panics if a global subscriber has already been set; use [`try_init`]
/// when that can happen (tests, plugins).
pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

/// Install a global fmt subscriber, returning an error if one already exists.
pub fn try_init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .try_init()
}

/// Install a subscriber that writes through the test harness's captured output.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("trace"))
        .with_test_writer()
        .try_init();
}
