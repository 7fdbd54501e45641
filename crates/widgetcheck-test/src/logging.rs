//! Test tracing setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "widgetcheck_test=info";

/// Install a test-friendly subscriber honoring `RUST_LOG`.
///
/// Output goes through the test writer so it is captured per test. Safe to
/// call from every test; only the first call installs anything, and the
/// returned error just reports that a subscriber already exists.
pub fn try_init_test_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_test_writer()
        .with_target(true)
        .try_init()
}
