//! Whether synthetic input can run in this environment.

use crate::config::HarnessConfig;

/// Set to anything but `0` or `false` to skip input-injecting tests.
pub const SKIP_INPUT_ENV: &str = "WIDGETCHECK_SKIP_INPUT";

/// Whether consistency tests should inject input here.
///
/// False when [`SKIP_INPUT_ENV`] is set or the loaded config disables checks.
#[must_use]
pub fn input_injection_available() -> bool {
    let skip = std::env::var(SKIP_INPUT_ENV).ok();
    available(skip.as_deref(), &HarnessConfig::load_default())
}

/// Log that a consistency test was skipped.
pub fn report_skip(test: &str) {
    tracing::warn!(test, "consistency test skipped: input injection unavailable");
}

fn available(skip: Option<&str>, config: &HarnessConfig) -> bool {
    let skipped = skip.is_some_and(|value| {
        let value = value.trim();
        !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
    });
    if skipped {
        tracing::info!(env = SKIP_INPUT_ENV, "input injection disabled by environment");
        return false;
    }
    config.enabled
}
