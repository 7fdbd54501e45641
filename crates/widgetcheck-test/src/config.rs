//! Harness configuration (from .widgetcheck.toml).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use widgetcheck_core::Platform;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "WIDGETCHECK_CONFIG";

/// Consistency harness settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Run consistency scenarios at all
    pub enabled: bool,
    /// Upper bound on one drain loop, in milliseconds
    pub drain_timeout_ms: u64,
    /// Sleep between polls while waiting on a predicate, in milliseconds
    pub poll_interval_ms: u64,
    /// Fail a scenario whose drain timed out even if its events matched
    pub strict_timeout: bool,
    /// Force a platform instead of asking the backend
    pub platform: Option<Platform>,
    /// Focus the control before synthesizing input
    pub focus_before_event: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            drain_timeout_ms: 5000,
            poll_interval_ms: 5,
            strict_timeout: false,
            platform: None,
            focus_before_event: true,
        }
    }
}

impl HarnessConfig {
    /// Default config file name.
    pub const CONFIG_FILE: &'static str = ".widgetcheck.toml";

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Load a config file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from `$WIDGETCHECK_CONFIG`, else `.widgetcheck.toml` in the
    /// current directory.
    ///
    /// Returns the default config if neither exists or the file is unusable.
    #[must_use]
    pub fn load_default() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map_or_else(|| Path::new(Self::CONFIG_FILE).to_path_buf(), Into::into);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring harness config");
                Self::default()
            }
        }
    }

    /// Reject values the drain loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drain_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "drain_timeout_ms must be positive".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "poll_interval_ms must be positive".to_string(),
            ));
        }
        if self.poll_interval_ms > self.drain_timeout_ms {
            return Err(ConfigError::InvalidValue(format!(
                "poll_interval_ms ({}) exceeds drain_timeout_ms ({})",
                self.poll_interval_ms, self.drain_timeout_ms
            )));
        }
        Ok(())
    }

    /// Drain timeout as a duration.
    #[must_use]
    pub const fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }

    /// Poll interval as a duration.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Generate a sample config file.
    #[must_use]
    pub fn sample_config() -> String {
        r#"# widgetcheck consistency harness configuration
# Place this file at .widgetcheck.toml, or point WIDGETCHECK_CONFIG at it.

# Set to false to skip every consistency scenario
enabled = true

# Upper bound on one drain loop
drain_timeout_ms = 5000

# Sleep between polls while waiting on a predicate
poll_interval_ms = 5

# Fail scenarios whose drain timed out even when events matched
strict_timeout = false

# Force a platform: win32, gtk, cocoa, carbon, motif
# platform = "gtk"

# Focus the control before synthesizing input
focus_before_event = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = HarnessConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.enabled);
        assert_eq!(config.drain_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_sample_config_parses_to_default() {
        let config = HarnessConfig::from_toml(&HarnessConfig::sample_config()).unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = HarnessConfig::from_toml("strict_timeout = true\nplatform = \"motif\"").unwrap();
        assert!(config.strict_timeout);
        assert_eq!(config.platform, Some(Platform::Motif));
        assert_eq!(config.poll_interval_ms, 5);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = HarnessConfig {
            drain_timeout_ms: 250,
            platform: Some(Platform::Win32),
            ..HarnessConfig::default()
        };
        let back = HarnessConfig::from_toml(&config.to_toml()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = HarnessConfig::from_toml("drain_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_poll_longer_than_timeout_rejected() {
        let err = HarnessConfig::from_toml("drain_timeout_ms = 10\npoll_interval_ms = 20").unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = HarnessConfig::from_toml("enabled = maybe").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = HarnessConfig::load_from_file(Path::new("/nonexistent/widgetcheck.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
