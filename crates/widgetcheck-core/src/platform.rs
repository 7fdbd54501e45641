//! Windowing platform identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Windowing platform a toolkit backend runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Windows
    Win32,
    /// GTK (Linux, BSD)
    Gtk,
    /// macOS Cocoa
    Cocoa,
    /// Legacy macOS Carbon
    Carbon,
    /// X11 Motif
    Motif,
}

impl Platform {
    /// Every known platform.
    pub const ALL: &'static [Self] = &[
        Self::Win32,
        Self::Gtk,
        Self::Cocoa,
        Self::Carbon,
        Self::Motif,
    ];

    /// Platform identifier string.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Win32 => "win32",
            Self::Gtk => "gtk",
            Self::Cocoa => "cocoa",
            Self::Carbon => "carbon",
            Self::Motif => "motif",
        }
    }

    /// Best guess for the platform this process was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Win32
        } else if cfg!(target_os = "macos") {
            Self::Cocoa
        } else {
            Self::Gtk
        }
    }

    /// Whether window chrome follows the macOS layout.
    #[must_use]
    pub const fn is_mac(self) -> bool {
        matches!(self, Self::Cocoa | Self::Carbon)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when parsing an unknown platform identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform: {}", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_id_roundtrip() {
        for p in Platform::ALL {
            assert_eq!(p.id().parse::<Platform>(), Ok(*p));
        }
    }

    #[test]
    fn test_platform_parse_case_insensitive() {
        assert_eq!("GTK".parse::<Platform>(), Ok(Platform::Gtk));
    }

    #[test]
    fn test_platform_parse_unknown() {
        let err = "beos".parse::<Platform>().unwrap_err();
        assert_eq!(err.to_string(), "unknown platform: beos");
    }

    #[test]
    fn test_platform_is_mac() {
        assert!(Platform::Carbon.is_mac());
        assert!(Platform::Cocoa.is_mac());
        assert!(!Platform::Win32.is_mac());
    }

    #[test]
    fn test_platform_serde_lowercase() {
        let json = serde_json::to_string(&Platform::Win32).unwrap();
        assert_eq!(json, "\"win32\"");
    }
}
