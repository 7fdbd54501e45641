//! Per-platform input quirks.
//!
//! Every platform-dependent constant the synthesizer and driver need lives in
//! this one table.

use serde::Serialize;
use widgetcheck_core::{key, MouseButton, Platform, Point};

/// Which corner of a shell the iconify reference point is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IconifyAnchor {
    /// Client-area origin; minimize sits near the left of the title bar
    TopLeft,
    /// Client-area top-right, inset by [`ICONIFY_RIGHT_INSET`]
    TopRight,
}

/// Distance from the right edge used for [`IconifyAnchor::TopRight`].
pub const ICONIFY_RIGHT_INSET: i32 = 20;

/// Platform capability entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformCaps {
    /// Platform this entry describes
    pub platform: Platform,
    /// Button that starts a drag
    pub drag_button: MouseButton,
    /// Corner the iconify reference point is measured from
    pub iconify_anchor: IconifyAnchor,
    /// Offset from the reference point to the minimize control
    pub iconify_offset: Point,
    /// Key code that expands a tree node
    pub expand_key: i32,
}

const CAPS: &[PlatformCaps] = &[
    PlatformCaps {
        platform: Platform::Win32,
        drag_button: MouseButton::Left,
        iconify_anchor: IconifyAnchor::TopRight,
        iconify_offset: Point::new(-30, -10),
        expand_key: key::ARROW_RIGHT,
    },
    PlatformCaps {
        platform: Platform::Gtk,
        drag_button: MouseButton::Left,
        iconify_anchor: IconifyAnchor::TopRight,
        iconify_offset: Point::new(-30, -10),
        expand_key: key::KEYPAD_ADD,
    },
    PlatformCaps {
        platform: Platform::Cocoa,
        drag_button: MouseButton::Left,
        iconify_anchor: IconifyAnchor::TopLeft,
        iconify_offset: Point::new(40, -10),
        expand_key: key::ARROW_RIGHT,
    },
    PlatformCaps {
        platform: Platform::Carbon,
        drag_button: MouseButton::Left,
        iconify_anchor: IconifyAnchor::TopLeft,
        iconify_offset: Point::new(40, -10),
        expand_key: key::ARROW_RIGHT,
    },
    PlatformCaps {
        platform: Platform::Motif,
        drag_button: MouseButton::Middle,
        iconify_anchor: IconifyAnchor::TopRight,
        iconify_offset: Point::new(-30, -10),
        expand_key: key::ARROW_RIGHT,
    },
];

impl PlatformCaps {
    /// Capability entry for a platform.
    #[must_use]
    pub fn for_platform(platform: Platform) -> Self {
        CAPS.iter()
            .copied()
            .find(|caps| caps.platform == platform)
            .unwrap_or(CAPS[0])
    }
}
