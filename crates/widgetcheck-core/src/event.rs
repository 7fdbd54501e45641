//! Low-level synthetic input handed to the toolkit's injection primitive.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Synthetic input event, indistinguishable from hardware input once posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer moved to an absolute display position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed at the current pointer position
    MouseDown {
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released at the current pointer position
    MouseUp {
        /// Button released
        button: MouseButton,
    },
    /// Key pressed
    KeyDown {
        /// Character produced, `'\0'` for none
        character: char,
        /// Toolkit virtual key code, `0` for plain characters
        key_code: i32,
    },
    /// Key released
    KeyUp {
        /// Character produced, `'\0'` for none
        character: char,
        /// Toolkit virtual key code, `0` for plain characters
        key_code: i32,
    },
}

impl InputEvent {
    /// Check if this is a mouse event.
    #[must_use]
    pub const fn is_mouse(&self) -> bool {
        matches!(
            self,
            Self::MouseMove { .. } | Self::MouseDown { .. } | Self::MouseUp { .. }
        )
    }

    /// Check if this is a keyboard event.
    #[must_use]
    pub const fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::KeyUp { .. })
    }

    /// Short label used in diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MouseMove { .. } => "MouseMove",
            Self::MouseDown { .. } => "MouseDown",
            Self::MouseUp { .. } => "MouseUp",
            Self::KeyDown { .. } => "KeyDown",
            Self::KeyUp { .. } => "KeyUp",
        }
    }
}

/// Mouse button identifiers.
///
/// Toolkits number buttons from 1; [`MouseButton::id`] and
/// [`MouseButton::from_id`] convert at that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left (primary) mouse button
    Left,
    /// Middle mouse button (wheel click)
    Middle,
    /// Right (secondary) mouse button
    Right,
}

impl MouseButton {
    /// Toolkit button number.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
        }
    }

    /// Parse a toolkit button number.
    #[must_use]
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Toolkit virtual key codes and modifier masks.
pub mod key {
    /// Bit that distinguishes virtual key codes from characters.
    pub const KEYCODE_BIT: i32 = 1 << 24;
    /// Arrow up
    pub const ARROW_UP: i32 = KEYCODE_BIT + 1;
    /// Arrow down
    pub const ARROW_DOWN: i32 = KEYCODE_BIT + 2;
    /// Arrow left
    pub const ARROW_LEFT: i32 = KEYCODE_BIT + 3;
    /// Arrow right
    pub const ARROW_RIGHT: i32 = KEYCODE_BIT + 4;
    /// Page up
    pub const PAGE_UP: i32 = KEYCODE_BIT + 5;
    /// Page down
    pub const PAGE_DOWN: i32 = KEYCODE_BIT + 6;
    /// Home
    pub const HOME: i32 = KEYCODE_BIT + 7;
    /// End
    pub const END: i32 = KEYCODE_BIT + 8;
    /// Keypad `+`
    pub const KEYPAD_ADD: i32 = KEYCODE_BIT + 107;
    /// Keypad `-`
    pub const KEYPAD_SUBTRACT: i32 = KEYCODE_BIT + 109;
    /// Carriage return
    pub const CR: i32 = 13;
    /// Tab
    pub const TAB: i32 = 9;
    /// Escape
    pub const ESC: i32 = 27;
    /// Space
    pub const SPACE: i32 = 32;
    /// Shift modifier
    pub const SHIFT: i32 = 1 << 17;
    /// Control modifier
    pub const CTRL: i32 = 1 << 18;
    /// Alt modifier
    pub const ALT: i32 = 1 << 16;

    /// True for the modifier key codes.
    #[must_use]
    pub const fn is_modifier(code: i32) -> bool {
        code == SHIFT || code == CTRL || code == ALT
    }
}
