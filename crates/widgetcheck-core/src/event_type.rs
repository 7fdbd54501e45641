//! High-level event types a toolkit dispatches to widget listeners.

use crate::display::WidgetId;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! event_types {
    ($($(#[$doc:meta])* $variant:ident = $code:literal,)+) => {
        /// Dispatch event type.
        ///
        /// Each variant carries the toolkit's numeric code and its symbolic
        /// name, so neither has to be derived from a table position.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum EventType {
            $($(#[$doc])* $variant,)+
        }

        impl EventType {
            /// Every event type, in code order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Numeric dispatch code.
            #[must_use]
            pub const fn code(self) -> i32 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Symbolic name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

event_types! {
    /// No event
    None = 0,
    /// Key pressed
    KeyDown = 1,
    /// Key released
    KeyUp = 2,
    /// Mouse button pressed
    MouseDown = 3,
    /// Mouse button released
    MouseUp = 4,
    /// Pointer moved
    MouseMove = 5,
    /// Pointer entered
    MouseEnter = 6,
    /// Pointer exited
    MouseExit = 7,
    /// Second press of a double click
    MouseDoubleClick = 8,
    /// Paint request
    Paint = 9,
    /// Widget moved
    Move = 10,
    /// Widget resized
    Resize = 11,
    /// Widget disposed
    Dispose = 12,
    /// Selection changed
    Selection = 13,
    /// Default action requested
    DefaultSelection = 14,
    /// Focus gained
    FocusIn = 15,
    /// Focus lost
    FocusOut = 16,
    /// Tree node expanded
    Expand = 17,
    /// Tree node collapsed
    Collapse = 18,
    /// Shell minimized
    Iconify = 19,
    /// Shell restored
    Deiconify = 20,
    /// Shell close requested
    Close = 21,
    /// Widget shown
    Show = 22,
    /// Widget hidden
    Hide = 23,
    /// Text modified
    Modify = 24,
    /// Text about to be modified
    Verify = 25,
    /// Shell activated
    Activate = 26,
    /// Shell deactivated
    Deactivate = 27,
    /// Help requested
    Help = 28,
    /// Drag gesture recognized
    DragDetect = 29,
    /// Menu item armed
    Arm = 30,
    /// Focus traversal requested
    Traverse = 31,
    /// Pointer hovered
    MouseHover = 32,
    /// Hardware key pressed
    HardKeyDown = 33,
    /// Hardware key released
    HardKeyUp = 34,
    /// Context menu requested
    MenuDetect = 35,
    /// Virtual item data requested
    SetData = 36,
    /// Mouse wheel turned
    MouseWheel = 37,
}

impl EventType {
    /// Whether the event's detail field carries a selection kind.
    #[must_use]
    pub const fn has_selection_detail(self) -> bool {
        matches!(self, Self::Selection | Self::DefaultSelection)
    }

    /// Whether the event's detail field carries a traversal kind.
    #[must_use]
    pub const fn has_traversal_detail(self) -> bool {
        matches!(self, Self::Traverse)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event as delivered to a widget listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEvent {
    /// What happened
    pub event_type: EventType,
    /// Widget the event was sent to
    pub widget: WidgetId,
    /// Secondary qualifier (selection or traversal kind), `0` when absent
    pub detail: i32,
    /// Character for key events
    pub character: char,
    /// Key code for key events
    pub key_code: i32,
}

impl WidgetEvent {
    /// Event with no detail or key payload.
    #[must_use]
    pub const fn new(event_type: EventType, widget: WidgetId) -> Self {
        Self {
            event_type,
            widget,
            detail: 0,
            character: '\0',
            key_code: 0,
        }
    }

    /// Set the detail code.
    #[must_use]
    pub const fn with_detail(mut self, detail: i32) -> Self {
        self.detail = detail;
        self
    }

    /// Set the key payload.
    #[must_use]
    pub const fn with_key(mut self, character: char, key_code: i32) -> Self {
        self.character = character;
        self.key_code = key_code;
        self
    }
}
