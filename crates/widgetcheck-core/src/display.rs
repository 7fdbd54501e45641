//! The toolkit boundary.
//!
//! The harness never talks to a widget toolkit directly. A backend implements
//! [`Display`] over its event loop, listener registry and input injection, and
//! every harness operation is expressed in terms of it.
//!
//! Dispatch is single-threaded and cooperative: [`Display::post`] only
//! enqueues, and listeners run later from inside [`Display::read_and_dispatch`]
//! on the calling thread.

use crate::event::InputEvent;
use crate::event_type::{EventType, WidgetEvent};
use crate::geometry::{Point, Size};
use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Handle for a registered listener, used to unhook it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Listener callback. Runs on the dispatch thread, in dispatch order.
pub type Listener = Box<dyn FnMut(&WidgetEvent)>;

/// A widget toolkit's display connection.
pub trait Display {
    /// Platform this backend runs on.
    fn platform(&self) -> Platform;

    /// Enqueue synthetic input. Returns `false` if the backend rejected it.
    fn post(&mut self, event: &InputEvent) -> bool;

    /// Dispatch one pending event. Returns `false` when nothing was pending.
    fn read_and_dispatch(&mut self) -> bool;

    /// Wait up to `timeout` for new work to arrive.
    fn sleep(&mut self, timeout: Duration);

    /// Flush pending redraws and UI work synchronously.
    fn update(&mut self);

    /// Register `listener` for `event_type` on `widget`.
    fn add_listener(
        &mut self,
        widget: WidgetId,
        event_type: EventType,
        listener: Listener,
    ) -> ListenerId;

    /// Remove a listener. Returns `false` if it was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;

    /// Structural children of a widget (tree items, table columns, ...).
    fn children(&self, widget: WidgetId) -> Vec<WidgetId>;

    /// Whether `widget` is a top-level shell.
    fn is_shell(&self, widget: WidgetId) -> bool;

    /// Translate a widget-relative point to display coordinates.
    fn to_display(&self, widget: WidgetId, point: Point) -> Point;

    /// Current size of a widget's client area.
    fn size(&self, widget: WidgetId) -> Size;

    /// Compute preferred size and lay out children.
    fn pack(&mut self, widget: WidgetId);

    /// Lay out children without resizing.
    fn layout(&mut self, widget: WidgetId);

    /// Open a shell on screen.
    fn open(&mut self, shell: WidgetId);

    /// Request keyboard focus. Returns `false` if the widget refused it.
    fn set_focus(&mut self, widget: WidgetId) -> bool;

    /// Take keyboard focus unconditionally where the platform allows it.
    fn force_focus(&mut self, widget: WidgetId) -> bool;

    /// Minimize or restore a shell through the toolkit API.
    fn set_minimized(&mut self, shell: WidgetId, minimized: bool);
}
