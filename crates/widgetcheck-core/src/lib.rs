//! Core types for the widgetcheck event consistency harness.
//!
//! This crate provides the vocabulary shared by the harness and toolkit backends:
//! - Pixel geometry: [`Point`], [`Size`], [`Rect`]
//! - Synthetic input: [`InputEvent`], [`MouseButton`], the [`key`] codes
//! - Dispatched events: [`EventType`], [`WidgetEvent`]
//! - The toolkit boundary: [`Display`]

mod display;
mod event;
mod event_type;
mod geometry;
mod platform;

pub use display::{Display, Listener, ListenerId, WidgetId};
pub use event::{key, InputEvent, MouseButton};
pub use event_type::{EventType, WidgetEvent};
pub use geometry::{Point, Rect, Size};
pub use platform::{Platform, UnknownPlatform};
