//! Synthetic input sequences.
//!
//! Every operation posts low-level input through [`Display::post`]. Posting
//! only enqueues; listeners see the resulting widget events once the queue is
//! drained.

use crate::platform::PlatformCaps;
use widgetcheck_core::{Display, InputEvent, MouseButton, Point};

/// Posts mouse and keyboard sequences for one display.
pub struct EventSynthesizer<'d, D: Display> {
    display: &'d mut D,
    caps: PlatformCaps,
}

impl<'d, D: Display> EventSynthesizer<'d, D> {
    /// Synthesizer using the capability entry for the display's platform.
    pub fn new(display: &'d mut D) -> Self {
        let caps = PlatformCaps::for_platform(display.platform());
        Self::with_caps(display, caps)
    }

    /// Synthesizer using an explicit capability entry.
    pub fn with_caps(display: &'d mut D, caps: PlatformCaps) -> Self {
        Self { display, caps }
    }

    /// Capability entry in use.
    #[must_use]
    pub const fn caps(&self) -> &PlatformCaps {
        &self.caps
    }

    /// Post one event. A rejected post is logged and reported as `false`.
    pub fn post(&mut self, event: InputEvent) -> bool {
        let ok = self.display.post(&event);
        if !ok {
            tracing::warn!(event = event.label(), ?event, "input injection rejected");
        }
        ok
    }

    /// Move to `point`, press and release `button`.
    pub fn click(&mut self, point: Point, button: MouseButton) -> bool {
        let moved = self.post(InputEvent::MouseMove { position: point });
        let down = self.post(InputEvent::MouseDown { button });
        let up = self.post(InputEvent::MouseUp { button });
        moved && down && up
    }

    /// Two clicks at the same point.
    pub fn double_click(&mut self, point: Point, button: MouseButton) -> bool {
        let first = self.click(point, button);
        let second = self.click(point, button);
        first && second
    }

    /// Press and release one key.
    pub fn key_press(&mut self, character: char, key_code: i32) -> bool {
        let down = self.post(InputEvent::KeyDown {
            character,
            key_code,
        });
        let up = self.post(InputEvent::KeyUp {
            character,
            key_code,
        });
        down && up
    }

    /// Hold the first key while pressing the second.
    ///
    /// Posts `KeyDown(1) KeyDown(2) KeyUp(2) KeyUp(1)`.
    pub fn double_key_press(
        &mut self,
        held_char: char,
        held_code: i32,
        character: char,
        key_code: i32,
    ) -> bool {
        let held = self.post(InputEvent::KeyDown {
            character: held_char,
            key_code: held_code,
        });
        let inner = self.key_press(character, key_code);
        let released = self.post(InputEvent::KeyUp {
            character: held_char,
            key_code: held_code,
        });
        held && inner && released
    }

    /// Press at `origin`, move to `destination`, release.
    pub fn drag(&mut self, origin: Point, destination: Point) -> bool {
        let button = self.caps.drag_button;
        let start = self.post(InputEvent::MouseMove { position: origin });
        let down = self.post(InputEvent::MouseDown { button });
        let moved = self.post(InputEvent::MouseMove {
            position: destination,
        });
        let up = self.post(InputEvent::MouseUp { button });
        start && down && moved && up
    }

    /// Click `first`, flush pending UI work, then click `second`.
    ///
    /// The flush realizes anything the first click opened (a combo popup) so
    /// the second click lands on it.
    pub fn two_step_select(&mut self, first: Point, second: Point) -> bool {
        let opened = self.click(first, MouseButton::Left);
        self.display.update();
        let chosen = self.click(second, MouseButton::Left);
        opened && chosen
    }

    /// Click the shell's minimize control relative to the reference `point`.
    pub fn iconify_click(&mut self, point: Point, button: MouseButton) -> bool {
        let target = point + self.caps.iconify_offset;
        self.click(target, button)
    }
}
