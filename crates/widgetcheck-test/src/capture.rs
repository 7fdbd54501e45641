//! Ordered capture of dispatched widget events.

use crate::descriptor::SymbolicEvent;
use crate::detail::{decode_selection_detail, decode_traversal_detail};
use crate::error::DetailError;
use std::cell::RefCell;
use std::rc::Rc;
use widgetcheck_core::{Display, EventType, ListenerId, WidgetEvent, WidgetId};

#[derive(Debug, Default)]
struct CaptureState {
    log: Vec<SymbolicEvent>,
    faults: Vec<DetailError>,
}

/// Listeners recording events into one shared, ordered log.
///
/// The log is single-threaded: listeners run on the thread that drains the
/// display.
#[derive(Debug, Default)]
pub struct EventCapture {
    state: Rc<RefCell<CaptureState>>,
    listeners: Vec<ListenerId>,
}

impl EventCapture {
    /// Empty capture with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one listener per `(widget, type)` pair.
    pub fn hook<D: Display>(
        &mut self,
        display: &mut D,
        widgets: &[WidgetId],
        types: &[EventType],
    ) {
        for &widget in widgets {
            for &event_type in types {
                let state = Rc::clone(&self.state);
                let id = display.add_listener(
                    widget,
                    event_type,
                    Box::new(move |event: &WidgetEvent| record(&state, event)),
                );
                self.listeners.push(id);
            }
        }
        tracing::debug!(
            widgets = widgets.len(),
            types = types.len(),
            listeners = self.listeners.len(),
            "hooked capture listeners"
        );
    }

    /// Remove every registered listener. Returns how many the display removed.
    pub fn unhook<D: Display>(&mut self, display: &mut D) -> usize {
        let removed = self
            .listeners
            .drain(..)
            .filter(|&id| display.remove_listener(id))
            .count();
        tracing::debug!(removed, "unhooked capture listeners");
        removed
    }

    /// Number of listeners currently registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of events captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().log.len()
    }

    /// Whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().log.is_empty()
    }

    /// Run `f` over the log captured so far.
    pub fn with_log<R>(&self, f: impl FnOnce(&[SymbolicEvent]) -> R) -> R {
        f(&self.state.borrow().log)
    }

    /// Move the captured log out, leaving it empty.
    pub fn take_log(&mut self) -> Vec<SymbolicEvent> {
        std::mem::take(&mut self.state.borrow_mut().log)
    }

    /// Detail decode failures seen while recording.
    #[must_use]
    pub fn faults(&self) -> Vec<DetailError> {
        self.state.borrow().faults.clone()
    }
}

fn record(state: &RefCell<CaptureState>, event: &WidgetEvent) {
    let name = event.event_type.name();
    let descriptor = if event.event_type.has_selection_detail() {
        SymbolicEvent::with_subtype(name, decode_selection_detail(event.detail))
    } else if event.event_type.has_traversal_detail() {
        match decode_traversal_detail(event.detail) {
            Ok(kind) => SymbolicEvent::with_subtype(name, kind),
            Err(err) => {
                tracing::error!(widget = event.widget.0, %err, "malformed traversal detail");
                state.borrow_mut().faults.push(err);
                SymbolicEvent::new(name)
            }
        }
    } else {
        SymbolicEvent::new(name)
    };
    state.borrow_mut().log.push(descriptor);
}
