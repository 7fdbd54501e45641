//! Headless widget toolkit.
//!
//! [`SimDisplay`] implements [`Display`] without a window system: input is
//! queued by [`Display::post`] and turned into widget events, synchronously and
//! in registration order, by [`Display::read_and_dispatch`]. Widgets behave
//! like their native counterparts closely enough for every registered
//! interaction pattern to be observed, including the platform-dependent ones.
//!
//! [`Display::update`] dispatches everything queued and then realizes pending
//! popups, so input posted before it has taken effect when it returns.
//!
//! Geometry is in pixels. Shell bounds are the client area in display
//! coordinates; the title bar sits [`TITLE_BAR_HEIGHT`] pixels above it. Other
//! widgets are positioned relative to their parent and have no size until
//! their shell is packed or laid out.

use crate::detail::{traversal, SELECTION_CHECK, SELECTION_DRAG};
use crate::platform::{IconifyAnchor, PlatformCaps, ICONIFY_RIGHT_INSET};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::time::Duration;
use widgetcheck_core::{
    key, Display, EventType, InputEvent, Listener, ListenerId, MouseButton, Platform, Point, Rect,
    Size, WidgetEvent, WidgetId,
};

/// Height of a shell's title bar.
pub const TITLE_BAR_HEIGHT: i32 = 20;
/// Height of one list, tree or popup row.
pub const ROW_HEIGHT: i32 = 20;
/// Width of slider arrows, the table check column and the tree expander.
pub const GUTTER_WIDTH: i32 = 16;
/// Width of a slider thumb.
pub const THUMB_WIDTH: i32 = 20;
/// Width of a combo's drop-down button.
pub const COMBO_BUTTON_WIDTH: i32 = 20;
/// Pointer travel, on either axis, that turns a press into a drag.
pub const DRAG_THRESHOLD: i32 = 3;
/// Maximum distance between the clicks of a double click.
pub const DOUBLE_CLICK_DISTANCE: i32 = 4;
/// Width of the title bar minimize control.
pub const MINIMIZE_BOX_WIDTH: i32 = 20;

/// Most recent widget events kept for [`SimDisplay::take_dispatched`].
pub const DISPATCH_HISTORY: usize = 1024;

const POPUP_ROWS: i32 = 5;
const MAX_SLEEP: Duration = Duration::from_millis(50);

/// Widget classes the simulator knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    /// Top-level or dialog window
    Shell,
    /// Push button
    PushButton,
    /// Check box
    CheckBox,
    /// Single-column list
    List,
    /// Tree of [`WidgetKind::TreeItem`]s
    Tree,
    /// Tree node; nest items to make a node expandable
    TreeItem,
    /// Table with a check column
    Table,
    /// Single-line text field
    Text,
    /// Slider with arrows, thumb and trough
    Slider,
    /// Drop-down combo
    Combo,
    /// Drop-down list owned by a combo
    ComboPopup,
}

impl WidgetKind {
    /// Size a widget of this kind asks for when packed.
    #[must_use]
    pub const fn preferred_size(self) -> Size {
        match self {
            Self::Shell => Size::new(200, 150),
            Self::PushButton => Size::new(80, 30),
            Self::CheckBox | Self::Text | Self::Combo => Size::new(120, 24),
            Self::List | Self::Tree | Self::Table => Size::new(120, 100),
            Self::Slider => Size::new(160, 24),
            Self::TreeItem => Size::new(120, ROW_HEIGHT),
            Self::ComboPopup => Size::new(120, ROW_HEIGHT * POPUP_ROWS),
        }
    }

    /// Whether the widget can hold keyboard focus.
    #[must_use]
    pub const fn is_focusable(self) -> bool {
        !matches!(self, Self::Shell | Self::TreeItem | Self::ComboPopup)
    }

    /// Whether a press-and-move on the widget starts a drag.
    #[must_use]
    pub const fn is_drag_source(self) -> bool {
        matches!(
            self,
            Self::Text | Self::List | Self::Tree | Self::Table | Self::Combo
        )
    }

    const fn is_item_view(self) -> bool {
        matches!(self, Self::List | Self::Tree | Self::Table)
    }
}

#[derive(Debug)]
struct SimWidget {
    kind: WidgetKind,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    bounds: Rect,
    open: bool,
    minimized: bool,
    expanded: bool,
    checked: bool,
    selected: usize,
    text: String,
    popup: Option<WidgetId>,
    saved_focus: Option<WidgetId>,
}

impl SimWidget {
    fn new(kind: WidgetKind, parent: Option<WidgetId>, bounds: Rect) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            bounds,
            open: false,
            minimized: false,
            expanded: false,
            checked: false,
            selected: 0,
            text: String::new(),
            popup: None,
            saved_focus: None,
        }
    }
}

struct Registration {
    id: ListenerId,
    widget: WidgetId,
    event_type: EventType,
    listener: Listener,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Minimize(WidgetId),
    TitleBar(WidgetId),
    Widget(WidgetId),
}

#[derive(Debug, Clone, Copy)]
struct Press {
    button: MouseButton,
    target: Target,
    origin: Point,
    dragging: bool,
}

#[derive(Debug, Clone, Copy)]
struct ClickChain {
    button: MouseButton,
    at: Point,
    count: u32,
}

/// In-memory [`Display`].
pub struct SimDisplay {
    platform: Platform,
    caps: PlatformCaps,
    widgets: BTreeMap<WidgetId, SimWidget>,
    next_widget: u64,
    listeners: Vec<Registration>,
    next_listener: u64,
    queue: VecDeque<InputEvent>,
    injection_enabled: bool,
    rejected: usize,
    cursor: Point,
    press: Option<Press>,
    last_click: Option<ClickChain>,
    focus: Option<WidgetId>,
    modifiers: i32,
    pending_popups: Vec<WidgetId>,
    dispatched: VecDeque<WidgetEvent>,
}

impl fmt::Debug for SimDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimDisplay")
            .field("platform", &self.platform)
            .field("widgets", &self.widgets.len())
            .field("listeners", &self.listeners.len())
            .field("queued", &self.queue.len())
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl SimDisplay {
    /// Empty display behaving like `platform`.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            caps: PlatformCaps::for_platform(platform),
            widgets: BTreeMap::new(),
            next_widget: 1,
            listeners: Vec::new(),
            next_listener: 1,
            queue: VecDeque::new(),
            injection_enabled: true,
            rejected: 0,
            cursor: Point::ORIGIN,
            press: None,
            last_click: None,
            focus: None,
            modifiers: 0,
            pending_popups: Vec::new(),
            dispatched: VecDeque::new(),
        }
    }

    // =========================================================================
    // Widget Tree
    // =========================================================================

    /// Top-level shell whose client area starts at `origin`.
    ///
    /// A shell created with an empty size takes its preferred size when packed.
    pub fn create_shell(&mut self, origin: Point, size: Size) -> WidgetId {
        self.insert(
            WidgetKind::Shell,
            None,
            Rect::new(origin.x, origin.y, size.width, size.height),
        )
    }

    /// Child widget of `parent`.
    ///
    /// A [`WidgetKind::Shell`] child is a dialog placed just inside its parent.
    /// A [`WidgetKind::Combo`] also gets its drop-down popup.
    pub fn create_widget(&mut self, parent: WidgetId, kind: WidgetKind) -> WidgetId {
        let bounds = if kind == WidgetKind::Shell {
            let origin = self.origin_of(parent).offset(20, 20 + TITLE_BAR_HEIGHT);
            Rect::new(origin.x, origin.y, 0, 0)
        } else {
            Rect::new(0, 0, 0, 0)
        };
        let id = self.insert(kind, Some(parent), bounds);
        if let Some(node) = self.widgets.get_mut(&parent) {
            node.children.push(id);
        }
        if kind == WidgetKind::Combo {
            let popup = self.insert(WidgetKind::ComboPopup, Some(id), Rect::new(0, 0, 0, 0));
            if let Some(combo) = self.widgets.get_mut(&id) {
                combo.popup = Some(popup);
            }
        }
        id
    }

    fn insert(&mut self, kind: WidgetKind, parent: Option<WidgetId>, bounds: Rect) -> WidgetId {
        let id = WidgetId::new(self.next_widget);
        self.next_widget += 1;
        self.widgets.insert(id, SimWidget::new(kind, parent, bounds));
        id
    }

    /// Kind of a widget.
    #[must_use]
    pub fn kind(&self, widget: WidgetId) -> Option<WidgetKind> {
        self.widgets.get(&widget).map(|w| w.kind)
    }

    /// Drop-down popup of a combo.
    #[must_use]
    pub fn popup(&self, combo: WidgetId) -> Option<WidgetId> {
        self.widgets.get(&combo).and_then(|w| w.popup)
    }

    /// Whether a popup or shell is currently shown.
    #[must_use]
    pub fn is_open(&self, widget: WidgetId) -> bool {
        self.widgets.get(&widget).is_some_and(|w| w.open)
    }

    /// Whether a shell is minimized.
    #[must_use]
    pub fn is_minimized(&self, shell: WidgetId) -> bool {
        self.widgets.get(&shell).is_some_and(|w| w.minimized)
    }

    /// Whether a check box or the selected table row is checked.
    #[must_use]
    pub fn is_checked(&self, widget: WidgetId) -> bool {
        self.widgets.get(&widget).is_some_and(|w| w.checked)
    }

    /// Whether a tree item is expanded.
    #[must_use]
    pub fn is_expanded(&self, item: WidgetId) -> bool {
        self.widgets.get(&item).is_some_and(|w| w.expanded)
    }

    /// Contents of a text field, or the chosen row of a combo.
    #[must_use]
    pub fn text(&self, widget: WidgetId) -> &str {
        self.widgets.get(&widget).map_or("", |w| w.text.as_str())
    }

    /// Widget holding keyboard focus.
    #[must_use]
    pub const fn focused(&self) -> Option<WidgetId> {
        self.focus
    }

    // =========================================================================
    // Injection And Inspection
    // =========================================================================

    /// Make [`Display::post`] accept or reject input.
    pub fn set_injection_enabled(&mut self, enabled: bool) {
        self.injection_enabled = enabled;
    }

    /// Number of posts rejected since creation.
    #[must_use]
    pub const fn rejected_posts(&self) -> usize {
        self.rejected
    }

    /// Input posted but not yet dispatched.
    #[must_use]
    pub fn pending_input(&self) -> Vec<InputEvent> {
        self.queue.iter().copied().collect()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Widget events emitted since the last call, listened to or not.
    ///
    /// Only the newest [`DISPATCH_HISTORY`] events are kept.
    pub fn take_dispatched(&mut self) -> Vec<WidgetEvent> {
        self.dispatched.drain(..).collect()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn origin_of(&self, widget: WidgetId) -> Point {
        let mut origin = Point::ORIGIN;
        let mut current = Some(widget);
        while let Some(id) = current {
            let Some(node) = self.widgets.get(&id) else {
                break;
            };
            origin = origin + node.bounds.origin();
            current = match node.kind {
                WidgetKind::Shell | WidgetKind::ComboPopup => None,
                WidgetKind::TreeItem => self.tree_of(id),
                _ => node.parent,
            };
        }
        origin
    }

    fn tree_of(&self, item: WidgetId) -> Option<WidgetId> {
        let mut current = self.widgets.get(&item)?.parent;
        while let Some(id) = current {
            let node = self.widgets.get(&id)?;
            if node.kind != WidgetKind::TreeItem {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    fn shell_of(&self, widget: WidgetId) -> Option<WidgetId> {
        let mut current = Some(widget);
        while let Some(id) = current {
            let node = self.widgets.get(&id)?;
            if node.kind == WidgetKind::Shell {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    fn is_visible(&self, widget: WidgetId) -> bool {
        self.shell_of(widget)
            .and_then(|shell| self.widgets.get(&shell))
            .is_some_and(|shell| shell.open && !shell.minimized)
    }

    fn local(&self, widget: WidgetId, point: Point) -> Point {
        point - self.origin_of(widget)
    }

    fn preferred_size(&self, widget: WidgetId) -> Size {
        let Some(node) = self.widgets.get(&widget) else {
            return Size::ZERO;
        };
        if node.kind != WidgetKind::Shell {
            return node.kind.preferred_size();
        }
        let sizes: Vec<Size> = self
            .layout_children(widget)
            .iter()
            .filter_map(|&child| self.kind(child))
            .map(WidgetKind::preferred_size)
            .collect();
        if sizes.is_empty() {
            return WidgetKind::Shell.preferred_size();
        }
        Size::new(
            sizes.iter().map(|s| s.width).sum(),
            sizes.iter().map(|s| s.height).max().unwrap_or(0),
        )
    }

    fn layout_children(&self, widget: WidgetId) -> Vec<WidgetId> {
        self.widgets.get(&widget).map_or_else(Vec::new, |node| {
            node.children
                .iter()
                .copied()
                .filter(|&child| self.kind(child) != Some(WidgetKind::Shell))
                .collect()
        })
    }

    fn set_bounds(&mut self, widget: WidgetId, bounds: Rect) {
        if let Some(node) = self.widgets.get_mut(&widget) {
            node.bounds = bounds;
        }
    }

    /// Fill layout: children share the width equally and take the full height.
    fn layout_fill(&mut self, widget: WidgetId) {
        let Some(node) = self.widgets.get(&widget) else {
            return;
        };
        if node.kind == WidgetKind::Tree {
            self.layout_rows(widget);
            return;
        }
        let size = node.bounds.size();
        let children = self.layout_children(widget);
        let count = children.len() as i32;
        for (index, child) in children.into_iter().enumerate() {
            let index = index as i32;
            let left = size.width * index / count;
            let right = size.width * (index + 1) / count;
            self.set_bounds(child, Rect::new(left, 0, right - left, size.height));
            self.layout_fill(child);
        }
    }

    fn layout_rows(&mut self, tree: WidgetId) {
        let width = self.widgets.get(&tree).map_or(0, |w| w.bounds.width);
        let mut hidden = Vec::new();
        self.collect_items(tree, false, &mut hidden);
        for item in hidden {
            self.set_bounds(item, Rect::new(0, 0, 0, 0));
        }
        for (row, item) in self.visible_rows(tree).into_iter().enumerate() {
            let top = row as i32 * ROW_HEIGHT;
            self.set_bounds(item, Rect::new(0, top, width, ROW_HEIGHT));
        }
    }

    fn collect_items(&self, node: WidgetId, visible_only: bool, out: &mut Vec<WidgetId>) {
        let Some(widget) = self.widgets.get(&node) else {
            return;
        };
        for &child in &widget.children {
            out.push(child);
            let expanded = self.widgets.get(&child).is_some_and(|c| c.expanded);
            if expanded || !visible_only {
                self.collect_items(child, visible_only, out);
            }
        }
    }

    fn visible_rows(&self, tree: WidgetId) -> Vec<WidgetId> {
        let mut rows = Vec::new();
        self.collect_items(tree, true, &mut rows);
        rows
    }

    fn minimize_box(&self, client: Rect) -> Rect {
        let reference = match self.caps.iconify_anchor {
            IconifyAnchor::TopLeft => client.x,
            IconifyAnchor::TopRight => client.right() - ICONIFY_RIGHT_INSET,
        };
        let center = reference + self.caps.iconify_offset.x;
        Rect::new(
            center - MINIMIZE_BOX_WIDTH / 2,
            client.y - TITLE_BAR_HEIGHT,
            MINIMIZE_BOX_WIDTH,
            TITLE_BAR_HEIGHT,
        )
    }

    fn hit(&self, point: Point) -> Option<Target> {
        let popup = self
            .widgets
            .iter()
            .rev()
            .find(|(_, w)| w.kind == WidgetKind::ComboPopup && w.open && w.bounds.contains_point(point));
        if let Some((&id, _)) = popup {
            return Some(Target::Widget(id));
        }
        let shells = self
            .widgets
            .iter()
            .rev()
            .filter(|(_, w)| w.kind == WidgetKind::Shell && w.open && !w.minimized);
        for (&id, shell) in shells {
            let client = shell.bounds;
            let title = Rect::new(
                client.x,
                client.y - TITLE_BAR_HEIGHT,
                client.width,
                TITLE_BAR_HEIGHT,
            );
            if title.contains_point(point) {
                return Some(if self.minimize_box(client).contains_point(point) {
                    Target::Minimize(id)
                } else {
                    Target::TitleBar(id)
                });
            }
            if client.contains_point(point) {
                return Some(Target::Widget(self.descend(id, point)));
            }
        }
        None
    }

    fn descend(&self, shell: WidgetId, point: Point) -> WidgetId {
        let mut current = shell;
        loop {
            if self.kind(current) == Some(WidgetKind::Tree) {
                return current;
            }
            let local = self.local(current, point);
            let next = self.layout_children(current).into_iter().rev().find(|child| {
                self.widgets
                    .get(child)
                    .is_some_and(|c| c.bounds.contains_point(local))
            });
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    // =========================================================================
    // Event Delivery
    // =========================================================================

    fn send_event(&mut self, event: WidgetEvent) {
        tracing::trace!(
            event = %event.event_type,
            widget = event.widget.0,
            detail = event.detail,
            "dispatch"
        );
        for registration in self
            .listeners
            .iter_mut()
            .filter(|r| r.widget == event.widget && r.event_type == event.event_type)
        {
            (registration.listener)(&event);
        }
        if self.dispatched.len() == DISPATCH_HISTORY {
            self.dispatched.pop_front();
        }
        self.dispatched.push_back(event);
    }

    fn send(&mut self, event_type: EventType, widget: WidgetId) {
        self.send_event(WidgetEvent::new(event_type, widget));
    }

    fn send_detail(&mut self, event_type: EventType, widget: WidgetId, detail: i32) {
        self.send_event(WidgetEvent::new(event_type, widget).with_detail(detail));
    }

    fn change_focus(&mut self, target: Option<WidgetId>) {
        if target == self.focus {
            return;
        }
        if let Some(old) = self.focus.take() {
            self.send(EventType::FocusOut, old);
        }
        self.focus = target;
        if let Some(new) = target {
            self.send(EventType::FocusIn, new);
        }
    }

    fn first_focusable(&self, widget: WidgetId) -> Option<WidgetId> {
        for child in self.layout_children(widget) {
            let kind = self.kind(child)?;
            if kind.is_focusable() {
                return Some(child);
            }
            if let Some(found) = self.first_focusable(child) {
                return Some(found);
            }
        }
        None
    }

    fn minimize(&mut self, shell: WidgetId, minimized: bool) {
        let Some(node) = self.widgets.get_mut(&shell) else {
            return;
        };
        if node.kind != WidgetKind::Shell || node.minimized == minimized {
            return;
        }
        node.minimized = minimized;
        if minimized {
            let focus_inside = self
                .focus
                .is_some_and(|f| self.shell_of(f) == Some(shell));
            if focus_inside {
                let saved = self.focus;
                if let Some(node) = self.widgets.get_mut(&shell) {
                    node.saved_focus = saved;
                }
                self.change_focus(None);
            }
            self.send(EventType::Iconify, shell);
            self.send(EventType::Deactivate, shell);
        } else {
            self.send(EventType::Deiconify, shell);
            self.send(EventType::Activate, shell);
            let saved = self.widgets.get_mut(&shell).and_then(|n| n.saved_focus.take());
            if saved.is_some() {
                self.change_focus(saved);
            }
            self.send(EventType::Activate, shell);
        }
    }

    fn realize_popups(&mut self) {
        for combo in std::mem::take(&mut self.pending_popups) {
            let Some(popup) = self.popup(combo) else {
                continue;
            };
            let origin = self.origin_of(combo);
            let size = self.size(combo);
            self.set_bounds(
                popup,
                Rect::new(
                    origin.x,
                    origin.y + size.height,
                    size.width,
                    ROW_HEIGHT * POPUP_ROWS,
                ),
            );
            if let Some(node) = self.widgets.get_mut(&popup) {
                node.open = true;
            }
        }
    }

    fn toggle_popup(&mut self, combo: WidgetId) {
        let Some(popup) = self.popup(combo) else {
            return;
        };
        if self.is_open(popup) {
            if let Some(node) = self.widgets.get_mut(&popup) {
                node.open = false;
            }
        } else if !self.pending_popups.contains(&combo) {
            self.pending_popups.push(combo);
        }
    }

    // =========================================================================
    // Mouse
    // =========================================================================

    fn mouse_move(&mut self, position: Point) {
        self.cursor = position;
        if let Some(Target::Widget(widget)) = self.hit(position) {
            self.send(EventType::MouseMove, widget);
        }
        let Some(press) = self.press else {
            return;
        };
        let Target::Widget(widget) = press.target else {
            return;
        };
        let starts_drag = !press.dragging
            && press.button == self.caps.drag_button
            && press.origin.max_axis_distance(&position) > DRAG_THRESHOLD
            && self.kind(widget).is_some_and(WidgetKind::is_drag_source);
        if starts_drag {
            self.press = Some(Press {
                dragging: true,
                ..press
            });
            self.send(EventType::DragDetect, widget);
        }
    }

    fn mouse_down(&mut self, button: MouseButton) {
        let point = self.cursor;
        let Some(target) = self.hit(point) else {
            return;
        };
        let count = match self.last_click {
            Some(chain)
                if chain.button == button
                    && chain.at.max_axis_distance(&point) <= DOUBLE_CLICK_DISTANCE =>
            {
                chain.count + 1
            }
            _ => 1,
        };
        self.last_click = Some(ClickChain {
            button,
            at: point,
            count,
        });
        self.press = Some(Press {
            button,
            target,
            origin: point,
            dragging: false,
        });

        let Target::Widget(widget) = target else {
            return;
        };
        let Some(kind) = self.kind(widget) else {
            return;
        };
        if button == MouseButton::Left && kind.is_focusable() {
            self.change_focus(Some(widget));
        }
        self.send(EventType::MouseDown, widget);
        match button {
            MouseButton::Right => {
                if self.platform != Platform::Win32 {
                    self.send(EventType::MenuDetect, widget);
                }
            }
            MouseButton::Left => self.press_primary(widget, kind, point, count),
            MouseButton::Middle => {}
        }
    }

    fn press_primary(&mut self, widget: WidgetId, kind: WidgetKind, point: Point, count: u32) {
        let local = self.local(widget, point);
        match kind {
            WidgetKind::Table if local.x < GUTTER_WIDTH && count == 1 => {
                self.select_row(widget, local);
                if let Some(node) = self.widgets.get_mut(&widget) {
                    node.checked = !node.checked;
                }
                self.send_detail(EventType::Selection, widget, SELECTION_CHECK);
            }
            WidgetKind::Tree if local.x < GUTTER_WIDTH && count == 1 => {
                let item = self.row_at(widget, local);
                if !item.is_some_and(|item| self.expand(widget, item)) {
                    self.select_row(widget, local);
                    self.send(EventType::Selection, widget);
                }
            }
            _ if kind.is_item_view() => {
                if count >= 2 {
                    self.send(EventType::MouseDoubleClick, widget);
                    self.send(EventType::DefaultSelection, widget);
                } else {
                    self.select_row(widget, local);
                    self.send(EventType::Selection, widget);
                }
            }
            WidgetKind::Slider => {
                let width = self.size(widget).width;
                let detail = if local.x < GUTTER_WIDTH {
                    key::ARROW_UP
                } else if local.x >= width - GUTTER_WIDTH {
                    key::ARROW_DOWN
                } else if local.x < GUTTER_WIDTH + THUMB_WIDTH {
                    SELECTION_DRAG
                } else {
                    key::PAGE_DOWN
                };
                self.send_detail(EventType::Selection, widget, detail);
            }
            WidgetKind::Combo if local.x >= self.size(widget).width - COMBO_BUTTON_WIDTH => {
                self.toggle_popup(widget);
            }
            _ => {}
        }
    }

    fn row_at(&self, view: WidgetId, local: Point) -> Option<WidgetId> {
        let row = usize::try_from(local.y / ROW_HEIGHT).ok()?;
        self.visible_rows(view).get(row).copied()
    }

    fn select_row(&mut self, view: WidgetId, local: Point) {
        if let (Ok(row), Some(node)) = (
            usize::try_from(local.y / ROW_HEIGHT),
            self.widgets.get_mut(&view),
        ) {
            node.selected = row;
        }
    }

    /// Expand a collapsed tree item that has children. Returns whether it did.
    fn expand(&mut self, tree: WidgetId, item: WidgetId) -> bool {
        let Some(node) = self.widgets.get_mut(&item) else {
            return false;
        };
        if node.expanded || node.children.is_empty() {
            return false;
        }
        node.expanded = true;
        self.send(EventType::Expand, tree);
        self.layout_rows(tree);
        true
    }

    fn mouse_up(&mut self, button: MouseButton) {
        let Some(press) = self.press else {
            return;
        };
        if press.button != button {
            return;
        }
        self.press = None;
        let released_on = self.hit(self.cursor);
        let widget = match press.target {
            Target::Minimize(shell) => {
                if released_on == Some(Target::Minimize(shell)) {
                    self.minimize(shell, true);
                }
                return;
            }
            Target::TitleBar(_) => return,
            Target::Widget(widget) => widget,
        };
        self.send(EventType::MouseUp, widget);
        match button {
            MouseButton::Right if self.platform == Platform::Win32 => {
                self.send(EventType::MenuDetect, widget);
            }
            MouseButton::Left if released_on == Some(Target::Widget(widget)) => {
                self.release_primary(widget);
            }
            _ => {}
        }
    }

    fn release_primary(&mut self, widget: WidgetId) {
        let Some(node) = self.widgets.get_mut(&widget) else {
            return;
        };
        match node.kind {
            WidgetKind::PushButton => self.send(EventType::Selection, widget),
            WidgetKind::CheckBox => {
                node.checked = !node.checked;
                self.send(EventType::Selection, widget);
            }
            WidgetKind::ComboPopup => {
                node.open = false;
                let Some(combo) = node.parent else {
                    return;
                };
                let row = self.local(widget, self.cursor).y / ROW_HEIGHT;
                if let Some(combo_node) = self.widgets.get_mut(&combo) {
                    combo_node.selected = usize::try_from(row).unwrap_or(0);
                    combo_node.text = format!("item {row}");
                }
                self.send(EventType::Selection, combo);
            }
            _ => {}
        }
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    fn key_down(&mut self, character: char, key_code: i32) {
        if key::is_modifier(key_code) {
            self.modifiers |= key_code;
        }
        let Some(widget) = self.focus else {
            return;
        };
        let Some(kind) = self.kind(widget) else {
            return;
        };
        let event = WidgetEvent::new(EventType::KeyDown, widget).with_key(character, key_code);
        match key_code {
            code if key::is_modifier(code) => self.send_event(event),
            key::CR if kind.is_item_view() || matches!(kind, WidgetKind::Combo | WidgetKind::Text) => {
                self.send_detail(EventType::Traverse, widget, traversal::RETURN);
                self.send_event(event);
                self.send(EventType::DefaultSelection, widget);
            }
            key::TAB => {
                let backwards = self.modifiers & key::SHIFT != 0;
                let detail = if backwards {
                    traversal::TAB_PREVIOUS
                } else {
                    traversal::TAB_NEXT
                };
                self.send_detail(EventType::Traverse, widget, detail);
                self.traverse_tab(widget, backwards);
            }
            key::ESC => {
                self.send_detail(EventType::Traverse, widget, traversal::ESCAPE);
                self.send_event(event);
            }
            key::SPACE if matches!(kind, WidgetKind::PushButton | WidgetKind::CheckBox) => {
                if let Some(node) = self.widgets.get_mut(&widget) {
                    if node.kind == WidgetKind::CheckBox {
                        node.checked = !node.checked;
                    }
                }
                self.send(EventType::Selection, widget);
                self.send_event(event);
            }
            _ => {
                self.send_event(event);
                self.key_action(widget, kind, character, key_code);
            }
        }
    }

    fn key_action(&mut self, widget: WidgetId, kind: WidgetKind, character: char, key_code: i32) {
        match kind {
            WidgetKind::Tree if key_code == self.caps.expand_key => {
                let selected = self.widgets.get(&widget).map_or(0, |w| w.selected);
                if let Some(item) = self.visible_rows(widget).get(selected).copied() {
                    self.expand(widget, item);
                }
            }
            WidgetKind::List | WidgetKind::Tree | WidgetKind::Table | WidgetKind::Combo
                if matches!(key_code, key::ARROW_UP | key::ARROW_DOWN) =>
            {
                if let Some(node) = self.widgets.get_mut(&widget) {
                    node.selected = if key_code == key::ARROW_DOWN {
                        node.selected + 1
                    } else {
                        node.selected.saturating_sub(1)
                    };
                }
                self.send(EventType::Selection, widget);
            }
            WidgetKind::Slider => {
                let detail = match key_code {
                    key::ARROW_RIGHT | key::ARROW_DOWN => key::ARROW_DOWN,
                    key::ARROW_LEFT | key::ARROW_UP => key::ARROW_UP,
                    key::PAGE_DOWN | key::PAGE_UP | key::HOME | key::END => key_code,
                    _ => return,
                };
                self.send_detail(EventType::Selection, widget, detail);
            }
            WidgetKind::Text => {
                let shortcut = self.modifiers & (key::CTRL | key::ALT) != 0;
                if shortcut || character == '\0' || character.is_control() {
                    return;
                }
                self.send(EventType::Verify, widget);
                if let Some(node) = self.widgets.get_mut(&widget) {
                    node.text.push(character);
                }
                self.send(EventType::Modify, widget);
            }
            _ => {}
        }
    }

    fn traverse_tab(&mut self, widget: WidgetId, backwards: bool) {
        let Some(parent) = self.widgets.get(&widget).and_then(|w| w.parent) else {
            return;
        };
        let peers: Vec<WidgetId> = self
            .layout_children(parent)
            .into_iter()
            .filter(|&peer| self.kind(peer).is_some_and(WidgetKind::is_focusable))
            .collect();
        let Some(index) = peers.iter().position(|&peer| peer == widget) else {
            return;
        };
        if peers.len() < 2 {
            return;
        }
        let next = if backwards {
            (index + peers.len() - 1) % peers.len()
        } else {
            (index + 1) % peers.len()
        };
        self.change_focus(Some(peers[next]));
    }

    fn key_up(&mut self, character: char, key_code: i32) {
        if key::is_modifier(key_code) {
            self.modifiers &= !key_code;
        }
        if let Some(widget) = self.focus {
            self.send_event(WidgetEvent::new(EventType::KeyUp, widget).with_key(character, key_code));
        }
    }
}

impl Display for SimDisplay {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn post(&mut self, event: &InputEvent) -> bool {
        if !self.injection_enabled {
            self.rejected += 1;
            return false;
        }
        self.queue.push_back(*event);
        true
    }

    fn read_and_dispatch(&mut self) -> bool {
        let Some(input) = self.queue.pop_front() else {
            // Clicks separated by an idle queue never chain into a double click.
            self.last_click = None;
            return false;
        };
        match input {
            InputEvent::MouseMove { position } => self.mouse_move(position),
            InputEvent::MouseDown { button } => self.mouse_down(button),
            InputEvent::MouseUp { button } => self.mouse_up(button),
            InputEvent::KeyDown {
                character,
                key_code,
            } => self.key_down(character, key_code),
            InputEvent::KeyUp {
                character,
                key_code,
            } => self.key_up(character, key_code),
        }
        true
    }

    fn sleep(&mut self, timeout: Duration) {
        std::thread::sleep(timeout.min(MAX_SLEEP));
    }

    fn update(&mut self) {
        while self.read_and_dispatch() {}
        self.realize_popups();
    }

    fn add_listener(
        &mut self,
        widget: WidgetId,
        event_type: EventType,
        listener: Listener,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Registration {
            id,
            widget,
            event_type,
            listener,
        });
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|r| r.id != id);
        self.listeners.len() != before
    }

    fn children(&self, widget: WidgetId) -> Vec<WidgetId> {
        self.widgets
            .get(&widget)
            .map_or_else(Vec::new, |w| w.children.clone())
    }

    fn is_shell(&self, widget: WidgetId) -> bool {
        self.kind(widget) == Some(WidgetKind::Shell)
    }

    fn to_display(&self, widget: WidgetId, point: Point) -> Point {
        self.origin_of(widget) + point
    }

    fn size(&self, widget: WidgetId) -> Size {
        self.widgets
            .get(&widget)
            .map_or(Size::ZERO, |w| w.bounds.size())
    }

    fn pack(&mut self, widget: WidgetId) {
        let preferred = self.preferred_size(widget);
        if let Some(node) = self.widgets.get_mut(&widget) {
            if node.bounds.size().is_empty() {
                node.bounds = Rect::new(
                    node.bounds.x,
                    node.bounds.y,
                    preferred.width,
                    preferred.height,
                );
            }
        }
        self.layout_fill(widget);
    }

    fn layout(&mut self, widget: WidgetId) {
        self.layout_fill(widget);
    }

    fn open(&mut self, shell: WidgetId) {
        let Some(node) = self.widgets.get_mut(&shell) else {
            return;
        };
        if node.kind != WidgetKind::Shell || node.open {
            return;
        }
        node.open = true;
        self.send(EventType::Activate, shell);
    }

    fn set_focus(&mut self, widget: WidgetId) -> bool {
        if !self.is_visible(widget) {
            return false;
        }
        let target = match self.kind(widget) {
            Some(WidgetKind::Shell) => self.first_focusable(widget).unwrap_or(widget),
            Some(kind) if kind.is_focusable() => widget,
            _ => return false,
        };
        self.change_focus(Some(target));
        true
    }

    fn force_focus(&mut self, widget: WidgetId) -> bool {
        if self.kind(widget).is_none() || !self.is_visible(widget) {
            return false;
        }
        self.change_focus(Some(widget));
        true
    }

    fn set_minimized(&mut self, shell: WidgetId, minimized: bool) {
        self.minimize(shell, minimized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_with(platform: Platform, kinds: &[WidgetKind]) -> (SimDisplay, WidgetId, Vec<WidgetId>) {
        let mut display = SimDisplay::new(platform);
        let shell = display.create_shell(Point::new(100, 100), Size::new(200, 150));
        let widgets = kinds.iter().map(|&k| display.create_widget(shell, k)).collect();
        display.pack(shell);
        display.open(shell);
        (display, shell, widgets)
    }

    fn run(display: &mut SimDisplay, inputs: &[InputEvent]) {
        display.take_dispatched();
        for input in inputs {
            assert!(display.post(input));
        }
        while display.read_and_dispatch() {}
    }

    fn click(at: Point, button: MouseButton) -> [InputEvent; 3] {
        [
            InputEvent::MouseMove { position: at },
            InputEvent::MouseDown { button },
            InputEvent::MouseUp { button },
        ]
    }

    fn names(display: &mut SimDisplay, widget: WidgetId) -> Vec<&'static str> {
        display
            .take_dispatched()
            .into_iter()
            .filter(|e| e.widget == widget && e.event_type != EventType::MouseMove)
            .map(|e| e.event_type.name())
            .collect()
    }

    // =========================================================================
    // Layout Tests
    // =========================================================================

    #[test]
    fn test_fill_layout_splits_width() {
        let (display, _shell, widgets) =
            shell_with(Platform::Gtk, &[WidgetKind::Text, WidgetKind::PushButton]);
        assert_eq!(display.to_display(widgets[0], Point::ORIGIN), Point::new(100, 100));
        assert_eq!(display.to_display(widgets[1], Point::ORIGIN), Point::new(200, 100));
        assert_eq!(display.size(widgets[1]), Size::new(100, 150));
    }

    #[test]
    fn test_pack_uses_preferred_size_for_empty_shell() {
        let mut display = SimDisplay::new(Platform::Gtk);
        let shell = display.create_shell(Point::new(0, 0), Size::ZERO);
        let button = display.create_widget(shell, WidgetKind::PushButton);
        assert!(display.size(button).is_empty());
        display.pack(shell);
        assert_eq!(display.size(shell), Size::new(80, 30));
        assert_eq!(display.size(button), Size::new(80, 30));
    }

    #[test]
    fn test_dialog_shell_is_not_laid_out() {
        let mut display = SimDisplay::new(Platform::Gtk);
        let shell = display.create_shell(Point::new(10, 10), Size::new(200, 150));
        let dialog = display.create_widget(shell, WidgetKind::Shell);
        display.pack(shell);
        display.pack(dialog);
        assert!(display.is_shell(dialog));
        assert_eq!(display.size(dialog), Size::new(200, 150));
        assert_eq!(display.to_display(dialog, Point::ORIGIN), Point::new(30, 50));
    }

    // =========================================================================
    // Mouse Tests
    // =========================================================================

    #[test]
    fn test_list_double_click() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::List]);
        let at = display.to_display(w[0], Point::new(10, 10));
        let mut inputs = click(at, MouseButton::Left).to_vec();
        inputs.extend(click(at, MouseButton::Left));
        run(&mut display, &inputs);
        assert_eq!(
            names(&mut display, w[0]),
            vec![
                "FocusIn",
                "MouseDown",
                "Selection",
                "MouseUp",
                "MouseDown",
                "MouseDoubleClick",
                "DefaultSelection",
                "MouseUp"
            ]
        );
    }

    #[test]
    fn test_idle_queue_breaks_click_chain() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::List]);
        let at = display.to_display(w[0], Point::new(10, 10));
        run(&mut display, &click(at, MouseButton::Left));
        run(&mut display, &click(at, MouseButton::Left));
        assert_eq!(names(&mut display, w[0]), vec!["MouseDown", "Selection", "MouseUp"]);
    }

    #[test]
    fn test_button_selects_on_release() {
        let (mut display, _, w) = shell_with(Platform::Win32, &[WidgetKind::PushButton]);
        let at = display.to_display(w[0], Point::new(5, 5));
        run(&mut display, &click(at, MouseButton::Left));
        assert_eq!(
            names(&mut display, w[0]),
            vec!["FocusIn", "MouseDown", "MouseUp", "Selection"]
        );
    }

    #[test]
    fn test_menu_detect_timing_per_platform() {
        for (platform, expected) in [
            (Platform::Win32, vec!["MouseDown", "MouseUp", "MenuDetect"]),
            (Platform::Cocoa, vec!["MouseDown", "MenuDetect", "MouseUp"]),
        ] {
            let (mut display, _, w) = shell_with(platform, &[WidgetKind::Text]);
            let at = display.to_display(w[0], Point::new(5, 5));
            run(&mut display, &click(at, MouseButton::Right));
            assert_eq!(names(&mut display, w[0]), expected, "{platform}");
        }
    }

    #[test]
    fn test_drag_needs_threshold_and_platform_button() {
        let (mut display, _, w) = shell_with(Platform::Motif, &[WidgetKind::Text]);
        let origin = display.to_display(w[0], Point::new(30, 20));
        let drag = |button, to| {
            [
                InputEvent::MouseMove { position: origin },
                InputEvent::MouseDown { button },
                InputEvent::MouseMove { position: to },
                InputEvent::MouseUp { button },
            ]
        };
        run(&mut display, &drag(MouseButton::Middle, origin.offset(2, 2)));
        assert!(!names(&mut display, w[0]).contains(&"DragDetect"));
        run(&mut display, &drag(MouseButton::Left, origin.offset(20, 10)));
        assert!(!names(&mut display, w[0]).contains(&"DragDetect"));
        run(&mut display, &drag(MouseButton::Middle, origin.offset(20, 10)));
        assert_eq!(
            names(&mut display, w[0]),
            vec!["MouseDown", "DragDetect", "MouseUp"]
        );
    }

    #[test]
    fn test_table_check_column() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::Table]);
        let at = display.to_display(w[0], Point::new(5, 5));
        run(&mut display, &click(at, MouseButton::Left));
        let selection = display
            .take_dispatched()
            .into_iter()
            .find(|e| e.event_type == EventType::Selection)
            .unwrap();
        assert_eq!(selection.detail, SELECTION_CHECK);
        assert!(display.is_checked(w[0]));
    }

    #[test]
    fn test_tree_expander_click() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::Tree]);
        let node = display.create_widget(w[0], WidgetKind::TreeItem);
        display.create_widget(node, WidgetKind::TreeItem);
        display.layout(w[0]);
        let at = display.to_display(w[0], Point::new(5, 5));
        display.force_focus(w[0]);
        run(&mut display, &click(at, MouseButton::Left));
        assert_eq!(names(&mut display, w[0]), vec!["MouseDown", "Expand", "MouseUp"]);
        assert!(display.is_expanded(node));
    }

    #[test]
    fn test_slider_regions() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::Slider]);
        let width = display.size(w[0]).width;
        for (x, detail) in [
            (5, key::ARROW_UP),
            (20, SELECTION_DRAG),
            (100, key::PAGE_DOWN),
            (width - 5, key::ARROW_DOWN),
        ] {
            let at = display.to_display(w[0], Point::new(x, 5));
            run(&mut display, &click(at, MouseButton::Left));
            let selection = display
                .take_dispatched()
                .into_iter()
                .find(|e| e.event_type == EventType::Selection)
                .unwrap();
            assert_eq!(selection.detail, detail, "x = {x}");
        }
    }

    #[test]
    fn test_combo_popup_needs_update() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::Combo]);
        let combo = w[0];
        let size = display.size(combo);
        let arrow = display.to_display(combo, Point::new(size.width - 5, 5));
        let row = display.to_display(combo, Point::new(10, size.height + 30));
        run(&mut display, &click(arrow, MouseButton::Left));
        let popup = display.popup(combo).unwrap();
        assert!(!display.is_open(popup));
        display.update();
        assert!(display.is_open(popup));
        run(&mut display, &click(row, MouseButton::Left));
        assert_eq!(
            display
                .take_dispatched()
                .iter()
                .filter(|e| e.widget == combo && e.event_type == EventType::Selection)
                .count(),
            1
        );
        assert_eq!(display.text(combo), "item 1");
        assert!(!display.is_open(popup));
    }

    // =========================================================================
    // Keyboard Tests
    // =========================================================================

    fn press(character: char, key_code: i32) -> [InputEvent; 2] {
        [
            InputEvent::KeyDown {
                character,
                key_code,
            },
            InputEvent::KeyUp {
                character,
                key_code,
            },
        ]
    }

    #[test]
    fn test_checkbox_space_selects_before_key_down() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::CheckBox]);
        assert!(display.set_focus(w[0]));
        run(&mut display, &press(' ', key::SPACE));
        assert_eq!(names(&mut display, w[0]), vec!["Selection", "KeyDown", "KeyUp"]);
        assert!(display.is_checked(w[0]));
    }

    #[test]
    fn test_text_typing_modifies() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::Text]);
        display.set_focus(w[0]);
        run(&mut display, &press('a', 'a' as i32));
        assert_eq!(
            names(&mut display, w[0]),
            vec!["KeyDown", "Verify", "Modify", "KeyUp"]
        );
        assert_eq!(display.text(w[0]), "a");
    }

    #[test]
    fn test_ctrl_shortcut_does_not_modify() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::Text]);
        display.set_focus(w[0]);
        let inputs = [
            InputEvent::KeyDown {
                character: '\0',
                key_code: key::CTRL,
            },
            InputEvent::KeyDown {
                character: 'a',
                key_code: 'a' as i32,
            },
            InputEvent::KeyUp {
                character: 'a',
                key_code: 'a' as i32,
            },
            InputEvent::KeyUp {
                character: '\0',
                key_code: key::CTRL,
            },
        ];
        run(&mut display, &inputs);
        assert_eq!(
            names(&mut display, w[0]),
            vec!["KeyDown", "KeyDown", "KeyUp", "KeyUp"]
        );
        assert_eq!(display.text(w[0]), "");
    }

    #[test]
    fn test_return_traverses_then_default_selects() {
        let (mut display, _, w) = shell_with(Platform::Win32, &[WidgetKind::List]);
        display.set_focus(w[0]);
        run(&mut display, &press('\r', key::CR));
        let events = display.take_dispatched();
        assert_eq!(events[0].event_type, EventType::Traverse);
        assert_eq!(events[0].detail, traversal::RETURN);
        let types: Vec<_> = events.iter().map(|e| e.event_type.name()).collect();
        assert_eq!(types, vec!["Traverse", "KeyDown", "DefaultSelection", "KeyUp"]);
    }

    #[test]
    fn test_tab_moves_focus_to_next_peer() {
        let (mut display, _, w) =
            shell_with(Platform::Gtk, &[WidgetKind::Text, WidgetKind::PushButton]);
        display.set_focus(w[0]);
        run(&mut display, &press('\t', key::TAB));
        assert_eq!(display.focused(), Some(w[1]));
        assert_eq!(names(&mut display, w[0]).first(), Some(&"Traverse"));
    }

    #[test]
    fn test_tree_expand_key_is_platform_specific() {
        for platform in [Platform::Gtk, Platform::Win32] {
            let (mut display, _, w) = shell_with(platform, &[WidgetKind::Tree]);
            let node = display.create_widget(w[0], WidgetKind::TreeItem);
            display.create_widget(node, WidgetKind::TreeItem);
            display.layout(w[0]);
            display.set_focus(w[0]);
            let expand_key = PlatformCaps::for_platform(platform).expand_key;
            run(&mut display, &press('\0', expand_key));
            assert_eq!(names(&mut display, w[0]), vec!["KeyDown", "Expand", "KeyUp"]);
        }
    }

    // =========================================================================
    // Shell Tests
    // =========================================================================

    #[test]
    fn test_minimize_control_iconifies_and_restore_reactivates() {
        for &platform in Platform::ALL {
            let (mut display, shell, _) = shell_with(platform, &[]);
            assert!(display.set_focus(shell));
            let caps = PlatformCaps::for_platform(platform);
            let reference = match caps.iconify_anchor {
                IconifyAnchor::TopLeft => display.to_display(shell, Point::ORIGIN),
                IconifyAnchor::TopRight => display.to_display(
                    shell,
                    Point::new(display.size(shell).width - ICONIFY_RIGHT_INSET, 0),
                ),
            };
            run(
                &mut display,
                &click(reference + caps.iconify_offset, MouseButton::Left),
            );
            assert!(display.is_minimized(shell), "{platform}");
            display.set_minimized(shell, false);
            assert_eq!(
                names(&mut display, shell),
                vec![
                    "FocusOut",
                    "Iconify",
                    "Deactivate",
                    "Deiconify",
                    "Activate",
                    "FocusIn",
                    "Activate"
                ],
                "{platform}"
            );
        }
    }

    #[test]
    fn test_title_bar_click_does_nothing() {
        let (mut display, shell, _) = shell_with(Platform::Cocoa, &[]);
        let at = display.to_display(shell, Point::new(25, -10));
        run(&mut display, &click(at, MouseButton::Left));
        assert!(display.take_dispatched().is_empty());
        assert!(!display.is_minimized(shell));
    }

    // =========================================================================
    // Listener Tests
    // =========================================================================

    #[test]
    fn test_listeners_added_and_removed() {
        use std::cell::Cell;
        use std::rc::Rc;

        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::PushButton]);
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = display.add_listener(
            w[0],
            EventType::MouseDown,
            Box::new(move |_: &WidgetEvent| counter.set(counter.get() + 1)),
        );
        let at = display.to_display(w[0], Point::new(5, 5));
        run(&mut display, &click(at, MouseButton::Left));
        assert_eq!(hits.get(), 1);
        assert!(display.remove_listener(id));
        assert!(!display.remove_listener(id));
        assert_eq!(display.listener_count(), 0);
    }

    #[test]
    fn test_dispatch_history_is_bounded() {
        let (mut display, _, w) = shell_with(Platform::Gtk, &[WidgetKind::PushButton]);
        let at = display.to_display(w[0], Point::new(5, 5));
        for _ in 0..DISPATCH_HISTORY {
            for input in click(at, MouseButton::Left) {
                assert!(display.post(&input));
            }
            while display.read_and_dispatch() {}
        }
        let events = display.take_dispatched();
        assert_eq!(events.len(), DISPATCH_HISTORY);
        let last = events.last().unwrap();
        assert_eq!((last.widget, last.event_type), (w[0], EventType::Selection));
        assert!(display.take_dispatched().is_empty());
    }

    #[test]
    fn test_rejected_posts_are_counted() {
        let mut display = SimDisplay::new(Platform::Gtk);
        display.set_injection_enabled(false);
        assert!(!display.post(&InputEvent::MouseDown {
            button: MouseButton::Left
        }));
        assert_eq!(display.rejected_posts(), 1);
        assert!(!display.read_and_dispatch());
    }
}
