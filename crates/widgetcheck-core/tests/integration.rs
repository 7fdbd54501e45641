//! Integration tests for widgetcheck-core.
//!
//! These tests verify the public API works correctly end-to-end.

use proptest::prelude::*;
use widgetcheck_core::{
    key, EventType, InputEvent, MouseButton, Platform, Point, Rect, Size, WidgetEvent, WidgetId,
};

// =============================================================================
// Geometry Integration Tests
// =============================================================================

#[test]
fn test_rect_edges_are_half_open() {
    let rect = Rect::new(10, 20, 30, 40);
    assert!(rect.contains_point(Point::new(10, 20)));
    assert!(rect.contains_point(Point::new(39, 59)));
    assert!(!rect.contains_point(Point::new(40, 20)));
    assert!(!rect.contains_point(Point::new(10, 60)));
}

#[test]
fn test_adjacent_rects_share_no_pixel() {
    let left = Rect::new(0, 0, 50, 50);
    let right = Rect::new(left.right(), 0, 50, 50);
    let seam = Point::new(50, 10);
    assert!(!left.contains_point(seam));
    assert!(right.contains_point(seam));
}

#[test]
fn test_translate_keeps_size() {
    let rect = Rect::new(0, 0, 20, 10).translate(Point::new(5, -5));
    assert_eq!(rect.origin(), Point::new(5, -5));
    assert_eq!(rect.size(), Size::new(20, 10));
}

#[test]
fn test_point_arithmetic() {
    let p = Point::new(25, -10) + Point::new(100, 100);
    assert_eq!(p, Point::new(125, 90));
    assert_eq!(p - Point::new(100, 100), Point::new(25, -10));
    assert_eq!(Point::ORIGIN.offset(3, 4).max_axis_distance(&Point::ORIGIN), 4);
}

proptest! {
    #[test]
    fn prop_translated_rect_contains_translated_point(
        x in -500i32..500, y in -500i32..500,
        w in 1i32..200, h in 1i32..200,
        dx in -100i32..100, dy in -100i32..100,
    ) {
        let rect = Rect::new(x, y, w, h);
        let inside = Point::new(x + w / 2, y + h / 2);
        let delta = Point::new(dx, dy);
        prop_assert!(rect.translate(delta).contains_point(inside + delta));
    }
}

// =============================================================================
// Input Integration Tests
// =============================================================================

#[test]
fn test_button_ids_start_at_one() {
    for button in [MouseButton::Left, MouseButton::Middle, MouseButton::Right] {
        assert_eq!(MouseButton::from_id(i32::from(button.id())), Some(button));
    }
    assert_eq!(MouseButton::from_id(0), None);
    assert_eq!(MouseButton::from_id(4), None);
}

#[test]
fn test_input_event_classification() {
    let click = InputEvent::MouseDown {
        button: MouseButton::Left,
    };
    let tab = InputEvent::KeyDown {
        character: '\t',
        key_code: key::TAB,
    };
    assert!(click.is_mouse() && !click.is_keyboard());
    assert!(tab.is_keyboard() && !tab.is_mouse());
    assert_eq!(tab.label(), "KeyDown");
}

#[test]
fn test_modifier_keys() {
    assert!(key::is_modifier(key::CTRL));
    assert!(key::is_modifier(key::SHIFT));
    assert!(!key::is_modifier(key::ARROW_DOWN));
    assert!(!key::is_modifier(i32::from(b'a')));
}

#[test]
fn test_input_event_json() {
    let event = InputEvent::MouseMove {
        position: Point::new(30, 20),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: InputEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

// =============================================================================
// Event Type Integration Tests
// =============================================================================

#[test]
fn test_event_type_codes_are_unique() {
    let mut codes: Vec<i32> = EventType::ALL.iter().map(|t| t.code()).collect();
    let total = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), total);
}

#[test]
fn test_event_type_names_match_display() {
    for t in EventType::ALL {
        assert_eq!(t.to_string(), t.name());
    }
}

#[test]
fn test_detail_bearing_types() {
    assert!(EventType::Selection.has_selection_detail());
    assert!(EventType::Traverse.has_traversal_detail());
    assert!(!EventType::MouseDown.has_selection_detail());
    assert!(!EventType::Selection.has_traversal_detail());
}

#[test]
fn test_widget_event_builders() {
    let event = WidgetEvent::new(EventType::KeyDown, WidgetId::new(7)).with_key('a', 97);
    assert_eq!(event.detail, 0);
    assert_eq!(event.character, 'a');
    assert_eq!(event.key_code, 97);
}

// =============================================================================
// Platform Integration Tests
// =============================================================================

#[test]
fn test_platform_parse_is_case_insensitive() {
    assert_eq!("GTK".parse::<Platform>(), Ok(Platform::Gtk));
    assert_eq!("win32".parse::<Platform>(), Ok(Platform::Win32));
    let err = "beos".parse::<Platform>().unwrap_err();
    assert_eq!(err.to_string(), "unknown platform: beos");
}

#[test]
fn test_mac_platforms() {
    let macs: Vec<Platform> = Platform::ALL.iter().copied().filter(|p| p.is_mac()).collect();
    assert_eq!(macs, [Platform::Cocoa, Platform::Carbon]);
}
