//! Pixel geometry: Point, Size, Rect.
//!
//! Toolkit input is synthesized at whole-pixel display coordinates, so every
//! primitive here is integer-valued.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A 2D point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this point by `dx`, `dy`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev distance, the metric toolkits use for drag and double-click slop.
    #[must_use]
    pub fn max_axis_distance(&self, other: &Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 2D size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X position of top-left corner
    pub x: i32,
    /// Y position of top-left corner
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the origin (top-left) point.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get the size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Check if a pixel lies inside the rectangle.
    ///
    /// The right and bottom edges are exclusive, so adjacent rectangles never
    /// both claim the same pixel.
    #[must_use]
    pub const fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Same rectangle moved by `delta`.
    #[must_use]
    pub const fn translate(&self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_default() {
        assert_eq!(Point::default(), Point::ORIGIN);
    }

    #[test]
    fn test_point_offset_and_ops() {
        let p = Point::new(10, 20).offset(-30, -10);
        assert_eq!(p, Point::new(-20, 10));
        assert_eq!(Point::new(1, 2) + Point::new(3, 4), Point::new(4, 6));
        assert_eq!(Point::new(5, 5) - Point::new(2, 7), Point::new(3, -2));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(3, -4).to_string(), "(3, -4)");
    }

    #[test]
    fn test_max_axis_distance() {
        assert_eq!(Point::new(0, 0).max_axis_distance(&Point::new(3, -7)), 7);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn test_rect_contains_point_edges() {
        let r = Rect::new(10, 10, 20, 5);
        assert!(r.contains_point(Point::new(10, 10)));
        assert!(r.contains_point(Point::new(29, 14)));
        assert!(!r.contains_point(Point::new(30, 14)));
        assert!(!r.contains_point(Point::new(29, 15)));
        assert!(!r.contains_point(Point::new(9, 12)));
    }

    #[test]
    fn test_rect_translate() {
        let r = Rect::new(1, 2, 3, 4).translate(Point::new(10, 20));
        assert_eq!(r, Rect::new(11, 22, 3, 4));
        assert_eq!(r.right(), 14);
        assert_eq!(r.bottom(), 26);
    }

    #[test]
    fn test_rect_serde_roundtrip() {
        let r = Rect::new(1, 2, 3, 4);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(serde_json::from_str::<Rect>(&json).unwrap(), r);
    }

    proptest! {
        #[test]
        fn prop_empty_rect_contains_nothing(x in -100i32..100, y in -100i32..100, px in -200i32..200, py in -200i32..200) {
            let r = Rect::new(x, y, 0, 10);
            prop_assert!(!r.contains_point(Point::new(px, py)));
        }

        #[test]
        fn prop_translate_preserves_containment(x in -50i32..50, y in -50i32..50, dx in -50i32..50, dy in -50i32..50) {
            let r = Rect::new(x, y, 10, 10);
            let inside = Point::new(x + 3, y + 4);
            prop_assert!(r.translate(Point::new(dx, dy)).contains_point(inside + Point::new(dx, dy)));
        }
    }
}
