//! 2D geometry value types used throughout the editor core.
//!
//! All coordinates are `f32`. "World" coordinates are the blueprint's own
//! space, independent of zoom and pan; "screen" coordinates are pixels on
//! the rendering surface. The [`crate::viewport::Viewport`] converts between
//! the two.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// A 2D point (or vector — the distinction is not enforced).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point {
    type Output = Point;
    fn div(self, rhs: f32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// A 2D extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle stored as two corners.
///
/// `(x1, y1)` is the top-left corner and `(x2, y2)` the bottom-right one.
/// The default value is the degenerate zero rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x1 + self.width() * 0.5,
            self.y1 + self.height() * 0.5,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(2.0, 3.0) + Point::new(1.0, -1.0);
        assert_eq!(p, Point::new(3.0, 2.0));
        assert_eq!(p - Point::new(3.0, 2.0), Point::ZERO);
        assert_eq!(Point::new(2.0, 4.0) * 0.5, Point::new(1.0, 2.0));
        assert_eq!(Point::new(2.0, 4.0) / 2.0, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_bounds_dimensions_and_center() {
        let b = Bounds::new(0.0, 0.0, 180.0, 140.0);
        assert_eq!(b.width(), 180.0);
        assert_eq!(b.height(), 140.0);
        assert_eq!(b.center(), Point::new(90.0, 70.0));
    }

    #[test]
    fn test_bounds_contains_is_inclusive() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(!b.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn test_default_bounds_is_degenerate_zero() {
        let b = Bounds::default();
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
    }
}
