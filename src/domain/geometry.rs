//! Geometric types for pointer positions and hit regions

use serde::{Deserialize, Serialize};

/// A position in screen space (pixels)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point from coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Round both coordinates to the nearest whole pixel
    pub fn rounded(self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Axis-aligned rectangle in screen space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Create a new rectangle from coordinates
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of the given half extents centered on a point
    pub fn centered(center: Point, half_width: f64, half_height: f64) -> Self {
        Self::new(
            center.x - half_width,
            center.y - half_height,
            center.x + half_width,
            center.y + half_height,
        )
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}
