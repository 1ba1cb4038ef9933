//! Drawable primitives handed to a [`VisualSink`](crate::sink::VisualSink)
//!
//! All coordinates are screen-space pixels.

use super::geometry::Point;
use super::selection::{SourceId, TargetId};

/// Diameter of the disc drawn for a target
pub const TARGET_DIAMETER: f64 = 150.0;
/// Diameter of the preselect/selected halo drawn behind a target
pub const HALO_DIAMETER: f64 = 180.0;
/// Diameter of the cursor disc of a pointing source
pub const CURSOR_DIAMETER: f64 = 50.0;
/// Diameter of a place marker
pub const PLACE_DIAMETER: f64 = 100.0;

/// Identifies one drawable item in the scene
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisualKey {
    Cursor(SourceId),
    Target(TargetId),
    Label(TargetId),
    Preselect(TargetId),
    Selected(TargetId),
    Place(usize),
    PolygonEdge(usize),
    PolygonPreview,
}

/// Fill color of a disc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    White,
    Gray,
    Green,
    Blue,
    Cyan,
}

/// Pen style of a polygon edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    /// Preview edge that would not close the polygon
    Dotted,
    /// Committed edge, or preview snapping to the first vertex
    Solid,
}

/// A drawable primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Disc {
        center: Point,
        diameter: f64,
        tint: Tint,
    },
    Label {
        anchor: Point,
        text: String,
    },
    Segment {
        from: Point,
        to: Point,
        style: EdgeStyle,
    },
}

impl Shape {
    pub fn disc(center: Point, diameter: f64, tint: Tint) -> Self {
        Shape::Disc {
            center,
            diameter,
            tint,
        }
    }

    pub fn segment(from: Point, to: Point, style: EdgeStyle) -> Self {
        Shape::Segment { from, to, style }
    }
}
