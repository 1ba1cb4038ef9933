//! Closed regions traced by clicking successive boundary points
//!
//! A click near the first vertex closes the loop; the closing edge is implicit
//! and never stored as a vertex.

use crate::config::PolygonConfig;
use crate::domain::Point;
use crate::error::{Error, Result};
use crate::sink::{CalibrationProvider, WorldPoint};

/// Smallest number of vertices a closed region may have
pub const MIN_CLOSED_VERTICES: usize = 3;

/// Outcome of [`PolygonBuilder::add_point`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonStatus {
    Continuing,
    Closed,
}

/// Whether the previewed edge would close the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStyle {
    Open,
    Closing,
}

/// Edge from the last committed vertex to the cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewEdge {
    pub from: Point,
    pub to: Point,
    pub style: PreviewStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonBuilder {
    vertices: Vec<Point>,
    closed: bool,
    closure_radius: f64,
}

impl Default for PolygonBuilder {
    fn default() -> Self {
        Self::new(&PolygonConfig::default())
    }
}

impl PolygonBuilder {
    pub fn new(config: &PolygonConfig) -> Self {
        Self {
            vertices: Vec::new(),
            closed: false,
            closure_radius: config.closure_radius,
        }
    }

    /// An already-closed region, e.g. one restored from a stored vertex list
    pub fn from_closed(points: Vec<Point>, config: &PolygonConfig) -> Result<Self> {
        if points.len() < MIN_CLOSED_VERTICES {
            return Err(Error::InvalidGeometry(format!(
                "closed region needs at least {} vertices, got {}",
                MIN_CLOSED_VERTICES,
                points.len()
            )));
        }
        Ok(Self {
            vertices: points,
            closed: true,
            closure_radius: config.closure_radius,
        })
    }

    pub fn add_point(&mut self, pt: Point) -> PolygonStatus {
        if self.closed {
            log::debug!("polygon: ignoring {:?}, region already closed", pt);
            return PolygonStatus::Closed;
        }
        let Some(&first) = self.vertices.first() else {
            self.vertices.push(pt);
            return PolygonStatus::Continuing;
        };

        if pt.distance(first) >= self.closure_radius {
            self.vertices.push(pt);
            return PolygonStatus::Continuing;
        }

        if self.vertices.len() < MIN_CLOSED_VERTICES {
            let err = Error::InvalidGeometry(format!(
                "closing after {} vertices",
                self.vertices.len()
            ));
            log::debug!("polygon: closure ignored: {}", err);
            return PolygonStatus::Continuing;
        }

        self.closed = true;
        log::info!("polygon: closed with {} vertices", self.vertices.len());
        PolygonStatus::Closed
    }

    pub fn preview_edge(&self, cursor: Point) -> Option<PreviewEdge> {
        if self.closed {
            return None;
        }
        let first = *self.vertices.first()?;
        let last = *self.vertices.last()?;
        let style = if cursor.distance(first) < self.closure_radius {
            PreviewStyle::Closing
        } else {
            PreviewStyle::Open
        };
        Some(PreviewEdge {
            from: last,
            to: cursor,
            style,
        })
    }

    /// Vertices in click order, only once closed
    pub fn finished_vertices(&self) -> Option<&[Point]> {
        self.closed.then_some(self.vertices.as_slice())
    }

    /// Finished vertices mapped to world coordinates
    pub fn world_vertices(&self, calibration: &dyn CalibrationProvider) -> Option<Vec<WorldPoint>> {
        self.finished_vertices()
            .map(|v| v.iter().map(|p| calibration.pixel_to_point(*p)).collect())
    }

    /// Committed boundary edges, including the closing edge once closed
    pub fn edges(&self) -> Vec<(Point, Point)> {
        let mut edges: Vec<(Point, Point)> =
            self.vertices.windows(2).map(|w| (w[0], w[1])).collect();
        if self.closed {
            if let (Some(&first), Some(&last)) = (self.vertices.first(), self.vertices.last()) {
                edges.push((last, first));
            }
        }
        edges
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_started(&self) -> bool {
        !self.vertices.is_empty()
    }

    pub fn reset(&mut self) {
        self.vertices.clear();
        self.closed = false;
    }
}
