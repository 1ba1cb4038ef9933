//! Screen-to-world coordinate transforms

use serde::{Deserialize, Serialize};

use crate::domain::Point;

/// A point in world coordinates (meters)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A world position with heading (radians, about the vertical axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: WorldPoint,
    pub yaw: f64,
}

/// Maps screen pixels to world coordinates
pub trait CalibrationProvider {
    fn pixel_to_pose(&self, pixel: Point) -> Pose;
    fn pixel_to_point(&self, pixel: Point) -> WorldPoint;
}

/// Axis-aligned scale and offset onto a plane at fixed height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearCalibration {
    /// Meters per pixel along x
    pub scale_x: f64,
    /// Meters per pixel along y
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Height of the workspace plane
    pub z: f64,
}

impl Default for LinearCalibration {
    fn default() -> Self {
        Self {
            scale_x: 0.001,
            scale_y: 0.001,
            offset_x: 0.0,
            offset_y: 0.0,
            z: 0.0,
        }
    }
}

impl CalibrationProvider for LinearCalibration {
    fn pixel_to_pose(&self, pixel: Point) -> Pose {
        Pose {
            position: self.pixel_to_point(pixel),
            yaw: 0.0,
        }
    }

    fn pixel_to_point(&self, pixel: Point) -> WorldPoint {
        WorldPoint {
            x: pixel.x * self.scale_x + self.offset_x,
            y: pixel.y * self.scale_y + self.offset_y,
            z: self.z,
        }
    }
}
