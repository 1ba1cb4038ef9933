//! A fixed point of interest that reports its pose once, on creation

use crate::domain::{PLACE_DIAMETER, Point, Shape, Tint, VisualKey};
use crate::sink::visual::{draw, erase};
use crate::sink::{CalibrationProvider, EventSink, Pose, VisualSink};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    index: usize,
    position: Point,
}

impl Place {
    /// Show the marker and publish its pose
    pub fn create(
        index: usize,
        position: Point,
        calibration: &dyn CalibrationProvider,
        visuals: &mut dyn VisualSink,
        events: &mut dyn EventSink,
    ) -> Self {
        let place = Self { index, position };
        draw(
            visuals,
            VisualKey::Place(index),
            Shape::disc(position, PLACE_DIAMETER, Tint::Cyan),
        );
        let pose = place.pose(calibration);
        log::info!("place {}: {:?} -> {:?}", index, position, pose.position);
        if let Err(err) = events.publish_pose(pose) {
            log::warn!("Failed to publish pose of place {}: {}", index, err);
        }
        place
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn pose(&self, calibration: &dyn CalibrationProvider) -> Pose {
        calibration.pixel_to_pose(self.position)
    }

    pub fn remove(&self, visuals: &mut dyn VisualSink) {
        erase(visuals, VisualKey::Place(self.index));
    }
}
