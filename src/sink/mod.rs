//! Boundary contracts with external collaborators
//!
//! This module contains:
//! - Calibration from screen pixels to world poses/points
//! - Event publication (selections, poses, closed regions)
//! - Visual side effects (shapes shown/hidden on state transitions)

pub mod calibration;
pub mod events;
pub mod visual;

pub use calibration::{CalibrationProvider, LinearCalibration, Pose, WorldPoint};
pub use events::{ChannelEventSink, EventSink, NullEventSink, OutputEvent, RecordingEventSink};
pub use visual::{LogVisualSink, NullVisualSink, RecordingVisualSink, VisualSink};
