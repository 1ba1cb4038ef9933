//! Pointing stabilization
//!
//! Raw positions from gaze sensors or mice become a debounced
//! "steadily pointing here" signal per source.

pub mod source;
pub mod stabilizer;

pub use source::{PointingSample, PointingSource, WindowStats};
pub use stabilizer::PointingStabilizer;
