//! gazepick: dwell-based object selection and click-traced regions
//!
//! Modules, leaves first:
//! - `domain`: geometry, selection and drawable types
//! - `pointing`: per-source stabilization of raw pointer samples
//! - `selection`: dwell-confirmation state machine, target registry, hit tests
//! - `polygon`: closed-region authoring with proximity loop closure
//! - `place`: fixed points of interest
//! - `sink`: calibration, event publication and visual side-effect contracts
//! - `session`: one owner wiring all of the above to input messages and ticks

pub mod config;
pub mod domain;
pub mod error;
pub mod place;
pub mod pointing;
pub mod polygon;
pub mod selection;
pub mod session;
pub mod sink;

pub use config::TrackingConfig;
pub use error::{Error, Result};
pub use session::{InputMsg, Session};
