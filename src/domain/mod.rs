//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the crate.
//! Types here know nothing about sinks, sessions or the driver binary.

pub mod geometry;
pub mod selection;
pub mod visual;

pub use geometry::*;
pub use selection::*;
pub use visual::*;
