//! Dwell-confirmed target selection
//!
//! This module contains:
//! - The per-target selection state machine
//! - The registry owning all targets and sweeping them against pointer positions
//! - Hit-test predicates

pub mod registry;
pub mod target;

pub use hit_test::{HitTestProvider, RadiusHitTest, RectHitTest};
pub use registry::TargetRegistry;
pub use target::TargetSelection;
