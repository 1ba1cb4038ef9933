//! Selection types for dwell-confirmed targets

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Identifier of a pointing source (one per sensor or mouse)
pub type SourceId = String;

/// Identifier of a selectable target
pub type TargetId = String;

/// Class of pointing source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Streaming gaze/pointing sensor, filtered statistically
    #[default]
    Continuous,
    /// Mouse-like device, commits positions only on click
    Discrete,
}

/// Dwell selection state of a target
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Pointed at, waiting for dwell or click
    Preselected,
    /// Confirmed; stays until explicitly deselected
    Selected,
}

/// A selectable object in the shared workspace
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableTarget {
    pub id: TargetId,
    /// Free-form object type shown in the label
    pub kind: String,
    pub position: Point,
    pub state: SelectionState,
    /// When the target entered `Preselected`
    pub preselected_at: Option<Instant>,
    /// Last time a hit was reported for the target
    pub last_hit_at: Option<Instant>,
}

impl SelectableTarget {
    pub fn new(id: impl Into<TargetId>, kind: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            position,
            state: SelectionState::Idle,
            preselected_at: None,
            last_hit_at: None,
        }
    }

    /// Label text shown next to the target
    pub fn label(&self) -> String {
        format!("{}\n({})", self.id, self.kind)
    }
}

/// Emitted exactly once when a target becomes selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub target: TargetId,
}
