//! Input messages consumed by a [`Session`](super::Session)
//!
//! The driver binary reads these as JSON lines, e.g.
//! `{"type":"pointer","source":"gaze","x":100.0,"y":120.0}`.

use serde::{Deserialize, Serialize};

use crate::domain::{Modality, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputMsg {
    /// Start tracking a pointing source
    RegisterSource {
        id: String,
        #[serde(default)]
        modality: Modality,
    },
    UnregisterSource {
        id: String,
    },
    /// Raw position from a source, optionally a click
    Pointer {
        source: String,
        x: f64,
        y: f64,
        #[serde(default)]
        click: bool,
    },
    AddTarget {
        id: String,
        kind: String,
        x: f64,
        y: f64,
    },
    RemoveTarget {
        id: String,
    },
    MoveTarget {
        id: String,
        x: f64,
        y: f64,
    },
    Deselect {
        id: String,
    },
    DeselectAll,
    /// Discard any region being traced and start a new one
    StartPolygon,
    /// Cursor moved while tracing a region
    PolygonCursor {
        x: f64,
        y: f64,
    },
    /// Boundary click while tracing a region
    PolygonClick {
        x: f64,
        y: f64,
    },
    ResetPolygon,
    AddPlace {
        x: f64,
        y: f64,
    },
    ClearPlaces,
}

impl InputMsg {
    /// Screen position carried by the message, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputMsg::Pointer { x, y, .. }
            | InputMsg::AddTarget { x, y, .. }
            | InputMsg::MoveTarget { x, y, .. }
            | InputMsg::PolygonCursor { x, y }
            | InputMsg::PolygonClick { x, y }
            | InputMsg::AddPlace { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}
