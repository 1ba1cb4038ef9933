//! Outbound notifications: confirmed selections, placed poses, closed regions

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

use super::calibration::{Pose, WorldPoint};
use crate::error::{Error, Result};

/// An outbound notification, serialized one per line by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OutputEvent {
    Selection { target: String },
    Pose { pose: Pose },
    Polygon { points: Vec<WorldPoint> },
}

/// Receives outbound notifications
pub trait EventSink {
    fn publish_selection(&mut self, target: &str) -> Result<()>;
    fn publish_pose(&mut self, pose: Pose) -> Result<()>;
    fn publish_polygon(&mut self, points: &[WorldPoint]) -> Result<()>;
}

/// Forwards events over a crossbeam channel
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: Sender<OutputEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: Sender<OutputEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: OutputEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|e| Error::Sink(format!("event receiver dropped: {:?}", e.0)))
    }
}

impl EventSink for ChannelEventSink {
    fn publish_selection(&mut self, target: &str) -> Result<()> {
        self.send(OutputEvent::Selection {
            target: target.to_string(),
        })
    }

    fn publish_pose(&mut self, pose: Pose) -> Result<()> {
        self.send(OutputEvent::Pose { pose })
    }

    fn publish_polygon(&mut self, points: &[WorldPoint]) -> Result<()> {
        self.send(OutputEvent::Polygon {
            points: points.to_vec(),
        })
    }
}

/// Keeps every published event in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    pub events: Vec<OutputEvent>,
}

impl RecordingEventSink {
    /// Targets of all published selections, in order
    pub fn selections(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                OutputEvent::Selection { target } => Some(target.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn publish_selection(&mut self, target: &str) -> Result<()> {
        self.events.push(OutputEvent::Selection {
            target: target.to_string(),
        });
        Ok(())
    }

    fn publish_pose(&mut self, pose: Pose) -> Result<()> {
        self.events.push(OutputEvent::Pose { pose });
        Ok(())
    }

    fn publish_polygon(&mut self, points: &[WorldPoint]) -> Result<()> {
        self.events.push(OutputEvent::Polygon {
            points: points.to_vec(),
        });
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish_selection(&mut self, _target: &str) -> Result<()> {
        Ok(())
    }

    fn publish_pose(&mut self, _pose: Pose) -> Result<()> {
        Ok(())
    }

    fn publish_polygon(&mut self, _points: &[WorldPoint]) -> Result<()> {
        Ok(())
    }
}

/// Rejects every publish, for exercising the log-and-continue paths
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FailingEventSink;

#[cfg(test)]
impl EventSink for FailingEventSink {
    fn publish_selection(&mut self, _target: &str) -> Result<()> {
        Err(Error::Sink("selection rejected".to_string()))
    }

    fn publish_pose(&mut self, _pose: Pose) -> Result<()> {
        Err(Error::Sink("pose rejected".to_string()))
    }

    fn publish_polygon(&mut self, _points: &[WorldPoint]) -> Result<()> {
        Err(Error::Sink("polygon rejected".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sink_forwards() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ChannelEventSink::new(tx);
        sink.publish_selection("cup").unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            OutputEvent::Selection {
                target: "cup".to_string()
            }
        );
    }

    #[test]
    fn test_channel_sink_reports_dropped_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut sink = ChannelEventSink::new(tx);
        assert!(matches!(sink.publish_pose(Pose::default()), Err(Error::Sink(_))));
    }

    #[test]
    fn test_output_event_json_shape() {
        let json = serde_json::to_string(&OutputEvent::Selection {
            target: "cup".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"selection","target":"cup"}"#);
    }
}
