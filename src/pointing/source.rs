//! Per-source sample window and stability evaluation

use std::collections::VecDeque;
use std::time::Instant;

use crate::config::StabilizerConfig;
use crate::domain::{Modality, Point, SourceId};

/// One raw position reported by a source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointingSample {
    pub position: Point,
    pub timestamp: Instant,
}

/// Mean and population standard deviation of a sample window, per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: Point,
    pub stddev: Point,
}

impl WindowStats {
    /// `None` for an empty window
    pub fn compute<'a>(samples: impl IntoIterator<Item = &'a PointingSample>) -> Option<Self> {
        let positions: Vec<Point> = samples.into_iter().map(|s| s.position).collect();
        if positions.is_empty() {
            return None;
        }

        let n = positions.len() as f64;
        let mean = Point::new(
            positions.iter().map(|p| p.x).sum::<f64>() / n,
            positions.iter().map(|p| p.y).sum::<f64>() / n,
        );
        let var_x = positions.iter().map(|p| (p.x - mean.x).powi(2)).sum::<f64>() / n;
        let var_y = positions.iter().map(|p| (p.y - mean.y).powi(2)).sum::<f64>() / n;

        Some(Self {
            mean,
            stddev: Point::new(var_x.sqrt(), var_y.sqrt()),
        })
    }

    /// Both deviations strictly inside `(min, max)`
    pub fn in_band(&self, min: f64, max: f64) -> bool {
        let inside = |v: f64| v > min && v < max;
        inside(self.stddev.x) && inside(self.stddev.y)
    }
}

/// State of one pointing source
#[derive(Debug, Clone)]
pub struct PointingSource {
    pub id: SourceId,
    pub modality: Modality,
    /// Ordered by timestamp, oldest first
    pub window: VecDeque<PointingSample>,
    pub last_activity: Option<Instant>,
    pub stable_position: Option<Point>,
    /// Last raw position, drawn as the cursor
    pub cursor: Option<Point>,
}

impl PointingSource {
    pub fn new(id: impl Into<SourceId>, modality: Modality) -> Self {
        Self {
            id: id.into(),
            modality,
            window: VecDeque::new(),
            last_activity: None,
            stable_position: None,
            cursor: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.last_activity.is_some()
    }

    pub fn observe(&mut self, position: Point, now: Instant, click: bool) {
        // The window must stay ordered by timestamp
        let now = match self.last_activity {
            Some(last) if now < last => {
                log::debug!(
                    "pointing source {}: sample {:?} older than the previous one, clamped",
                    self.id,
                    last - now
                );
                last
            }
            _ => now,
        };

        match self.modality {
            Modality::Continuous => {
                self.window.push_back(PointingSample {
                    position,
                    timestamp: now,
                });
            }
            Modality::Discrete => {
                if click {
                    log::debug!("pointing source {}: click at {:?}", self.id, position);
                    self.stable_position = Some(position);
                }
            }
        }
        self.cursor = Some(position);
        self.last_activity = Some(now);
    }

    /// Re-evaluate stability and expiry; returns false if the source went inactive
    pub fn tick(&mut self, now: Instant, config: &StabilizerConfig) -> bool {
        let Some(last_activity) = self.last_activity else {
            return false;
        };

        let expired = match self.modality {
            Modality::Continuous => {
                self.trim(now, config);
                self.evaluate(now, config);
                self.window.is_empty()
            }
            Modality::Discrete => {
                now.saturating_duration_since(last_activity) > config.discrete_timeout()
            }
        };

        if expired {
            log::info!("pointing source {}: inactive", self.id);
            self.disable();
            return false;
        }
        true
    }

    /// Forget everything observed so far
    pub fn disable(&mut self) {
        self.window.clear();
        self.last_activity = None;
        self.stable_position = None;
        self.cursor = None;
    }

    fn trim(&mut self, now: Instant, config: &StabilizerConfig) {
        let retention = config.retention();
        while self
            .window
            .front()
            .is_some_and(|s| now.saturating_duration_since(s.timestamp) > retention)
        {
            self.window.pop_front();
        }
    }

    fn evaluate(&mut self, now: Instant, config: &StabilizerConfig) {
        let Some(oldest) = self.window.front() else {
            return;
        };
        if self.window.len() < config.min_samples
            || now.saturating_duration_since(oldest.timestamp) < config.min_evidence()
        {
            return;
        }
        let Some(stats) = WindowStats::compute(&self.window) else {
            return;
        };

        let next = if stats.in_band(config.stddev_min, config.stddev_max) {
            Some(stats.mean.rounded())
        } else {
            None
        };
        if next != self.stable_position {
            log::debug!(
                "pointing source {}: stable position {:?} (stddev {:.3}, {:.3})",
                self.id,
                next,
                stats.stddev.x,
                stats.stddev.y
            );
        }
        self.stable_position = next;
    }
}
