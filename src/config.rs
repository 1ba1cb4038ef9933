//! Configuration persistence for gazepick tunables

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sink::LinearCalibration;

/// Saturates at zero or `Duration::MAX` on out-of-range values
fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

/// Statistical stabilization of continuous pointing sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Samples older than this (seconds) are dropped from the window
    pub retention_secs: f64,
    /// The oldest retained sample must be at least this old (seconds)
    pub min_evidence_secs: f64,
    /// Minimum number of retained samples before evaluating
    pub min_samples: usize,
    /// Lower bound of the standard deviation dead-band (exclusive)
    pub stddev_min: f64,
    /// Upper bound of the standard deviation dead-band (exclusive)
    pub stddev_max: f64,
    /// A discrete source goes inactive after this much silence (seconds)
    pub discrete_timeout_secs: f64,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            retention_secs: 2.0,
            min_evidence_secs: 1.5,
            min_samples: 11,
            stddev_min: 0.01,
            stddev_max: 15.0,
            discrete_timeout_secs: 2.0,
        }
    }
}

impl StabilizerConfig {
    pub fn retention(&self) -> Duration {
        secs_to_duration(self.retention_secs)
    }

    pub fn min_evidence(&self) -> Duration {
        secs_to_duration(self.min_evidence_secs)
    }

    pub fn discrete_timeout(&self) -> Duration {
        secs_to_duration(self.discrete_timeout_secs)
    }
}

/// Dwell selection timing and policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Time in `Preselected` after which a hit confirms the selection (seconds)
    pub dwell_secs: f64,
    /// A gap in hits longer than this cancels preselection (seconds)
    pub preselect_decay_secs: f64,
    /// Only one target may be selected at a time
    pub exclusive: bool,
    /// Radius of the bounding circle used for hit testing (pixels)
    pub hit_radius: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            dwell_secs: 1.0,
            preselect_decay_secs: 0.5,
            exclusive: false,
            hit_radius: 75.0,
        }
    }
}

impl SelectionConfig {
    pub fn dwell(&self) -> Duration {
        secs_to_duration(self.dwell_secs)
    }

    pub fn preselect_decay(&self) -> Duration {
        secs_to_duration(self.preselect_decay_secs)
    }
}

/// Polygon authoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonConfig {
    /// A click closer than this to the first vertex closes the loop (pixels)
    pub closure_radius: f64,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            closure_radius: 30.0,
        }
    }
}

/// Cadence of the two periodic drivers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Stabilizer tick and target sweep (milliseconds)
    pub fast_ms: u64,
    /// Preselection decay tick (milliseconds)
    pub slow_ms: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            fast_ms: 100,
            slow_ms: 500,
        }
    }
}

impl TickConfig {
    pub fn fast(&self) -> Duration {
        Duration::from_millis(self.fast_ms)
    }

    pub fn slow(&self) -> Duration {
        Duration::from_millis(self.slow_ms)
    }
}

/// All tunables, persisted as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub stabilizer: StabilizerConfig,
    pub selection: SelectionConfig,
    pub polygon: PolygonConfig,
    pub ticks: TickConfig,
    pub calibration: LinearCalibration,
}

impl TrackingConfig {
    /// Application directory name below the user config dir
    pub const APP_DIR: &'static str = "gazepick";

    /// `<config dir>/gazepick/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        let config: TrackingConfig = serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values that would make the state machines meaningless
    pub fn validate(&self) -> Result<()> {
        let s = &self.stabilizer;
        if !(s.stddev_min >= 0.0 && s.stddev_min < s.stddev_max) {
            return Err(Error::Config(format!(
                "stddev band ({}, {}) is empty",
                s.stddev_min, s.stddev_max
            )));
        }
        if s.min_evidence_secs > s.retention_secs {
            return Err(Error::Config(
                "min_evidence_secs exceeds retention_secs".to_string(),
            ));
        }
        let secs = [
            ("retention_secs", s.retention_secs),
            ("min_evidence_secs", s.min_evidence_secs),
            ("discrete_timeout_secs", s.discrete_timeout_secs),
            ("dwell_secs", self.selection.dwell_secs),
            ("preselect_decay_secs", self.selection.preselect_decay_secs),
        ];
        for (name, value) in secs {
            Duration::try_from_secs_f64(value)
                .map_err(|e| Error::Config(format!("{} = {}: {}", name, value, e)))?;
        }
        let radii = [
            ("hit_radius", self.selection.hit_radius),
            ("closure_radius", self.polygon.closure_radius),
        ];
        for (name, value) in radii {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{} must be positive, got {}", name, value)));
            }
        }
        if self.ticks.fast_ms == 0 || self.ticks.slow_ms == 0 {
            return Err(Error::Config("tick intervals must be non-zero".to_string()));
        }
        Ok(())
    }
}
