//! Observable drawing side effects
//!
//! Core state changes never depend on these calls succeeding: callers mutate
//! state first and then go through [`draw`]/[`erase`], which only log failures.

use std::collections::BTreeMap;

use crate::domain::{Shape, VisualKey};
use crate::error::Result;

/// Receives add/update/remove requests for drawable primitives
pub trait VisualSink {
    /// Add the shape, or replace the one already shown under `key`
    fn show(&mut self, key: VisualKey, shape: Shape) -> Result<()>;
    /// Remove the shape shown under `key`; unknown keys are ignored
    fn hide(&mut self, key: &VisualKey) -> Result<()>;
}

pub(crate) fn draw(visuals: &mut dyn VisualSink, key: VisualKey, shape: Shape) {
    if let Err(err) = visuals.show(key.clone(), shape) {
        log::warn!("Failed to show {:?}: {}", key, err);
    }
}

pub(crate) fn erase(visuals: &mut dyn VisualSink, key: VisualKey) {
    if let Err(err) = visuals.hide(&key) {
        log::warn!("Failed to hide {:?}: {}", key, err);
    }
}

/// Headless sink
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVisualSink;

impl VisualSink for NullVisualSink {
    fn show(&mut self, _key: VisualKey, _shape: Shape) -> Result<()> {
        Ok(())
    }

    fn hide(&mut self, _key: &VisualKey) -> Result<()> {
        Ok(())
    }
}

/// Logs every request at trace level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogVisualSink;

impl VisualSink for LogVisualSink {
    fn show(&mut self, key: VisualKey, shape: Shape) -> Result<()> {
        log::trace!("show {:?}: {:?}", key, shape);
        Ok(())
    }

    fn hide(&mut self, key: &VisualKey) -> Result<()> {
        log::trace!("hide {:?}", key);
        Ok(())
    }
}

/// Keeps the current scene in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingVisualSink {
    scene: BTreeMap<VisualKey, Shape>,
}

impl RecordingVisualSink {
    pub fn get(&self, key: &VisualKey) -> Option<&Shape> {
        self.scene.get(key)
    }

    pub fn contains(&self, key: &VisualKey) -> bool {
        self.scene.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &VisualKey> {
        self.scene.keys()
    }
}

impl VisualSink for RecordingVisualSink {
    fn show(&mut self, key: VisualKey, shape: Shape) -> Result<()> {
        self.scene.insert(key, shape);
        Ok(())
    }

    fn hide(&mut self, key: &VisualKey) -> Result<()> {
        self.scene.remove(key);
        Ok(())
    }
}
