//! Registry of pointing sources turning raw samples into stable positions

use std::collections::BTreeMap;
use std::time::Instant;

use super::source::PointingSource;
use crate::config::StabilizerConfig;
use crate::domain::{Modality, Point, SourceId};
use crate::error::{Error, Result};

/// Owns every registered [`PointingSource`]
#[derive(Debug, Clone, Default)]
pub struct PointingStabilizer {
    config: StabilizerConfig,
    sources: BTreeMap<SourceId, PointingSource>,
}

impl PointingStabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        Self {
            config,
            sources: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    pub fn register(&mut self, id: &str, modality: Modality) -> Result<()> {
        if self.sources.contains_key(id) {
            return Err(Error::DuplicateSource(id.to_string()));
        }
        log::debug!("pointing source {}: registered ({:?})", id, modality);
        self.sources
            .insert(id.to_string(), PointingSource::new(id, modality));
        Ok(())
    }

    pub fn unregister(&mut self, id: &str) -> Result<PointingSource> {
        self.sources
            .remove(id)
            .ok_or_else(|| Error::UnknownSource(id.to_string()))
    }

    pub fn observe(&mut self, id: &str, position: Point, now: Instant, click: bool) -> Result<()> {
        self.source_mut(id)?.observe(position, now, click);
        Ok(())
    }

    /// Returns whether the source is still active afterwards
    pub fn tick(&mut self, id: &str, now: Instant) -> Result<bool> {
        let config = &self.config;
        let source = self
            .sources
            .get_mut(id)
            .ok_or_else(|| Error::UnknownSource(id.to_string()))?;
        Ok(source.tick(now, config))
    }

    /// Tick every registered source
    pub fn tick_all(&mut self, now: Instant) {
        for source in self.sources.values_mut() {
            source.tick(now, &self.config);
        }
    }

    pub fn stable_position(&self, id: &str) -> Result<Option<Point>> {
        Ok(self.source(id)?.stable_position)
    }

    pub fn is_active(&self, id: &str) -> Result<bool> {
        Ok(self.source(id)?.is_active())
    }

    /// Last raw position of an active source
    pub fn cursor(&self, id: &str) -> Result<Option<Point>> {
        Ok(self.source(id)?.cursor)
    }

    /// Force a source inactive until it reports again
    pub fn disable(&mut self, id: &str) -> Result<()> {
        self.source_mut(id)?.disable();
        Ok(())
    }

    pub fn source(&self, id: &str) -> Result<&PointingSource> {
        self.sources
            .get(id)
            .ok_or_else(|| Error::UnknownSource(id.to_string()))
    }

    pub fn sources(&self) -> impl Iterator<Item = &PointingSource> {
        self.sources.values()
    }

    fn source_mut(&mut self, id: &str) -> Result<&mut PointingSource> {
        self.sources
            .get_mut(id)
            .ok_or_else(|| Error::UnknownSource(id.to_string()))
    }
}
