//! Keyed collection of selectable targets

use std::collections::BTreeMap;
use std::time::Instant;

use super::hit_test::HitTestProvider;
use super::target::TargetSelection;
use crate::config::SelectionConfig;
use crate::domain::{Point, SelectableTarget, SelectionEvent, TargetId};
use crate::error::{Error, Result};
use crate::sink::{EventSink, VisualSink};

/// Single owner of every [`TargetSelection`]
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    config: SelectionConfig,
    targets: BTreeMap<TargetId, TargetSelection>,
}

impl TargetRegistry {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            targets: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, target: SelectableTarget, visuals: &mut dyn VisualSink) -> Result<()> {
        if self.targets.contains_key(&target.id) {
            return Err(Error::DuplicateTarget(target.id));
        }
        log::debug!("object {}: added at {:?}", target.id, target.position);
        let selection = TargetSelection::new(target, &self.config);
        selection.show(visuals);
        self.targets.insert(selection.id().to_string(), selection);
        Ok(())
    }

    /// Deselect, hide and drop a target
    pub fn remove(&mut self, id: &str, visuals: &mut dyn VisualSink) -> Result<SelectableTarget> {
        let mut selection = self
            .targets
            .remove(id)
            .ok_or_else(|| Error::UnknownTarget(id.to_string()))?;
        selection.remove(visuals);
        Ok(selection.target().clone())
    }

    pub fn set_position(
        &mut self,
        id: &str,
        position: Point,
        visuals: &mut dyn VisualSink,
    ) -> Result<()> {
        self.get_mut(id)?.set_position(position, visuals);
        Ok(())
    }

    pub fn deselect(&mut self, id: &str, visuals: &mut dyn VisualSink) -> Result<()> {
        self.get_mut(id)?.deselect(visuals);
        Ok(())
    }

    pub fn deselect_all(&mut self, visuals: &mut dyn VisualSink) {
        for selection in self.targets.values_mut() {
            selection.deselect(visuals);
        }
    }

    pub fn get(&self, id: &str) -> Option<&TargetSelection> {
        self.targets.get(id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetSelection> {
        self.targets.values()
    }

    pub fn selected(&self) -> impl Iterator<Item = &SelectableTarget> {
        self.targets
            .values()
            .filter(|s| s.is_selected())
            .map(|s| s.target())
    }

    /// Hit-test every target against one pointer position and publish confirmations
    pub fn sweep(
        &mut self,
        pointer: Point,
        now: Instant,
        click: bool,
        hit_test: &dyn HitTestProvider,
        visuals: &mut dyn VisualSink,
        events: &mut dyn EventSink,
    ) -> Vec<SelectionEvent> {
        let hits: Vec<TargetId> = self
            .targets
            .values()
            .filter(|s| hit_test.test_hit(s.target(), pointer))
            .map(|s| s.id().to_string())
            .collect();

        let mut confirmed = Vec::new();
        for id in hits {
            let Some(selection) = self.targets.get_mut(&id) else {
                continue;
            };
            let Some(event) = selection.hit_test(true, now, click, visuals) else {
                continue;
            };

            if let Err(err) = events.publish_selection(&event.target) {
                log::warn!("Failed to publish selection of {}: {}", event.target, err);
            }
            if self.config.exclusive {
                for other in self.targets.values_mut() {
                    if other.id() != id && other.is_selected() {
                        other.deselect(visuals);
                    }
                }
            }
            confirmed.push(event);
        }
        confirmed
    }

    pub fn tick(&mut self, now: Instant, visuals: &mut dyn VisualSink) {
        for selection in self.targets.values_mut() {
            selection.tick(now, visuals);
        }
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut TargetSelection> {
        self.targets
            .get_mut(id)
            .ok_or_else(|| Error::UnknownTarget(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SelectionState, VisualKey};
    use crate::selection::RadiusHitTest;
    use crate::sink::events::FailingEventSink;
    use crate::sink::{RecordingEventSink, RecordingVisualSink};
    use std::time::Duration;

    struct Fixture {
        registry: TargetRegistry,
        visuals: RecordingVisualSink,
        events: RecordingEventSink,
        hit: RadiusHitTest,
    }

    impl Fixture {
        fn new(exclusive: bool) -> Self {
            let config = SelectionConfig {
                exclusive,
                ..SelectionConfig::default()
            };
            let mut fixture = Self {
                registry: TargetRegistry::new(config),
                visuals: RecordingVisualSink::default(),
                events: RecordingEventSink::default(),
                hit: RadiusHitTest::new(75.0),
            };
            for (id, x) in [("left", 100.0), ("right", 500.0)] {
                fixture
                    .registry
                    .insert(
                        SelectableTarget::new(id, "tool", Point::new(x, 100.0)),
                        &mut fixture.visuals,
                    )
                    .unwrap();
            }
            fixture
        }

        fn sweep(&mut self, x: f64, now: Instant, click: bool) -> Vec<SelectionEvent> {
            self.registry.sweep(
                Point::new(x, 100.0),
                now,
                click,
                &self.hit,
                &mut self.visuals,
                &mut self.events,
            )
        }
    }

    #[test]
    fn test_duplicate_and_unknown() {
        let mut f = Fixture::new(false);
        assert!(matches!(
            f.registry.insert(
                SelectableTarget::new("left", "tool", Point::default()),
                &mut f.visuals
            ),
            Err(Error::DuplicateTarget(_))
        ));
        assert!(matches!(
            f.registry.remove("ghost", &mut f.visuals),
            Err(Error::UnknownTarget(_))
        ));
        assert!(matches!(
            f.registry.deselect("ghost", &mut f.visuals),
            Err(Error::UnknownTarget(_))
        ));
    }

    #[test]
    fn test_sweep_only_touches_hit_targets() {
        let mut f = Fixture::new(false);
        let base = Instant::now();
        assert!(f.sweep(110.0, base, false).is_empty());
        assert_eq!(f.registry.get("left").unwrap().state(), SelectionState::Preselected);
        assert_eq!(f.registry.get("right").unwrap().state(), SelectionState::Idle);
    }

    #[test]
    fn test_dwell_publishes_once() {
        let mut f = Fixture::new(false);
        let base = Instant::now();
        for ms in (0..=2000).step_by(100) {
            f.sweep(100.0, base + Duration::from_millis(ms), false);
        }
        assert_eq!(f.events.selections(), vec!["left"]);
        assert_eq!(f.registry.selected().count(), 1);
    }

    #[test]
    fn test_exclusive_policy_keeps_one_selected() {
        let mut f = Fixture::new(true);
        let base = Instant::now();

        f.sweep(100.0, base, false);
        f.sweep(100.0, base + Duration::from_millis(100), true);
        f.sweep(500.0, base + Duration::from_millis(200), false);
        f.sweep(500.0, base + Duration::from_millis(300), true);

        assert_eq!(f.events.selections(), vec!["left", "right"]);
        let selected: Vec<_> = f.registry.selected().map(|t| t.id.as_str()).collect();
        assert_eq!(selected, vec!["right"]);
        assert!(!f.visuals.contains(&VisualKey::Selected("left".to_string())));
    }

    #[test]
    fn test_shared_policy_allows_many() {
        let mut f = Fixture::new(false);
        let base = Instant::now();
        f.sweep(100.0, base, false);
        f.sweep(100.0, base + Duration::from_millis(100), true);
        f.sweep(500.0, base + Duration::from_millis(200), false);
        f.sweep(500.0, base + Duration::from_millis(300), true);
        assert_eq!(f.registry.selected().count(), 2);

        f.registry.deselect_all(&mut f.visuals);
        assert_eq!(f.registry.selected().count(), 0);
    }

    #[test]
    fn test_publish_failure_still_selects() {
        let mut f = Fixture::new(false);
        let mut events = FailingEventSink;
        let base = Instant::now();

        let mut confirmed = Vec::new();
        for ms in [0, 1000] {
            confirmed.extend(f.registry.sweep(
                Point::new(100.0, 100.0),
                base + Duration::from_millis(ms),
                false,
                &f.hit,
                &mut f.visuals,
                &mut events,
            ));
        }

        assert_eq!(
            confirmed,
            vec![SelectionEvent {
                target: "left".to_string()
            }]
        );
        assert_eq!(f.registry.get("left").unwrap().state(), SelectionState::Selected);
        assert!(f.visuals.contains(&VisualKey::Selected("left".to_string())));
    }

    #[test]
    fn test_tick_decays_preselection() {
        let mut f = Fixture::new(false);
        let base = Instant::now();
        f.sweep(100.0, base, false);
        f.registry.tick(base + Duration::from_millis(600), &mut f.visuals);
        assert_eq!(f.registry.get("left").unwrap().state(), SelectionState::Idle);
    }

    #[test]
    fn test_remove_selected_target_hides_it() {
        let mut f = Fixture::new(false);
        let base = Instant::now();
        f.sweep(100.0, base, false);
        f.sweep(100.0, base + Duration::from_millis(100), true);

        let removed = f.registry.remove("left", &mut f.visuals).unwrap();
        assert_eq!(removed.state, SelectionState::Idle);
        assert_eq!(f.registry.len(), 1);
        assert!(f.visuals.keys().all(|k| !matches!(
            k,
            VisualKey::Target(id) | VisualKey::Label(id) | VisualKey::Selected(id) if id == "left"
        )));
    }

    #[test]
    fn test_move_changes_hit_region() {
        let mut f = Fixture::new(false);
        f.registry
            .set_position("right", Point::new(300.0, 100.0), &mut f.visuals)
            .unwrap();
        f.sweep(300.0, Instant::now(), false);
        assert_eq!(f.registry.get("right").unwrap().state(), SelectionState::Preselected);
    }
}
