//! Dwell-confirmation state machine for one selectable target
//!
//! ```text
//!   Idle --hit--> Preselected --hit after dwell / hit with click--> Selected
//!    ^                 |                                               |
//!    +--tick: no hit---+                                               |
//!    +-------------------------------deselect--------------------------+
//! ```
//!
//! Dwell is measured from entry into `Preselected`; decay is measured from the
//! most recent hit, so only a real gap in pointing cancels preselection.

use std::time::{Duration, Instant};

use crate::config::SelectionConfig;
use crate::domain::{
    HALO_DIAMETER, Point, SelectableTarget, SelectionEvent, SelectionState, Shape,
    TARGET_DIAMETER, Tint, VisualKey,
};
use crate::sink::VisualSink;
use crate::sink::visual::{draw, erase};

/// Offset of the label from the target center
const LABEL_OFFSET: Point = Point::new(TARGET_DIAMETER / 2.0 + 45.0, -10.0);

#[derive(Debug, Clone)]
pub struct TargetSelection {
    target: SelectableTarget,
    dwell: Duration,
    decay: Duration,
}

impl TargetSelection {
    pub fn new(target: SelectableTarget, config: &SelectionConfig) -> Self {
        Self {
            target,
            dwell: config.dwell(),
            decay: config.preselect_decay(),
        }
    }

    pub fn target(&self) -> &SelectableTarget {
        &self.target
    }

    pub fn id(&self) -> &str {
        &self.target.id
    }

    pub fn state(&self) -> SelectionState {
        self.target.state
    }

    pub fn is_selected(&self) -> bool {
        self.target.state == SelectionState::Selected
    }

    /// Draw the target disc and its label
    pub fn show(&self, visuals: &mut dyn VisualSink) {
        let id = &self.target.id;
        let center = self.target.position;
        draw(
            visuals,
            VisualKey::Target(id.clone()),
            Shape::disc(center, TARGET_DIAMETER, Tint::White),
        );
        draw(
            visuals,
            VisualKey::Label(id.clone()),
            Shape::Label {
                anchor: Point::new(center.x + LABEL_OFFSET.x, center.y + LABEL_OFFSET.y),
                text: self.target.label(),
            },
        );
    }

    /// Move the target, redrawing it and any halo
    pub fn set_position(&mut self, position: Point, visuals: &mut dyn VisualSink) {
        self.target.position = position;
        self.show(visuals);
        match self.target.state {
            SelectionState::Idle => {}
            SelectionState::Preselected => self.show_halo(visuals, Tint::Gray),
            SelectionState::Selected => self.show_halo(visuals, Tint::Green),
        }
    }

    /// Feed one hit-test result; returns the selection event on confirmation
    pub fn hit_test(
        &mut self,
        is_hit: bool,
        now: Instant,
        click: bool,
        visuals: &mut dyn VisualSink,
    ) -> Option<SelectionEvent> {
        if !is_hit {
            return None;
        }

        match self.target.state {
            SelectionState::Idle => {
                self.target.state = SelectionState::Preselected;
                self.target.preselected_at = Some(now);
                self.target.last_hit_at = Some(now);
                log::info!("object {}: preselected", self.target.id);
                self.show_halo(visuals, Tint::Gray);
                None
            }
            SelectionState::Preselected => {
                self.target.last_hit_at = Some(now);
                let dwelled = self
                    .target
                    .preselected_at
                    .is_some_and(|at| now.saturating_duration_since(at) >= self.dwell);
                if !(click || dwelled) {
                    return None;
                }

                self.target.state = SelectionState::Selected;
                log::info!(
                    "object {}: selected ({})",
                    self.target.id,
                    if click { "click" } else { "dwell" }
                );
                erase(visuals, VisualKey::Preselect(self.target.id.clone()));
                self.show_halo(visuals, Tint::Green);
                Some(SelectionEvent {
                    target: self.target.id.clone(),
                })
            }
            SelectionState::Selected => None,
        }
    }

    /// Cancel a preselection that has not been hit recently
    pub fn tick(&mut self, now: Instant, visuals: &mut dyn VisualSink) {
        if self.target.state != SelectionState::Preselected {
            return;
        }
        let stale = self
            .target
            .last_hit_at
            .is_none_or(|at| now.saturating_duration_since(at) > self.decay);
        if stale {
            self.target.state = SelectionState::Idle;
            self.target.preselected_at = None;
            log::info!("object {}: preselect cancelled", self.target.id);
            erase(visuals, VisualKey::Preselect(self.target.id.clone()));
        }
    }

    /// Return to `Idle` from any state
    pub fn deselect(&mut self, visuals: &mut dyn VisualSink) {
        let previous = self.target.state;
        self.target.state = SelectionState::Idle;
        self.target.preselected_at = None;
        self.target.last_hit_at = None;

        match previous {
            SelectionState::Idle => {}
            SelectionState::Preselected => {
                log::info!("object {}: preselect cancelled", self.target.id);
                erase(visuals, VisualKey::Preselect(self.target.id.clone()));
            }
            SelectionState::Selected => {
                log::info!("object {}: deselected", self.target.id);
                erase(visuals, VisualKey::Selected(self.target.id.clone()));
            }
        }
    }

    /// Deselect and hide everything drawn for the target
    pub fn remove(&mut self, visuals: &mut dyn VisualSink) {
        self.deselect(visuals);
        erase(visuals, VisualKey::Label(self.target.id.clone()));
        erase(visuals, VisualKey::Target(self.target.id.clone()));
    }

    fn show_halo(&self, visuals: &mut dyn VisualSink, tint: Tint) {
        let key = match tint {
            Tint::Green => VisualKey::Selected(self.target.id.clone()),
            _ => VisualKey::Preselect(self.target.id.clone()),
        };
        draw(
            visuals,
            key,
            Shape::disc(self.target.position, HALO_DIAMETER, tint),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingVisualSink;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn cup() -> TargetSelection {
        TargetSelection::new(
            SelectableTarget::new("cup", "container", Point::new(200.0, 150.0)),
            &SelectionConfig::default(),
        )
    }

    #[test]
    fn test_first_hit_preselects() {
        let mut sel = cup();
        let mut visuals = RecordingVisualSink::default();
        let base = Instant::now();

        // A click on an idle target only preselects it
        assert_eq!(sel.hit_test(true, base, true, &mut visuals), None);
        assert_eq!(sel.state(), SelectionState::Preselected);
        assert_eq!(sel.target().preselected_at, Some(base));
        assert_eq!(sel.target().last_hit_at, Some(base));
        assert!(visuals.contains(&VisualKey::Preselect("cup".to_string())));
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut sel = cup();
        let mut visuals = RecordingVisualSink::default();
        assert_eq!(sel.hit_test(false, Instant::now(), true, &mut visuals), None);
        assert_eq!(sel.state(), SelectionState::Idle);
        assert!(visuals.is_empty());
    }

    #[test]
    fn test_continuous_hits_confirm_once_after_dwell() {
        let mut sel = cup();
        let mut visuals = RecordingVisualSink::default();
        let base = Instant::now();

        let mut events = Vec::new();
        for ms in (0..=1500).step_by(100) {
            let now = at(base, ms);
            if let Some(event) = sel.hit_test(true, now, false, &mut visuals) {
                events.push((ms, event));
            }
            if ms % 500 == 0 {
                sel.tick(now, &mut visuals);
            }
        }

        assert_eq!(
            events,
            vec![(
                1000,
                SelectionEvent {
                    target: "cup".to_string()
                }
            )]
        );
        assert!(sel.is_selected());
        assert!(visuals.contains(&VisualKey::Selected("cup".to_string())));
        assert!(!visuals.contains(&VisualKey::Preselect("cup".to_string())));
    }

    #[test]
    fn test_click_while_preselected_selects_immediately() {
        let mut sel = cup();
        let mut visuals = RecordingVisualSink::default();
        let base = Instant::now();

        sel.hit_test(true, base, false, &mut visuals);
        let event = sel.hit_test(true, at(base, 100), true, &mut visuals);
        assert_eq!(
            event,
            Some(SelectionEvent {
                target: "cup".to_string()
            })
        );
        assert!(sel.is_selected());
    }

    #[test]
    fn test_gap_cancels_preselection() {
        let mut sel = cup();
        let mut visuals = RecordingVisualSink::default();
        let base = Instant::now();

        sel.hit_test(true, base, false, &mut visuals);
        sel.hit_test(true, at(base, 300), false, &mut visuals);

        // 0.5 s after the last hit is not yet a gap
        sel.tick(at(base, 800), &mut visuals);
        assert_eq!(sel.state(), SelectionState::Preselected);

        sel.tick(at(base, 900), &mut visuals);
        assert_eq!(sel.state(), SelectionState::Idle);
        assert_eq!(sel.target().preselected_at, None);
        assert!(!visuals.contains(&VisualKey::Preselect("cup".to_string())));

        // Dwell restarts from the new preselection
        sel.hit_test(true, at(base, 1000), false, &mut visuals);
        assert_eq!(sel.hit_test(true, at(base, 1900), false, &mut visuals), None);
        assert!(sel.hit_test(true, at(base, 2000), false, &mut visuals).is_some());
    }

    #[test]
    fn test_selected_never_decays() {
        let mut sel = cup();
        let mut visuals = RecordingVisualSink::default();
        let base = Instant::now();

        sel.hit_test(true, base, false, &mut visuals);
        sel.hit_test(true, at(base, 50), true, &mut visuals);
        sel.tick(at(base, 60_000), &mut visuals);
        assert!(sel.is_selected());
        assert_eq!(sel.hit_test(true, at(base, 60_100), true, &mut visuals), None);
    }

    #[test]
    fn test_deselect_clears_everything() {
        let mut sel = cup();
        let mut visuals = RecordingVisualSink::default();
        let base = Instant::now();
        sel.show(&mut visuals);

        sel.hit_test(true, base, false, &mut visuals);
        sel.hit_test(true, at(base, 50), true, &mut visuals);
        sel.deselect(&mut visuals);

        assert_eq!(sel.state(), SelectionState::Idle);
        assert_eq!(sel.target().last_hit_at, None);
        assert!(!visuals.contains(&VisualKey::Selected("cup".to_string())));
        assert!(visuals.contains(&VisualKey::Target("cup".to_string())));

        // A fresh selection emits again
        sel.hit_test(true, at(base, 100), false, &mut visuals);
        assert!(sel.hit_test(true, at(base, 150), true, &mut visuals).is_some());
    }

    #[test]
    fn test_deselect_cancels_preselection() {
        let mut sel = cup();
        let mut visuals = RecordingVisualSink::default();
        let base = Instant::now();

        sel.hit_test(true, base, false, &mut visuals);
        assert!(visuals.contains(&VisualKey::Preselect("cup".to_string())));

        sel.deselect(&mut visuals);
        assert_eq!(sel.state(), SelectionState::Idle);
        assert_eq!(sel.target().preselected_at, None);
        assert!(!visuals.contains(&VisualKey::Preselect("cup".to_string())));

        // Dwell restarts from the next hit
        sel.hit_test(true, at(base, 900), false, &mut visuals);
        assert_eq!(sel.hit_test(true, at(base, 1100), false, &mut visuals), None);
        assert!(sel.hit_test(true, at(base, 1900), false, &mut visuals).is_some());
    }

    #[test]
    fn test_move_redraws_halo() {
        let mut sel = cup();
        let mut visuals = RecordingVisualSink::default();
        sel.show(&mut visuals);
        sel.hit_test(true, Instant::now(), false, &mut visuals);

        sel.set_position(Point::new(10.0, 20.0), &mut visuals);
        assert_eq!(
            visuals.get(&VisualKey::Preselect("cup".to_string())),
            Some(&Shape::disc(Point::new(10.0, 20.0), HALO_DIAMETER, Tint::Gray))
        );

        sel.remove(&mut visuals);
        assert!(visuals.is_empty());
    }
}
