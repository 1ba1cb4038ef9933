//! Session wiring pointing sources, targets, the traced region and places

use std::time::Instant;

use super::messages::InputMsg;
use crate::config::{PolygonConfig, TrackingConfig};
use crate::domain::{
    CURSOR_DIAMETER, EdgeStyle, Modality, Point, SelectableTarget, SelectionEvent, Shape, SourceId,
    Tint, VisualKey,
};
use crate::error::{Error, Result};
use crate::place::Place;
use crate::pointing::PointingStabilizer;
use crate::polygon::{PolygonBuilder, PolygonStatus, PreviewStyle};
use crate::selection::{HitTestProvider, RadiusHitTest, TargetRegistry};
use crate::sink::visual::{draw, erase};
use crate::sink::{CalibrationProvider, EventSink, VisualSink};

/// Single authority over all mutable tracking state
pub struct Session<E: EventSink, V: VisualSink> {
    stabilizer: PointingStabilizer,
    registry: TargetRegistry,
    polygon_config: PolygonConfig,
    polygon: Option<PolygonBuilder>,
    places: Vec<Place>,
    calibration: Box<dyn CalibrationProvider>,
    hit_test: Box<dyn HitTestProvider>,
    events: E,
    visuals: V,
}

impl<E: EventSink, V: VisualSink> Session<E, V> {
    pub fn new(config: &TrackingConfig, events: E, visuals: V) -> Self {
        Self {
            stabilizer: PointingStabilizer::new(config.stabilizer.clone()),
            registry: TargetRegistry::new(config.selection.clone()),
            polygon_config: config.polygon.clone(),
            polygon: None,
            places: Vec::new(),
            calibration: Box::new(config.calibration.clone()),
            hit_test: Box::new(RadiusHitTest::new(config.selection.hit_radius)),
            events,
            visuals,
        }
    }

    /// Replace the default bounding-circle hit test
    pub fn with_hit_test(mut self, hit_test: impl HitTestProvider + 'static) -> Self {
        self.hit_test = Box::new(hit_test);
        self
    }

    /// Replace the calibration taken from the config
    pub fn with_calibration(mut self, calibration: impl CalibrationProvider + 'static) -> Self {
        self.calibration = Box::new(calibration);
        self
    }

    pub fn handle(&mut self, msg: InputMsg, now: Instant) -> Result<()> {
        if let Some(p) = msg.position() {
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(Error::InvalidGeometry(format!("non-finite position {:?}", p)));
            }
        }

        match msg {
            InputMsg::RegisterSource { id, modality } => {
                self.stabilizer.register(&id, modality)?;
            }
            InputMsg::UnregisterSource { id } => {
                self.stabilizer.unregister(&id)?;
                erase(&mut self.visuals, VisualKey::Cursor(id));
            }
            InputMsg::Pointer {
                source,
                x,
                y,
                click,
            } => {
                self.pointer(&source, Point::new(x, y), click, now)?;
            }
            InputMsg::AddTarget { id, kind, x, y } => {
                self.registry.insert(
                    SelectableTarget::new(id, kind, Point::new(x, y)),
                    &mut self.visuals,
                )?;
            }
            InputMsg::RemoveTarget { id } => {
                self.registry.remove(&id, &mut self.visuals)?;
            }
            InputMsg::MoveTarget { id, x, y } => {
                self.registry
                    .set_position(&id, Point::new(x, y), &mut self.visuals)?;
            }
            InputMsg::Deselect { id } => {
                self.registry.deselect(&id, &mut self.visuals)?;
            }
            InputMsg::DeselectAll => self.registry.deselect_all(&mut self.visuals),
            InputMsg::StartPolygon => {
                self.clear_polygon();
                self.polygon = Some(PolygonBuilder::new(&self.polygon_config));
            }
            InputMsg::PolygonCursor { x, y } => self.polygon_cursor(Point::new(x, y)),
            InputMsg::PolygonClick { x, y } => self.polygon_click(Point::new(x, y)),
            InputMsg::ResetPolygon => self.clear_polygon(),
            InputMsg::AddPlace { x, y } => {
                let place = Place::create(
                    self.places.len(),
                    Point::new(x, y),
                    self.calibration.as_ref(),
                    &mut self.visuals,
                    &mut self.events,
                );
                self.places.push(place);
            }
            InputMsg::ClearPlaces => {
                for place in self.places.drain(..) {
                    place.remove(&mut self.visuals);
                }
            }
        }
        Ok(())
    }

    /// Stabilizer cadence: re-evaluate sources and sweep targets with every stable position
    pub fn fast_tick(&mut self, now: Instant) -> Vec<SelectionEvent> {
        let ids: Vec<SourceId> = self.stabilizer.sources().map(|s| s.id.clone()).collect();
        let mut pointers = Vec::new();

        for id in ids {
            let was_active = self.stabilizer.is_active(&id).unwrap_or(false);
            match self.stabilizer.tick(&id, now) {
                Ok(true) => {
                    if let Ok(Some(pos)) = self.stabilizer.stable_position(&id) {
                        pointers.push(pos);
                    }
                }
                Ok(false) if was_active => erase(&mut self.visuals, VisualKey::Cursor(id)),
                Ok(false) => {}
                Err(err) => log::warn!("tick of {} failed: {}", id, err),
            }
        }

        let mut confirmed = Vec::new();
        for pointer in pointers {
            confirmed.extend(self.registry.sweep(
                pointer,
                now,
                false,
                self.hit_test.as_ref(),
                &mut self.visuals,
                &mut self.events,
            ));
        }
        confirmed
    }

    /// Selection cadence: decay stale preselections
    pub fn slow_tick(&mut self, now: Instant) {
        self.registry.tick(now, &mut self.visuals);
    }

    pub fn stabilizer(&self) -> &PointingStabilizer {
        &self.stabilizer
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn polygon(&self) -> Option<&PolygonBuilder> {
        self.polygon.as_ref()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    fn pointer(&mut self, source: &str, pos: Point, click: bool, now: Instant) -> Result<()> {
        self.stabilizer.observe(source, pos, now, click)?;
        draw(
            &mut self.visuals,
            VisualKey::Cursor(source.to_string()),
            Shape::disc(pos, CURSOR_DIAMETER, Tint::Blue),
        );

        let discrete = self.stabilizer.source(source)?.modality == Modality::Discrete;
        if click && discrete {
            self.registry.sweep(
                pos,
                now,
                true,
                self.hit_test.as_ref(),
                &mut self.visuals,
                &mut self.events,
            );
        }
        Ok(())
    }

    fn polygon_cursor(&mut self, cursor: Point) {
        let Some(preview) = self.polygon.as_ref().and_then(|p| p.preview_edge(cursor)) else {
            erase(&mut self.visuals, VisualKey::PolygonPreview);
            return;
        };
        let style = match preview.style {
            PreviewStyle::Open => EdgeStyle::Dotted,
            PreviewStyle::Closing => EdgeStyle::Solid,
        };
        draw(
            &mut self.visuals,
            VisualKey::PolygonPreview,
            Shape::segment(preview.from, preview.to, style),
        );
    }

    fn polygon_click(&mut self, pt: Point) {
        let polygon = self
            .polygon
            .get_or_insert_with(|| PolygonBuilder::new(&self.polygon_config));
        if polygon.is_closed() {
            log::debug!("polygon: already closed, ignoring click");
            return;
        }

        let status = polygon.add_point(pt);
        for (index, (from, to)) in polygon.edges().into_iter().enumerate() {
            draw(
                &mut self.visuals,
                VisualKey::PolygonEdge(index),
                Shape::segment(from, to, EdgeStyle::Solid),
            );
        }

        if status == PolygonStatus::Closed {
            erase(&mut self.visuals, VisualKey::PolygonPreview);
            let points = polygon
                .world_vertices(self.calibration.as_ref())
                .unwrap_or_default();
            if let Err(err) = self.events.publish_polygon(&points) {
                log::warn!("Failed to publish polygon: {}", err);
            }
        }
    }

    fn clear_polygon(&mut self) {
        if let Some(polygon) = self.polygon.take() {
            for index in 0..polygon.edges().len() {
                erase(&mut self.visuals, VisualKey::PolygonEdge(index));
            }
        }
        erase(&mut self.visuals, VisualKey::PolygonPreview);
    }
}
