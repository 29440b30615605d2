//! Relative-motion touchpad control

use std::any::Any;

use glam::Vec2;
use tracing::debug;

use crate::camera::Projection;
use crate::input::{TouchId, TouchSnapshot};

use super::base::{ControlCore, Track};
use super::capture::ClaimSet;
use super::error::ControlError;
use super::events::ControlObserver;
use super::zone::ZoneLayout;
use super::{Control, ControlKind};

/// A corner-anchored touchpad emitting per-tick finger deltas
///
/// The first tick after capture only records the finger position, since
/// there is no delta yet. Subsequent ticks emit the world-space movement
/// since the previous tick, optionally normalized to unit length.
pub struct TouchpadControl {
    core: ControlCore,
    always_normalized: bool,
    previous_world: Option<Vec2>,
}

impl TouchpadControl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: ControlCore::new(name),
            always_normalized: false,
            previous_world: None,
        }
    }

    /// Builder method to normalize every emitted delta to unit length
    pub fn with_always_normalized(mut self, normalized: bool) -> Self {
        self.always_normalized = normalized;
        self
    }

    pub fn always_normalized(&self) -> bool {
        self.always_normalized
    }

    pub fn core(&self) -> &ControlCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ControlCore {
        &mut self.core
    }

    /// Touchpad kinematics for one tweaking tick
    fn tweak(&mut self, world: Vec2) {
        match self.previous_world {
            // First tick after capture: no delta to report yet
            None => self.previous_world = Some(world),
            Some(previous) => {
                let mut delta = world - previous;
                if self.always_normalized {
                    delta = delta.normalize_or_zero();
                }
                self.core.set_axis(delta);
                self.core.notify_moved(delta);
                self.previous_world = Some(world);
            }
        }
    }
}

impl Control for TouchpadControl {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn kind(&self) -> ControlKind {
        ControlKind::Touchpad
    }

    fn on_enable(&mut self, projection: &dyn Projection) -> Result<(), ControlError> {
        self.core.enable();
        self.core.zone_layout(projection);
        debug!(control = %self.core.name(), "touchpad enabled");
        Ok(())
    }

    fn on_disable(&mut self) {
        self.core.disable();
        self.previous_world = None;
    }

    fn on_tick(
        &mut self,
        snapshot: &TouchSnapshot,
        projection: &dyn Projection,
        claims: &mut ClaimSet,
    ) {
        if !self.core.is_enabled() {
            self.core.tick_disabled(snapshot);
            return;
        }

        match self.core.track(snapshot) {
            Track::Held(touch) => {
                self.tweak(projection.screen_to_world(touch.position));
                return;
            }
            Track::Released => {
                self.previous_world = None;
                self.core.zero_axis();
                self.core.notify_lifted();
            }
            Track::Idle => {}
        }

        if self.core.scan(snapshot, projection, claims).is_some() {
            self.previous_world = None;
        }
    }

    fn is_enabled(&self) -> bool {
        self.core.is_enabled()
    }

    fn is_tweaking(&self) -> bool {
        self.core.is_tweaking()
    }

    fn captured_touch(&self) -> Option<TouchId> {
        self.core.captured_touch()
    }

    fn axis(&self, name: &str) -> Result<f32, ControlError> {
        self.core.axis(name)
    }

    fn axis_values(&self) -> Vec2 {
        self.core.axis_values()
    }

    fn add_observer(&mut self, observer: Box<dyn ControlObserver>) {
        self.core.add_observer(observer);
    }

    fn invalidate_zone(&mut self) {
        self.core.invalidate_zone();
    }

    fn cached_zone(&self) -> Option<ZoneLayout> {
        self.core.cached_zone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrthographicCamera;
    use crate::input::{Touch, TouchOrigin, TouchPhase};

    fn camera() -> OrthographicCamera {
        OrthographicCamera::centered(16.0, 12.0, Vec2::new(800.0, 600.0))
    }

    fn screen(world: Vec2) -> Vec2 {
        Vec2::new(400.0 + world.x * 50.0, 300.0 - world.y * 50.0)
    }

    fn touch_at(id: u64, world: Vec2, phase: TouchPhase) -> Touch {
        Touch {
            id: TouchId(id),
            position: screen(world),
            phase,
            origin: TouchOrigin::Native,
        }
    }

    fn centered_pad(normalized: bool) -> TouchpadControl {
        let mut pad = TouchpadControl::new("pad").with_always_normalized(normalized);
        pad.core_mut().set_margin(Vec2::new(8.0, 6.0));
        pad.on_enable(&camera()).unwrap();
        pad
    }

    fn tick(pad: &mut TouchpadControl, touches: Vec<Touch>) {
        let snapshot = TouchSnapshot::from_touches(touches);
        let mut claims = ClaimSet::new();
        if let Some(id) = pad.captured_touch() {
            claims.claim(id);
        }
        pad.on_tick(&snapshot, &camera(), &mut claims);
    }

    #[test]
    fn test_first_tick_after_capture_reports_nothing() {
        let mut pad = centered_pad(false);

        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        assert!(pad.is_tweaking());
        assert_eq!(pad.axis_values(), Vec2::ZERO);

        // First held tick only records the position
        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Stationary)]);
        assert_eq!(pad.axis_values(), Vec2::ZERO);
    }

    #[test]
    fn test_delta_emitted_from_second_held_tick() {
        let mut pad = centered_pad(false);

        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Stationary)]);
        tick(
            &mut pad,
            vec![touch_at(1, Vec2::new(0.2, 0.0), TouchPhase::Moved)],
        );

        let axis = pad.axis_values();
        assert!((axis.x - 0.2).abs() < 0.001);
        assert!(axis.y.abs() < 0.001);
    }

    #[test]
    fn test_normalized_delta_has_unit_length() {
        let mut pad = centered_pad(true);

        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Stationary)]);
        tick(
            &mut pad,
            vec![touch_at(1, Vec2::new(0.2, 0.0), TouchPhase::Moved)],
        );

        let axis = pad.axis_values();
        assert!((axis.x - 1.0).abs() < 0.001);
        assert!(axis.y.abs() < 0.001);
    }

    #[test]
    fn test_normalized_zero_delta_stays_zero() {
        let mut pad = centered_pad(true);

        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Stationary)]);
        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Stationary)]);

        assert_eq!(pad.axis_values(), Vec2::ZERO);
    }

    #[test]
    fn test_release_zeroes_axis() {
        let mut pad = centered_pad(false);

        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Stationary)]);
        tick(
            &mut pad,
            vec![touch_at(1, Vec2::new(0.5, 0.5), TouchPhase::Moved)],
        );
        assert!(pad.axis_values().length_squared() > 0.0);

        tick(&mut pad, vec![]);
        assert!(!pad.is_tweaking());
        assert_eq!(pad.axis_values(), Vec2::ZERO);
    }

    #[test]
    fn test_recapture_starts_a_fresh_delta_baseline() {
        let mut pad = centered_pad(false);

        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        tick(
            &mut pad,
            vec![touch_at(1, Vec2::new(1.0, 0.0), TouchPhase::Moved)],
        );
        tick(&mut pad, vec![touch_at(1, Vec2::ZERO, TouchPhase::Ended)]);

        // New touch far from the old one: no delta on its first held tick
        tick(
            &mut pad,
            vec![touch_at(2, Vec2::new(-1.0, 0.0), TouchPhase::Began)],
        );
        tick(
            &mut pad,
            vec![touch_at(2, Vec2::new(-1.0, 0.0), TouchPhase::Stationary)],
        );
        assert_eq!(pad.axis_values(), Vec2::ZERO);
    }
}
