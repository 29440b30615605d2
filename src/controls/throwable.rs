//! Touchpad with throw inertia

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

/// Squared axis magnitude below which a decaying throw snaps to zero
const THROW_EPSILON_SQUARED: f32 = 0.001;

/// A touchpad that keeps moving after release
///
/// Tracks deltas like [`super::TouchpadControl`] while tweaked, but release
/// does not zero the axis. Instead the last value decays geometrically each
/// idle tick, still emitting moved notifications, until its squared
/// magnitude drops to the snap threshold. This is the one control whose axis
/// can be non-zero while idle.
pub struct ThrowableTouchpad {
    core: ControlCore,
    always_normalized: bool,
    speed_decay: f32,
    previous_world: Option<Vec2>,
}

impl ThrowableTouchpad {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: ControlCore::new(name),
            always_normalized: false,
            speed_decay: 0.9,
            previous_world: None,
        }
    }

    /// Builder method to normalize every emitted delta to unit length
    pub fn with_always_normalized(mut self, normalized: bool) -> Self {
        self.always_normalized = normalized;
        self
    }

    /// Builder method to set the per-tick decay factor, in (0, 1)
    pub fn with_speed_decay(mut self, decay: f32) -> Self {
        self.speed_decay = decay;
        self
    }

    pub fn always_normalized(&self) -> bool {
        self.always_normalized
    }

    pub fn speed_decay(&self) -> f32 {
        self.speed_decay
    }

    pub fn core(&self) -> &ControlCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ControlCore {
        &mut self.core
    }

    fn tweak(&mut self, world: Vec2) {
        match self.previous_world {
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

    /// One idle tick of throw decay
    fn decay(&mut self) {
        let axis = self.core.axis_values();
        if axis.length_squared() <= THROW_EPSILON_SQUARED {
            // Close enough: snap to exactly zero so the throw terminates
            self.core.zero_axis();
            return;
        }

        let decayed = axis * self.speed_decay;
        self.core.set_axis(decayed);
        self.core.notify_moved(decayed);
    }
}

impl Control for ThrowableTouchpad {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn kind(&self) -> ControlKind {
        ControlKind::ThrowableTouchpad
    }

    fn on_enable(&mut self, projection: &dyn Projection) -> Result<(), ControlError> {
        self.core.enable();
        self.core.zone_layout(projection);
        debug!(control = %self.core.name(), "throwable touchpad enabled");
        Ok(())
    }

    fn on_disable(&mut self) {
        // Zeroing the axis also ends any in-flight throw
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
                // The throw: the last axis value survives the release
                self.previous_world = None;
                self.core.notify_lifted();
            }
            Track::Idle => {}
        }

        if self.core.scan(snapshot, projection, claims).is_some() {
            self.previous_world = None;
            return;
        }

        self.decay();
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
