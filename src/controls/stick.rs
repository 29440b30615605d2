//! Virtual joystick control

use std::any::Any;

use glam::Vec2;
use tracing::debug;

use crate::camera::Projection;
use crate::input::{Touch, TouchId, TouchSnapshot};

use super::base::{ControlCore, Track};
use super::capture::ClaimSet;
use super::error::ControlError;
use super::events::ControlObserver;
use super::zone::ZoneLayout;
use super::{Control, ControlKind};

/// World positions of the stick and base sub-entities
///
/// The control drives these; the host's renderer reads them. Attach them
/// before enabling the control.
#[derive(Debug, Clone, Copy, Default)]
pub struct StickVisuals {
    /// Base sprite position
    pub base: Vec2,
    /// Knob sprite position, clamped to the drag radius around the base
    pub stick: Vec2,
    /// Whether both sprites should currently be drawn
    pub visible: bool,
}

/// A corner-anchored virtual joystick
///
/// While tweaked, the axis vector is the displacement of the finger from the
/// stick base: raw inside the drag radius, normalized direction once the
/// finger passes it. The knob visual saturates at the radius boundary.
pub struct StickControl {
    core: ControlCore,
    drag_radius: f32,
    snap_to_finger: bool,
    hide_when_idle: bool,
    visuals: Option<StickVisuals>,
}

impl StickControl {
    /// Creates a stick with the stock feel: drag radius 1.5, base snapping
    /// on, always visible
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: ControlCore::new(name),
            drag_radius: 1.5,
            snap_to_finger: true,
            hide_when_idle: false,
            visuals: None,
        }
    }

    /// Builder method to set the drag radius in world units
    pub fn with_drag_radius(mut self, radius: f32) -> Self {
        self.drag_radius = radius;
        self
    }

    /// Builder method to set whether the base relocates under the finger at
    /// capture time, eliminating the stick jump
    pub fn with_snap_to_finger(mut self, snap: bool) -> Self {
        self.snap_to_finger = snap;
        self
    }

    /// Builder method to set whether the visuals are hidden while idle
    pub fn with_hide_when_idle(mut self, hide: bool) -> Self {
        self.hide_when_idle = hide;
        self
    }

    pub fn drag_radius(&self) -> f32 {
        self.drag_radius
    }

    pub fn snap_to_finger(&self) -> bool {
        self.snap_to_finger
    }

    pub fn hide_when_idle(&self) -> bool {
        self.hide_when_idle
    }

    /// Wires the stick and base sub-entities
    ///
    /// Enabling a stick without visuals fails with
    /// [`ControlError::AssetMissing`].
    pub fn attach_visuals(&mut self, visuals: StickVisuals) {
        self.visuals = Some(visuals);
    }

    /// Current visual state, if visuals were attached
    pub fn visuals(&self) -> Option<&StickVisuals> {
        self.visuals.as_ref()
    }

    pub fn core(&self) -> &ControlCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ControlCore {
        &mut self.core
    }

    /// Joystick kinematics for one tweaking tick
    fn tweak(&mut self, world: Vec2) {
        let Some(visuals) = self.visuals.as_mut() else {
            return;
        };

        let d = world - visuals.base;

        let axis = if d.length_squared() > self.drag_radius * self.drag_radius {
            // Past the drag range: the knob pins to the rim and the axis
            // saturates to the unit direction
            let direction = d.normalize();
            visuals.stick = visuals.base + direction * self.drag_radius;
            direction
        } else {
            // Inside the drag range the knob rides the finger and the axis
            // scales linearly with displacement
            visuals.stick = world;
            d
        };

        self.core.set_axis(axis);
        self.core.notify_moved(axis);
    }

    /// Places the base at capture time
    fn place_under_finger(&mut self, touch: &Touch, projection: &dyn Projection) {
        let world = projection.screen_to_world(touch.position);
        if let Some(visuals) = self.visuals.as_mut() {
            if self.snap_to_finger {
                visuals.base = world;
            }
            if self.hide_when_idle {
                visuals.visible = true;
            }
        }
    }

    /// Returns the visuals to the control's resting position
    fn reset_visuals(&mut self) {
        let home = self
            .core
            .cached_zone()
            .map(|layout| layout.world_position)
            .unwrap_or(Vec2::ZERO);
        let visible = !self.hide_when_idle && self.core.is_enabled();

        if let Some(visuals) = self.visuals.as_mut() {
            visuals.base = home;
            visuals.stick = home;
            visuals.visible = visible;
        }
    }
}

impl Control for StickControl {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn kind(&self) -> ControlKind {
        ControlKind::Stick
    }

    fn on_enable(&mut self, projection: &dyn Projection) -> Result<(), ControlError> {
        if self.visuals.is_none() {
            return Err(ControlError::AssetMissing {
                control: self.core.name().to_string(),
                part: "Stick/Base".to_string(),
            });
        }

        self.core.enable();
        self.core.zone_layout(projection);
        self.reset_visuals();
        debug!(control = %self.core.name(), "stick enabled");
        Ok(())
    }

    fn on_disable(&mut self) {
        self.core.disable();
        self.reset_visuals();
    }

    fn on_tick(
        &mut self,
        snapshot: &TouchSnapshot,
        projection: &dyn Projection,
        claims: &mut ClaimSet,
    ) {
        if !self.core.is_enabled() {
            if self.core.tick_disabled(snapshot) {
                self.reset_visuals();
            }
            return;
        }

        match self.core.track(snapshot) {
            Track::Held(touch) => {
                self.tweak(projection.screen_to_world(touch.position));
                return;
            }
            Track::Released => {
                self.core.zero_axis();
                self.core.notify_lifted();
                self.reset_visuals();
                // A just-released control may scan again this tick
            }
            Track::Idle => {}
        }

        if let Some(touch) = self.core.scan(snapshot, projection, claims) {
            self.place_under_finger(&touch, projection);
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
    use crate::input::{TouchOrigin, TouchPhase};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    /// 16x12 world units over an 800x600 viewport: 50 px per world unit,
    /// screen center at world origin
    fn camera() -> OrthographicCamera {
        OrthographicCamera::centered(16.0, 12.0, VIEWPORT)
    }

    /// Screen position for a world point under the test camera
    fn screen(world: Vec2) -> Vec2 {
        Vec2::new(400.0 + world.x * 50.0, 300.0 - world.y * 50.0)
    }

    fn touch_at(id: u64, world: Vec2, phase: TouchPhase) -> crate::input::Touch {
        crate::input::Touch {
            id: TouchId(id),
            position: screen(world),
            phase,
            origin: TouchOrigin::Native,
        }
    }

    /// A stick centered on the world origin so kinematics are easy to read
    fn centered_stick() -> StickControl {
        let mut stick = StickControl::new("stick");
        stick.core_mut().set_margin(Vec2::new(8.0, 6.0));
        stick.core_mut().set_touch_zone_size(Vec2::new(6.0, 6.0));
        stick.attach_visuals(StickVisuals::default());
        stick.on_enable(&camera()).unwrap();
        stick
    }

    fn tick(stick: &mut StickControl, touches: Vec<crate::input::Touch>) {
        let snapshot = TouchSnapshot::from_touches(touches);
        let mut claims = ClaimSet::new();
        if let Some(id) = stick.captured_touch() {
            claims.claim(id);
        }
        stick.on_tick(&snapshot, &camera(), &mut claims);
    }

    #[test]
    fn test_enable_without_visuals_fails() {
        let mut stick = StickControl::new("stick");
        let err = stick.on_enable(&camera()).unwrap_err();
        assert!(matches!(err, ControlError::AssetMissing { .. }));
        assert!(!stick.is_enabled());
    }

    #[test]
    fn test_axis_saturates_past_drag_radius() {
        let mut stick = centered_stick();

        // Capture at the origin, then pull 3 world units right with a
        // radius of 1.5
        tick(&mut stick, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        assert!(stick.is_tweaking());
        assert_eq!(stick.axis_values(), Vec2::ZERO);

        tick(
            &mut stick,
            vec![touch_at(1, Vec2::new(3.0, 0.0), TouchPhase::Moved)],
        );

        let axis = stick.axis_values();
        assert!((axis.x - 1.0).abs() < 0.001);
        assert!(axis.y.abs() < 0.001);

        // Knob clamps to the rim
        let visuals = stick.visuals().unwrap();
        assert!((visuals.stick.x - (visuals.base.x + 1.5)).abs() < 0.001);
    }

    #[test]
    fn test_axis_is_raw_inside_drag_radius() {
        let mut stick = centered_stick();

        tick(&mut stick, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        tick(
            &mut stick,
            vec![touch_at(1, Vec2::new(1.0, 0.0), TouchPhase::Moved)],
        );

        let axis = stick.axis_values();
        assert!((axis.x - 1.0).abs() < 0.001);

        // Knob rides the finger
        let visuals = stick.visuals().unwrap();
        assert!((visuals.stick.x - (visuals.base.x + 1.0)).abs() < 0.001);
    }

    #[test]
    fn test_release_resets_axis_and_visuals() {
        let mut stick = centered_stick();

        tick(&mut stick, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        tick(
            &mut stick,
            vec![touch_at(1, Vec2::new(1.0, 0.5), TouchPhase::Moved)],
        );
        tick(
            &mut stick,
            vec![touch_at(1, Vec2::new(1.0, 0.5), TouchPhase::Ended)],
        );

        assert!(!stick.is_tweaking());
        assert_eq!(stick.axis_values(), Vec2::ZERO);

        let visuals = stick.visuals().unwrap();
        assert_eq!(visuals.base, visuals.stick);
    }

    #[test]
    fn test_vanished_touch_counts_as_release() {
        let mut stick = centered_stick();

        tick(&mut stick, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        assert!(stick.is_tweaking());

        // No Ended event, the touch is just gone
        tick(&mut stick, vec![]);
        assert!(!stick.is_tweaking());
        assert_eq!(stick.axis_values(), Vec2::ZERO);
    }

    #[test]
    fn test_snap_to_finger_places_base_at_capture() {
        let mut stick = centered_stick();

        let world = Vec2::new(1.0, -1.0);
        tick(&mut stick, vec![touch_at(1, world, TouchPhase::Began)]);

        let visuals = stick.visuals().unwrap();
        assert!((visuals.base - world).length() < 0.001);
    }

    #[test]
    fn test_no_snap_keeps_base_home() {
        let mut stick = StickControl::new("stick").with_snap_to_finger(false);
        stick.core_mut().set_margin(Vec2::new(8.0, 6.0));
        stick.attach_visuals(StickVisuals::default());
        stick.on_enable(&camera()).unwrap();

        tick(
            &mut stick,
            vec![touch_at(1, Vec2::new(1.0, 0.0), TouchPhase::Began)],
        );

        let visuals = stick.visuals().unwrap();
        assert_eq!(visuals.base, Vec2::ZERO);
    }

    #[test]
    fn test_hide_when_idle_toggles_with_tweaking() {
        let mut stick = StickControl::new("stick").with_hide_when_idle(true);
        stick.core_mut().set_margin(Vec2::new(8.0, 6.0));
        stick.attach_visuals(StickVisuals::default());
        stick.on_enable(&camera()).unwrap();
        assert!(!stick.visuals().unwrap().visible);

        tick(&mut stick, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        assert!(stick.visuals().unwrap().visible);

        tick(&mut stick, vec![touch_at(1, Vec2::ZERO, TouchPhase::Ended)]);
        assert!(!stick.visuals().unwrap().visible);
    }

    #[test]
    fn test_began_outside_zone_is_ignored() {
        let mut stick = centered_stick();

        // Zone is 6x6 around the origin; world (5, 0) is outside
        tick(
            &mut stick,
            vec![touch_at(1, Vec2::new(5.0, 0.0), TouchPhase::Began)],
        );
        assert!(!stick.is_tweaking());
        assert_eq!(stick.axis_values(), Vec2::ZERO);
    }

    #[test]
    fn test_disable_mid_drag_zeroes_output_and_keeps_claim() {
        let mut stick = centered_stick();

        tick(&mut stick, vec![touch_at(1, Vec2::ZERO, TouchPhase::Began)]);
        tick(
            &mut stick,
            vec![touch_at(1, Vec2::new(1.0, 0.0), TouchPhase::Moved)],
        );
        assert!(stick.axis_values().x > 0.5);

        stick.on_disable();
        assert_eq!(stick.axis_values(), Vec2::ZERO);
        assert_eq!(stick.captured_touch(), Some(TouchId(1)));

        // Still held: the claim survives while disabled
        tick(
            &mut stick,
            vec![touch_at(1, Vec2::new(1.0, 0.0), TouchPhase::Moved)],
        );
        assert_eq!(stick.captured_touch(), Some(TouchId(1)));
        assert_eq!(stick.axis_values(), Vec2::ZERO);

        // Natural end finally releases it
        tick(
            &mut stick,
            vec![touch_at(1, Vec2::new(1.0, 0.0), TouchPhase::Ended)],
        );
        assert_eq!(stick.captured_touch(), None);
    }
}
