//! Shared control state machine
//!
//! Every control variant composes a [`ControlCore`]: common configuration,
//! capture bookkeeping, the cached zone layout, axis storage and the
//! observer list. Variants supply only their kinematics on top.

use glam::Vec2;
use tracing::debug;

use crate::camera::Projection;
use crate::input::{Touch, TouchId, TouchPhase, TouchSnapshot};

use super::anchor::Anchor;
use super::capture::{CaptureState, ClaimSet, try_capture};
use super::error::ControlError;
use super::events::{ControlEvent, ControlObserver, Observers};
use super::zone::{ZoneLayout, compute_zone};

/// Default name for the horizontal axis
pub const AXIS_NAME_HORIZONTAL: &str = "Horizontal";
/// Default name for the vertical axis
pub const AXIS_NAME_VERTICAL: &str = "Vertical";

/// What the shared state machine observed for the owned touch this tick
#[derive(Debug, Clone, Copy)]
pub(crate) enum Track {
    /// Not tweaking; the control may scan for a capture
    Idle,
    /// The owned touch is still down; kinematics should run
    Held(Touch),
    /// The owned touch ended or disappeared and has been released
    Released,
}

/// State and configuration common to all control variants
pub struct ControlCore {
    name: String,
    anchor: Anchor,
    axis_name_x: String,
    axis_name_y: String,
    touch_zone_size: Vec2,
    margin: Vec2,
    zone: Option<ZoneLayout>,
    capture: CaptureState,
    axis: Vec2,
    enabled: bool,
    observers: Observers,
}

impl ControlCore {
    /// Creates a core with the stock layout: left-bottom corner, 6x6 zone,
    /// 3x3 margin, Horizontal/Vertical axis names
    ///
    /// Controls start disabled; the host enables them once a projection is
    /// available.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anchor: Anchor::default(),
            axis_name_x: AXIS_NAME_HORIZONTAL.to_string(),
            axis_name_y: AXIS_NAME_VERTICAL.to_string(),
            touch_zone_size: Vec2::new(6.0, 6.0),
            margin: Vec2::new(3.0, 3.0),
            zone: None,
            capture: CaptureState::default(),
            axis: Vec2::ZERO,
            enabled: false,
            observers: Observers::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
        self.invalidate_zone();
    }

    pub fn margin(&self) -> Vec2 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: Vec2) {
        self.margin = margin;
        self.invalidate_zone();
    }

    pub fn touch_zone_size(&self) -> Vec2 {
        self.touch_zone_size
    }

    pub fn set_touch_zone_size(&mut self, size: Vec2) {
        self.touch_zone_size = size;
        self.invalidate_zone();
    }

    pub fn axis_names(&self) -> (&str, &str) {
        (&self.axis_name_x, &self.axis_name_y)
    }

    pub fn set_axis_names(&mut self, x: impl Into<String>, y: impl Into<String>) {
        self.axis_name_x = x.into();
        self.axis_name_y = y.into();
    }

    /// Drops the cached zone layout; the next use recomputes it
    ///
    /// Called by the geometry setters and by the host when the camera or
    /// viewport changes.
    pub fn invalidate_zone(&mut self) {
        self.zone = None;
    }

    /// Zone layout, computed on first use after invalidation
    pub fn zone_layout(&mut self, projection: &dyn Projection) -> ZoneLayout {
        match self.zone {
            Some(layout) => layout,
            None => {
                let layout = compute_zone(
                    self.anchor,
                    self.margin,
                    self.touch_zone_size,
                    projection.view_center(),
                    projection.half_extents(),
                );
                debug!(control = %self.name, position = ?layout.world_position, "zone recalculated");
                self.zone = Some(layout);
                layout
            }
        }
    }

    /// The cached layout, if it has been computed since the last invalidation
    pub fn cached_zone(&self) -> Option<ZoneLayout> {
        self.zone
    }

    /// Looks up the queried axis by configured name
    pub fn axis(&self, name: &str) -> Result<f32, ControlError> {
        if self.axis_name_x.is_empty() || self.axis_name_y.is_empty() {
            return Err(ControlError::AxisNotConfigured { axis: name.into() });
        }

        if name == self.axis_name_x {
            return Ok(self.axis.x);
        }
        if name == self.axis_name_y {
            return Ok(self.axis.y);
        }

        Err(ControlError::AxisNotConfigured { axis: name.into() })
    }

    /// Current axis vector
    pub fn axis_values(&self) -> Vec2 {
        self.axis
    }

    pub(crate) fn set_axis(&mut self, axis: Vec2) {
        self.axis = axis;
    }

    pub(crate) fn zero_axis(&mut self) {
        self.axis = Vec2::ZERO;
    }

    pub fn is_tweaking(&self) -> bool {
        self.capture.is_tweaking()
    }

    pub fn captured_touch(&self) -> Option<TouchId> {
        self.capture.captured()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Marks the control active; callers are expected to have verified any
    /// enable-time requirements first
    pub(crate) fn enable(&mut self) {
        self.enabled = true;
    }

    /// Deactivates the control and zeroes its output immediately
    ///
    /// An owned touch stays owned so its identity remains claimed until the
    /// touch naturally ends.
    pub(crate) fn disable(&mut self) {
        self.enabled = false;
        self.axis = Vec2::ZERO;
    }

    pub fn add_observer(&mut self, observer: Box<dyn ControlObserver>) {
        self.observers.add(observer);
    }

    pub(crate) fn notify_touched(&mut self) {
        self.observers.emit(ControlEvent::FingerTouched);
    }

    pub(crate) fn notify_lifted(&mut self) {
        self.observers.emit(ControlEvent::FingerLifted);
    }

    pub(crate) fn notify_moved(&mut self, value: Vec2) {
        self.observers.emit(ControlEvent::Moved(value));
    }

    /// Follows the owned touch through the snapshot
    ///
    /// A touch that is absent from the snapshot is released exactly like one
    /// that reports Ended; platforms drop touches without a final event
    /// often enough that absence has to mean release.
    pub(crate) fn track(&mut self, snapshot: &TouchSnapshot) -> Track {
        let Some(id) = self.capture.captured() else {
            return Track::Idle;
        };

        match snapshot.find(id) {
            Some(touch) if touch.phase != TouchPhase::Ended => Track::Held(*touch),
            _ => {
                self.capture.release();
                debug!(control = %self.name, ?id, "touch released");
                Track::Released
            }
        }
    }

    /// Scans for a new capture; on success the control is tweaking and the
    /// touched notification has fired
    pub(crate) fn scan(
        &mut self,
        snapshot: &TouchSnapshot,
        projection: &dyn Projection,
        claims: &mut ClaimSet,
    ) -> Option<Touch> {
        let zone = self.zone_layout(projection).world_rect;
        let touch = try_capture(snapshot, &zone, projection, claims)?;

        self.capture.capture(touch.id);
        debug!(control = %self.name, id = ?touch.id, "touch captured");
        self.notify_touched();
        Some(touch)
    }

    /// Tick for a disabled control: no scanning, no kinematics, but an owned
    /// touch is still followed until it naturally ends
    ///
    /// Returns true if the touch was released this tick.
    pub(crate) fn tick_disabled(&mut self, snapshot: &TouchSnapshot) -> bool {
        match self.track(snapshot) {
            Track::Released => {
                self.notify_lifted();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrthographicCamera;
    use crate::input::{TouchId, TouchOrigin};

    fn camera() -> OrthographicCamera {
        OrthographicCamera::centered(16.0, 12.0, Vec2::new(800.0, 600.0))
    }

    fn touch(id: u64, phase: TouchPhase) -> Touch {
        Touch {
            id: TouchId(id),
            position: Vec2::new(400.0, 300.0),
            phase,
            origin: TouchOrigin::Native,
        }
    }

    #[test]
    fn test_axis_lookup_by_name() {
        let mut core = ControlCore::new("test");
        core.set_axis(Vec2::new(0.25, -0.5));

        assert_eq!(core.axis("Horizontal").unwrap(), 0.25);
        assert_eq!(core.axis("Vertical").unwrap(), -0.5);
    }

    #[test]
    fn test_unmatched_axis_name_fails() {
        let core = ControlCore::new("test");
        let err = core.axis("Unconfigured").unwrap_err();
        assert!(matches!(err, ControlError::AxisNotConfigured { .. }));
    }

    #[test]
    fn test_empty_axis_names_fail_every_query() {
        let mut core = ControlCore::new("test");
        core.set_axis_names("", "");
        assert!(core.axis("Horizontal").is_err());
        assert!(core.axis("").is_err());
    }

    #[test]
    fn test_disable_zeroes_axis_but_keeps_capture() {
        let mut core = ControlCore::new("test");
        core.enable();
        core.set_axis(Vec2::new(1.0, 1.0));

        let mut claims = ClaimSet::new();
        let snapshot = TouchSnapshot::from_touches(vec![touch(1, TouchPhase::Began)]);
        // A margin equal to the half extents centers the zone on the
        // origin, under the touch at screen center
        core.set_margin(Vec2::new(8.0, 6.0));
        assert!(core.scan(&snapshot, &camera(), &mut claims).is_some());

        core.disable();
        assert_eq!(core.axis_values(), Vec2::ZERO);
        assert!(core.is_tweaking());
        assert_eq!(core.captured_touch(), Some(TouchId(1)));
    }

    #[test]
    fn test_track_releases_on_absence() {
        let mut core = ControlCore::new("test");
        core.enable();
        core.set_margin(Vec2::new(8.0, 6.0));

        let mut claims = ClaimSet::new();
        let snapshot = TouchSnapshot::from_touches(vec![touch(1, TouchPhase::Began)]);
        core.scan(&snapshot, &camera(), &mut claims).unwrap();

        // The touch simply disappears, no Ended phase
        let empty = TouchSnapshot::new();
        assert!(matches!(core.track(&empty), Track::Released));
        assert!(!core.is_tweaking());
    }

    #[test]
    fn test_track_releases_on_ended_phase() {
        let mut core = ControlCore::new("test");
        core.enable();
        core.set_margin(Vec2::new(8.0, 6.0));

        let mut claims = ClaimSet::new();
        let snapshot = TouchSnapshot::from_touches(vec![touch(1, TouchPhase::Began)]);
        core.scan(&snapshot, &camera(), &mut claims).unwrap();

        let snapshot = TouchSnapshot::from_touches(vec![touch(1, TouchPhase::Ended)]);
        assert!(matches!(core.track(&snapshot), Track::Released));
    }

    #[test]
    fn test_zone_cache_recomputes_only_after_invalidation() {
        let mut core = ControlCore::new("test");
        let mut camera = camera();

        let first = core.zone_layout(&camera);
        camera.zoom(2.0);
        // Still the cached layout
        let cached = core.zone_layout(&camera);
        assert_eq!(cached.world_position, first.world_position);

        core.invalidate_zone();
        let recomputed = core.zone_layout(&camera);
        assert_ne!(recomputed.world_position, first.world_position);
    }
}
