//! On-screen touch controls
//!
//! Turns the per-tick touch snapshot into named 2-axis signals:
//! - Anchors a control to a screen corner and derives its touch zone
//! - Captures the first unclaimed touch beginning inside the zone
//! - Tracks the captured touch by identity until it ends or disappears
//! - Applies per-variant kinematics to produce the axis vector
//!
//! # Architecture
//!
//! ```text
//! TouchSnapshot → ControlSet ── ClaimSet (one owner per touch)
//!                     ↓
//!              Control variants
//!         (stick / touchpad / throwable)
//!                     ↓
//!          axis values + notifications
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut controls = ControlSet::new();
//! controls.add_control(Box::new(StickControl::new("left_stick")));
//! controls.enable_all(&camera)?;
//!
//! // Each simulation tick
//! controls.tick(&snapshot, &camera);
//! let x = controls.axis("Horizontal")?;
//! ```

mod anchor;
mod base;
mod capture;
mod error;
mod events;
mod stick;
mod throwable;
mod touchpad;
mod zone;

// Re-export public API
pub use anchor::Anchor;
pub use base::{AXIS_NAME_HORIZONTAL, AXIS_NAME_VERTICAL, ControlCore};
pub use capture::{CaptureState, ClaimSet};
pub use error::ControlError;
pub use events::{ControlEvent, ControlObserver, Observers};
pub use stick::{StickControl, StickVisuals};
pub use throwable::ThrowableTouchpad;
pub use touchpad::TouchpadControl;
pub use zone::{Rect, ZoneLayout, compute_zone};

use std::any::Any;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::camera::Projection;
use crate::input::{TouchId, TouchSnapshot};

/// The control variants sharing the capture state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Stick,
    Touchpad,
    ThrowableTouchpad,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Stick => write!(f, "stick"),
            ControlKind::Touchpad => write!(f, "touchpad"),
            ControlKind::ThrowableTouchpad => write!(f, "throwable_touchpad"),
        }
    }
}

/// Trait all touch controls implement
///
/// Controls are plain values driven by a host-owned [`ControlSet`]; there is
/// no engine base class. Lifecycle: `on_enable` once a projection exists,
/// `on_tick` every simulation tick, `on_disable` to deactivate.
pub trait Control {
    /// Name of this control for lookup and logging
    fn name(&self) -> &str;

    /// Which variant this control is
    fn kind(&self) -> ControlKind;

    /// Activates the control; fails if a required sub-part is missing
    fn on_enable(&mut self, projection: &dyn Projection) -> Result<(), ControlError>;

    /// Deactivates the control and zeroes its output immediately
    ///
    /// An owned touch is not force-released; its identity stays claimed
    /// until the touch naturally ends.
    fn on_disable(&mut self);

    /// Advances the control by one tick against this frame's snapshot
    fn on_tick(
        &mut self,
        snapshot: &TouchSnapshot,
        projection: &dyn Projection,
        claims: &mut ClaimSet,
    );

    fn is_enabled(&self) -> bool;

    /// Whether the control currently owns a touch
    fn is_tweaking(&self) -> bool;

    /// Identity of the owned touch, if any
    fn captured_touch(&self) -> Option<TouchId>;

    /// Looks up one axis component by configured name
    fn axis(&self, name: &str) -> Result<f32, ControlError>;

    /// Current axis vector
    fn axis_values(&self) -> Vec2;

    /// Registers an observer for lifecycle notifications
    fn add_observer(&mut self, observer: Box<dyn ControlObserver>);

    /// Drops the cached zone layout, forcing a recompute on next use
    fn invalidate_zone(&mut self);

    /// The cached zone layout, if computed since the last invalidation
    fn cached_zone(&self) -> Option<ZoneLayout>;

    /// Allows downcasting to concrete types for variant-specific access
    fn as_any(&self) -> &dyn Any;

    /// Mutable version of as_any for variant-specific access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Host-owned scheduler for a group of controls
///
/// Ticks every control against one shared snapshot per frame. Before any
/// control runs, the claim set is seeded with every touch identity already
/// owned, so one touch never drives two controls and overlap conflicts
/// resolve deterministically in registration order.
pub struct ControlSet {
    controls: Vec<Box<dyn Control>>,
    claims: ClaimSet,
    tick_count: u64,
}

impl ControlSet {
    pub fn new() -> Self {
        Self {
            controls: Vec::new(),
            claims: ClaimSet::new(),
            tick_count: 0,
        }
    }

    /// Registers a control; tick order follows registration order
    pub fn add_control(&mut self, control: Box<dyn Control>) {
        info!(control = %control.name(), kind = %control.kind(), "control registered");
        self.controls.push(control);
    }

    /// Enables every registered control
    pub fn enable_all(&mut self, projection: &dyn Projection) -> Result<(), ControlError> {
        for control in &mut self.controls {
            control.on_enable(projection)?;
        }
        Ok(())
    }

    /// Advances all controls by one tick
    ///
    /// The snapshot is read-only for the whole tick so every control
    /// observes the same touch phases.
    pub fn tick(&mut self, snapshot: &TouchSnapshot, projection: &dyn Projection) {
        self.claims.clear();
        for control in &self.controls {
            if let Some(id) = control.captured_touch() {
                self.claims.claim(id);
            }
        }

        for control in &mut self.controls {
            control.on_tick(snapshot, projection, &mut self.claims);
        }

        self.tick_count += 1;
    }

    /// Looks up a named axis across the whole set
    ///
    /// The first control configured with the name answers; its output is
    /// zero whenever it is idle or disabled.
    pub fn axis(&self, name: &str) -> Result<f32, ControlError> {
        for control in &self.controls {
            if let Ok(value) = control.axis(name) {
                return Ok(value);
            }
        }
        Err(ControlError::AxisNotConfigured { axis: name.into() })
    }

    /// Drops every cached zone layout, e.g. after a viewport or camera
    /// change
    pub fn invalidate_layout(&mut self) {
        for control in &mut self.controls {
            control.invalidate_zone();
        }
    }

    /// Gets a reference to a control by name
    pub fn get_control(&self, name: &str) -> Option<&dyn Control> {
        self.controls
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Gets a mutable reference to a control by name
    pub fn get_control_mut(&mut self, name: &str) -> Option<&mut (dyn Control + '_)> {
        if let Some(boxed) = self.controls.iter_mut().find(|c| c.name() == name) {
            Some(boxed.as_mut())
        } else {
            None
        }
    }

    /// Gets a typed reference to a control
    ///
    /// # Example
    /// ```ignore
    /// if let Some(stick) = controls.get_control_typed::<StickControl>("left_stick") {
    ///     // Use stick-specific methods
    /// }
    /// ```
    pub fn get_control_typed<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get_control(name)
            .and_then(|c| c.as_any().downcast_ref::<T>())
    }

    /// Gets a mutable typed reference to a control
    pub fn get_control_typed_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_control_mut(name)
            .and_then(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// All registered controls in tick order
    pub fn controls(&self) -> &[Box<dyn Control>] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Number of ticks processed so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for ControlSet {
    fn default() -> Self {
        Self::new()
    }
}
