//! Touch capture and claim tracking

use crate::camera::Projection;
use crate::input::{Touch, TouchId, TouchPhase, TouchSnapshot};

use super::zone::Rect;

/// Per-tick set of touch identities already owned by a control
///
/// The scheduler seeds it with every identity a tweaking control holds
/// before any control ticks, then controls add newly captured identities as
/// they scan. A touch therefore belongs to at most one control across the
/// whole control set, and overlap conflicts resolve deterministically in
/// tick order.
#[derive(Debug, Clone, Default)]
pub struct ClaimSet {
    claimed: Vec<TouchId>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the identity is already owned this tick
    pub fn is_claimed(&self, id: TouchId) -> bool {
        self.claimed.contains(&id)
    }

    /// Claims an identity; returns false if it was already taken
    pub fn claim(&mut self, id: TouchId) -> bool {
        if self.is_claimed(id) {
            return false;
        }
        self.claimed.push(id);
        true
    }

    /// Forget all claims at the start of a tick
    pub fn clear(&mut self) {
        self.claimed.clear();
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// Capture bookkeeping shared by every control variant
///
/// A control is tweaking exactly while it owns a touch identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureState {
    captured: Option<TouchId>,
}

impl CaptureState {
    pub fn is_tweaking(&self) -> bool {
        self.captured.is_some()
    }

    pub fn captured(&self) -> Option<TouchId> {
        self.captured
    }

    pub(crate) fn capture(&mut self, id: TouchId) {
        self.captured = Some(id);
    }

    pub(crate) fn release(&mut self) -> Option<TouchId> {
        self.captured.take()
    }
}

/// Scans unclaimed touches in snapshot order and claims the first one
/// beginning inside `zone`
///
/// Containment is tested in world space, edges inclusive. Returns the
/// captured touch, already added to the claim set.
pub(crate) fn try_capture(
    snapshot: &TouchSnapshot,
    zone: &Rect,
    projection: &dyn Projection,
    claims: &mut ClaimSet,
) -> Option<Touch> {
    for touch in snapshot.touches() {
        if touch.phase != TouchPhase::Began {
            continue;
        }
        if claims.is_claimed(touch.id) {
            continue;
        }
        if zone.contains(projection.screen_to_world(touch.position)) {
            claims.claim(touch.id);
            return Some(*touch);
        }
    }

    None
}
