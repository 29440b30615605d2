//! Touch records and per-tick snapshots

use glam::Vec2;

/// Identity of a touch, stable for the lifetime of the touch
///
/// Identities are assigned by the platform and are often different from a
/// touch's index in the platform's touch list, so controls track touches by
/// identity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u64);

impl TouchId {
    /// Reserved identity for the pointer-emulated touch
    pub const POINTER: TouchId = TouchId(255);
}

/// Phase of a touch as observed this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// The touch appeared this tick
    Began,
    /// The touch moved since last tick
    Moved,
    /// The touch is down but has not moved
    Stationary,
    /// The touch ended this tick
    Ended,
}

/// Where a touch record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOrigin {
    /// A real touch reported by the platform
    Native,
    /// A synthetic touch derived from mouse input
    PointerEmulated,
}

/// A single touch as observed this tick
#[derive(Debug, Clone, Copy)]
pub struct Touch {
    pub id: TouchId,
    /// Screen position in physical pixels (origin top-left, y down)
    pub position: Vec2,
    pub phase: TouchPhase,
    pub origin: TouchOrigin,
}

/// Read-only touch list for one simulation tick
///
/// Built once per frame and shared by every control, so all controls observe
/// the same phases for the whole tick. Touches are kept in arrival order,
/// which makes capture scans deterministic.
#[derive(Debug, Clone, Default)]
pub struct TouchSnapshot {
    touches: Vec<Touch>,
}

impl TouchSnapshot {
    /// Creates an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot from a prepared touch list
    pub fn from_touches(touches: Vec<Touch>) -> Self {
        Self { touches }
    }

    pub(crate) fn push(&mut self, touch: Touch) {
        self.touches.push(touch);
    }

    /// All touches this tick, in arrival order
    pub fn touches(&self) -> &[Touch] {
        &self.touches
    }

    /// Finds the touch with the given identity, if present this tick
    pub fn find(&self, id: TouchId) -> Option<&Touch> {
        self.touches.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }
}
