//! Control zone geometry

use glam::Vec2;

use super::anchor::Anchor;

/// Rectangular area in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from its bottom-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle centered on a point
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    /// Check if a point is inside this rectangle, edges inclusive
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.x
            && pos.x <= self.x + self.width
            && pos.y >= self.y
            && pos.y <= self.y + self.height
    }

    /// Get the center point of the rectangle
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Resolved placement of a control
///
/// Derived from anchor, margin, zone size and the camera view; cached by the
/// control and recomputed only after invalidation.
#[derive(Debug, Clone, Copy)]
pub struct ZoneLayout {
    /// Control position relative to the view center
    pub local_position: Vec2,
    /// Control position in world space
    pub world_position: Vec2,
    /// World-space rectangle new touches are tested against
    pub world_rect: Rect,
}

/// Computes where a control sits and which region it watches
///
/// The local position presses the control into its anchored corner, inset by
/// the margin. The touch zone is centered on the resulting world position.
pub fn compute_zone(
    anchor: Anchor,
    margin: Vec2,
    zone_size: Vec2,
    view_center: Vec2,
    half_extents: Vec2,
) -> ZoneLayout {
    let x = if anchor.contains(Anchor::RIGHT) {
        half_extents.x - margin.x
    } else {
        -half_extents.x + margin.x
    };
    let y = if anchor.contains(Anchor::TOP) {
        half_extents.y - margin.y
    } else {
        -half_extents.y + margin.y
    };

    let local_position = Vec2::new(x, y);
    let world_position = view_center + local_position;

    ZoneLayout {
        local_position,
        world_position,
        world_rect: Rect::centered(world_position, zone_size),
    }
}
