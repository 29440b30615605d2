//! Camera system providing the screen-to-world projection for controls

use glam::Vec2;

/// Projection capability supplied by the host's camera/viewport subsystem
///
/// Controls only ever see this seam; the rest of the scene graph stays
/// opaque to them.
pub trait Projection {
    /// Converts a screen position in physical pixels (origin top-left,
    /// y down) into world coordinates
    fn screen_to_world(&self, screen: Vec2) -> Vec2;

    /// Half the world-space extent visible through the viewport
    /// (half-width, half-height)
    fn half_extents(&self) -> Vec2;

    /// World position at the center of the view
    ///
    /// Controls are placed relative to this point, so they follow the
    /// camera the way corner-anchored HUD elements do.
    fn view_center(&self) -> Vec2;
}

/// Orthographic camera defining a view into world space
///
/// Bounds directly define what the camera sees - no separate zoom.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    /// World space bounds this camera views
    /// Changing bounds = zooming in/out
    bounds: Bounds,
    /// Viewport size in physical pixels
    viewport: Vec2,
}

impl OrthographicCamera {
    /// Create camera with explicit world bounds and viewport size
    pub fn new(min: Vec2, max: Vec2, viewport: Vec2) -> Self {
        Self {
            bounds: Bounds { min, max },
            viewport: viewport.max(Vec2::ONE),
        }
    }

    /// Create camera centered at origin with given world size
    pub fn centered(width: f32, height: f32, viewport: Vec2) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::new(
            Vec2::new(-half_w, -half_h),
            Vec2::new(half_w, half_h),
            viewport,
        )
    }

    /// Get the current view bounds
    pub fn view_bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Viewport size in physical pixels
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Update the viewport size, e.g. after a window resize
    ///
    /// Anything caching zone layouts must be invalidated afterwards.
    pub fn set_viewport(&mut self, size: Vec2) {
        self.viewport = size.max(Vec2::ONE);
    }

    /// Pan the camera by delta in world units
    pub fn pan(&mut self, delta: Vec2) {
        self.bounds.min += delta;
        self.bounds.max += delta;
    }

    /// Zoom in/out by changing bounds size around center
    /// scale > 1.0 = zoom out, scale < 1.0 = zoom in
    pub fn zoom(&mut self, scale: f32) {
        let center = self.bounds.center();
        let half = Vec2::new(
            self.bounds.width() * scale / 2.0,
            self.bounds.height() * scale / 2.0,
        );

        self.bounds.min = center - half;
        self.bounds.max = center + half;
    }

    /// Set camera to view specific bounds
    pub fn set_bounds(&mut self, min: Vec2, max: Vec2) {
        self.bounds.min = min;
        self.bounds.max = max;
    }
}

impl Projection for OrthographicCamera {
    fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            self.bounds.min.x + (screen.x / self.viewport.x) * self.bounds.width(),
            self.bounds.max.y - (screen.y / self.viewport.y) * self.bounds.height(),
        )
    }

    fn half_extents(&self) -> Vec2 {
        Vec2::new(self.bounds.width() / 2.0, self.bounds.height() / 2.0)
    }

    fn view_center(&self) -> Vec2 {
        self.bounds.center()
    }
}

/// World-space bounds of a camera view
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width() / self.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_camera_bounds_and_dimensions() {
        let camera = OrthographicCamera::new(
            Vec2::new(-1.0, -2.0),
            Vec2::new(3.0, 4.0),
            VIEWPORT,
        );
        assert_eq!(camera.view_bounds().width(), 4.0);
        assert_eq!(camera.view_bounds().height(), 6.0);
        assert_eq!(camera.view_bounds().center(), Vec2::new(1.0, 1.0));
        assert!((camera.view_bounds().aspect_ratio() - (4.0 / 6.0)).abs() < 0.001);
    }

    #[test]
    fn test_camera_centered() {
        let camera = OrthographicCamera::centered(4.0, 6.0, VIEWPORT);
        assert_eq!(camera.view_bounds().min, Vec2::new(-2.0, -3.0));
        assert_eq!(camera.view_bounds().max, Vec2::new(2.0, 3.0));
        assert_eq!(camera.view_center(), Vec2::ZERO);
    }

    #[test]
    fn test_camera_pan() {
        let mut camera = OrthographicCamera::centered(4.0, 6.0, VIEWPORT);
        camera.pan(Vec2::new(1.0, -2.0));
        assert_eq!(camera.view_bounds().min, Vec2::new(-1.0, -5.0));
        assert_eq!(camera.view_bounds().max, Vec2::new(3.0, 1.0));
        assert_eq!(camera.view_center(), Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_camera_zoom() {
        let mut camera = OrthographicCamera::centered(4.0, 6.0, VIEWPORT);
        camera.zoom(2.0); // Zoom out
        assert_eq!(camera.view_bounds().width(), 8.0);
        assert_eq!(camera.view_bounds().height(), 12.0);
        assert_eq!(camera.view_center(), Vec2::ZERO); // Center unchanged
    }

    #[test]
    fn test_screen_to_world_corners() {
        let camera = OrthographicCamera::centered(16.0, 12.0, VIEWPORT);

        // Screen origin is top-left, world y points up
        assert_eq!(camera.screen_to_world(Vec2::ZERO), Vec2::new(-8.0, 6.0));
        assert_eq!(camera.screen_to_world(VIEWPORT), Vec2::new(8.0, -6.0));
        assert_eq!(
            camera.screen_to_world(Vec2::new(400.0, 300.0)),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_screen_to_world_follows_pan() {
        let mut camera = OrthographicCamera::centered(16.0, 12.0, VIEWPORT);
        camera.pan(Vec2::new(2.0, 1.0));
        assert_eq!(
            camera.screen_to_world(Vec2::new(400.0, 300.0)),
            Vec2::new(2.0, 1.0)
        );
    }

    #[test]
    fn test_half_extents() {
        let camera = OrthographicCamera::centered(16.0, 12.0, VIEWPORT);
        assert_eq!(camera.half_extents(), Vec2::new(8.0, 6.0));
    }
}
