use glam::Vec2;

use crate::geometry::direction_from_angle;

/// First-person viewer: a position on the grid plus a facing angle.
///
/// The view is described by two basis vectors:
/// ```text
/// forward = (cos a, sin a)
/// plane   = (-forward.y, forward.x) * tan(fov / 2)
/// ```
/// A screen column with camera offset `c ∈ [-1, 1]` looks along
/// `forward + c * plane`, so walls (cast per column) and sprites (projected
/// through the inverse of `[plane | forward]`) land on the same columns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// World-space position in cells.
    pub position: Vec2,
    /// Facing angle in radians.
    pub angle: f32,
    /// Horizontal field of view in radians.
    pub fov: f32,
}

impl Camera {
    pub fn new(position: Vec2, angle: f32, fov: f32) -> Self {
        Self { position, angle, fov }
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        direction_from_angle(self.angle)
    }

    /// Camera-plane vector, perpendicular to `forward` and scaled so its tip
    /// sits on the right edge of the field of view.
    #[inline]
    pub fn plane(&self) -> Vec2 {
        let f = self.forward();
        Vec2::new(-f.y, f.x) * (self.fov * 0.5).tan()
    }

    /// Camera-space offset of screen column `x`: -1 at the left edge, 0 at
    /// the centre column, approaching +1 at the right edge.
    #[inline]
    pub fn camera_x(x: u32, screen_width: u32) -> f32 {
        2.0 * x as f32 / screen_width.max(1) as f32 - 1.0
    }

    /// Perspective-correct ray angle for screen column `x`.
    #[inline]
    pub fn ray_angle(&self, x: u32, screen_width: u32) -> f32 {
        let cx = Self::camera_x(x, screen_width);
        self.angle + (cx * (self.fov * 0.5).tan()).atan()
    }
}
