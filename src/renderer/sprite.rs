// =============================================================================
// SPRITE.RS: Billboard projection with depth-buffer occlusion
//
// World points are transformed into camera space through the inverse of the
// `[plane | forward]` basis, sized by inverse depth and then tested against
// the wall depth buffer at a handful of sample columns.
// =============================================================================

use glam::Vec2;

use crate::camera::Camera;
use crate::renderer::raycast::DepthBuffer;

/// Points closer than this along the view axis are never drawn.
pub const MIN_SPRITE_DEPTH: f32 = 0.2;
/// Evenly spaced columns probed across a sprite for occlusion.
pub const OCCLUSION_SAMPLES: i32 = 5;
/// Share of on-screen samples that must be in front of the walls.
pub const MIN_VISIBLE_FRACTION: f32 = 0.4;

const DET_EPSILON: f32 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Coin,
    SpeedBoost,
    Pursuer,
}

impl SpriteKind {
    /// `(width, height)` multipliers applied to `screen_height / depth`.
    #[inline]
    pub fn scale(self) -> (f32, f32) {
        match self {
            SpriteKind::Coin | SpriteKind::SpeedBoost => (0.5, 0.5),
            SpriteKind::Pursuer => (0.9, 1.8),
        }
    }
}

/// A sprite's screen-space rectangle. Bounds may extend past the screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub kind: SpriteKind,
    /// Camera-space position: `x` across the plane, `y` depth along forward.
    pub transform: Vec2,
    pub screen_x: i32,
    pub width: i32,
    pub height: i32,
    pub start_x: i32,
    pub end_x: i32,
    pub start_y: i32,
    pub end_y: i32,
}

/// Camera-space coordinates of `point`, or `None` when the view basis is
/// degenerate.
pub fn to_camera_space(camera: &Camera, point: Vec2) -> Option<Vec2> {
    let rel = point - camera.position;
    let dir = camera.forward();
    let plane = camera.plane();

    let det = plane.x * dir.y - dir.x * plane.y;
    if det.abs() < DET_EPSILON {
        return None;
    }
    let tx = (dir.y * rel.x - dir.x * rel.y) / det;
    let ty = (-plane.y * rel.x + plane.x * rel.y) / det;
    Some(Vec2::new(tx, ty))
}

/// Project `point` ignoring walls. `None` when it is behind or too close
/// to the viewer, or entirely off either side of the screen.
pub fn project(
    camera: &Camera,
    point: Vec2,
    kind: SpriteKind,
    screen_width: u32,
    screen_height: u32,
) -> Option<Projection> {
    let transform = to_camera_space(camera, point)?;
    if transform.y <= MIN_SPRITE_DEPTH {
        return None;
    }

    let (w, h) = (screen_width as i32, screen_height as i32);
    let screen_x = (w as f32 / 2.0 * (1.0 + transform.x / transform.y)) as i32;
    let base = screen_height as f32 / transform.y;
    let (w_scale, h_scale) = kind.scale();
    let width = (base * w_scale) as i32;
    let height = (base * h_scale) as i32;

    let start_x = -width / 2 + screen_x;
    let end_x = width / 2 + screen_x;
    if end_x < 0 || start_x >= w {
        return None;
    }

    Some(Projection {
        kind,
        transform,
        screen_x,
        width,
        height,
        start_x,
        end_x,
        start_y: -height / 2 + h / 2,
        end_y: height / 2 + h / 2,
    })
}

impl Projection {
    /// Whether enough of the sprite is in front of the walls to draw it.
    ///
    /// Samples `OCCLUSION_SAMPLES` columns spread evenly from `start_x` to
    /// `end_x`; off-screen samples do not count either way.
    pub fn is_visible(&self, depth: &DepthBuffer) -> bool {
        let span = self.end_x - self.start_x;
        let in_front = (0..OCCLUSION_SAMPLES)
            .map(|i| self.start_x + span * i / (OCCLUSION_SAMPLES - 1))
            .filter_map(|x| depth.get(x))
            .filter(|&wall| self.transform.y < wall)
            .count();
        in_front as f32 >= OCCLUSION_SAMPLES as f32 * MIN_VISIBLE_FRACTION
    }

    /// Whether screen column `x` of this sprite is in front of the wall
    /// drawn there.
    #[inline]
    pub fn column_visible(&self, x: i32, depth: &DepthBuffer) -> bool {
        depth.get(x).is_some_and(|wall| self.transform.y < wall)
    }
}

/// Project `point` and apply occlusion against `depth`, whose length is the
/// screen width.
pub fn project_visible(
    camera: &Camera,
    point: Vec2,
    kind: SpriteKind,
    depth: &DepthBuffer,
    screen_height: u32,
) -> Option<Projection> {
    project(camera, point, kind, depth.len() as u32, screen_height)
        .filter(|p| p.is_visible(depth))
}
