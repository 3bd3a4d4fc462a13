// =============================================================================
// RAYCAST.RS: Per-column DDA wall casting
//
// One ray per screen column walks the grid cell boundary by cell boundary
// until it enters a solid tile. The perpendicular distance of every hit is
// written into a depth buffer that sprite projection reads afterward.
// =============================================================================

use glam::Vec2;

use crate::camera::Camera;
use crate::map::{LevelMap, Tile};
use crate::renderer::framebuffer::Color;

/// Hits closer than this are clamped to it.
pub const MIN_PERP_DISTANCE: f32 = 0.1;

const WALL_LIGHT: Color = Color::rgb(120, 70, 70);
const WALL_DARK: Color = Color::rgb(80, 50, 50);
const LOCKED_DOOR: Color = Color::RED;

/// Which kind of grid line the ray crossed last.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// The ray stepped in x and hit a face of constant x.
    Vertical,
    /// The ray stepped in y and hit a face of constant y.
    Horizontal,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Distance measured along the view direction, never below
    /// `MIN_PERP_DISTANCE`.
    pub perp_distance: f32,
    pub side: Side,
    pub tile: Tile,
    pub cell: (i32, i32),
}

impl RayHit {
    /// Projected wall height in pixels.
    #[inline]
    pub fn line_height(&self, screen_height: u32) -> i32 {
        (screen_height as f32 / self.perp_distance) as i32
    }

    /// First and last pixel row of the wall strip, clamped to the screen.
    pub fn span(&self, screen_height: u32) -> (i32, i32) {
        let h = screen_height as i32;
        let line = self.line_height(screen_height);
        let start = (-line / 2 + h / 2).max(0);
        let end = (line / 2 + h / 2).min(h - 1);
        (start, end)
    }

    /// `0` at the viewer, `1` at or beyond `fog_distance`.
    #[inline]
    pub fn fog(&self, fog_distance: f32) -> f32 {
        (self.perp_distance / fog_distance).min(1.0)
    }

    /// Colour of the wall strip, or `None` when the hit tile is an exit door
    /// the player can already afford (drawn as an opening).
    pub fn shade(&self, fog_distance: f32, door_open: bool) -> Option<Color> {
        let base = match (self.tile, self.side) {
            (Tile::Door, _) if door_open => return None,
            (Tile::Door, _) => LOCKED_DOOR,
            (Tile::Floor, _) => return None,
            (Tile::Wall, Side::Horizontal) => WALL_DARK,
            (Tile::Wall, Side::Vertical) => WALL_LIGHT,
        };
        Some(base.fogged(self.fog(fog_distance)))
    }
}

/// Cast a single ray from `origin` along `dir` and return the first solid
/// cell it enters.
///
/// `dir` need not be unit length. The returned distance is measured in
/// multiples of `dir`, so passing `forward + c * plane` yields the
/// fisheye-free distance along `forward`. Leaving the grid counts as hitting
/// a wall, which bounds the walk on any map.
pub fn cast_ray(map: &LevelMap, origin: Vec2, dir: Vec2) -> RayHit {
    let mut cell_x = origin.x.floor() as i32;
    let mut cell_y = origin.y.floor() as i32;

    let delta_x = if dir.x.abs() < f32::EPSILON { f32::INFINITY } else { (1.0 / dir.x).abs() };
    let delta_y = if dir.y.abs() < f32::EPSILON { f32::INFINITY } else { (1.0 / dir.y).abs() };

    let (step_x, mut side_x) = if dir.x < 0.0 {
        (-1, (origin.x - cell_x as f32) * delta_x)
    } else {
        (1, (cell_x as f32 + 1.0 - origin.x) * delta_x)
    };
    let (step_y, mut side_y) = if dir.y < 0.0 {
        (-1, (origin.y - cell_y as f32) * delta_y)
    } else {
        (1, (cell_y as f32 + 1.0 - origin.y) * delta_y)
    };
    // 0 * inf is NaN; an axis the ray never moves along is never crossed.
    if delta_x.is_infinite() {
        side_x = f32::INFINITY;
    }
    if delta_y.is_infinite() {
        side_y = f32::INFINITY;
    }

    let mut side;
    loop {
        if side_x < side_y {
            side_x += delta_x;
            cell_x += step_x;
            side = Side::Vertical;
        } else {
            side_y += delta_y;
            cell_y += step_y;
            side = Side::Horizontal;
        }
        if map.tile(cell_x, cell_y).is_solid() {
            break;
        }
    }

    let raw = match side {
        Side::Vertical => (cell_x as f32 - origin.x + (1 - step_x) as f32 / 2.0) / dir.x,
        Side::Horizontal => (cell_y as f32 - origin.y + (1 - step_y) as f32 / 2.0) / dir.y,
    };
    // A zero direction divides by zero; treat it as touching the wall.
    let perp_distance = if raw.is_finite() { raw.max(MIN_PERP_DISTANCE) } else { MIN_PERP_DISTANCE };

    RayHit { perp_distance, side, tile: map.tile(cell_x, cell_y), cell: (cell_x, cell_y) }
}

/// Perpendicular wall distance per screen column.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: u32) -> Self {
        Self { depths: vec![f32::INFINITY; width as usize] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Depth at column `x`, `None` off screen.
    #[inline]
    pub fn get(&self, x: i32) -> Option<f32> {
        usize::try_from(x).ok().and_then(|i| self.depths.get(i)).copied()
    }

    #[inline]
    pub fn set(&mut self, x: usize, depth: f32) {
        if let Some(d) = self.depths.get_mut(x) {
            *d = depth;
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depths
    }
}

/// Casts every column of a frame. Buffers are sized once for a screen width
/// and overwritten on each call.
#[derive(Clone, Debug)]
pub struct VisibilityCaster {
    hits: Vec<RayHit>,
    depth: DepthBuffer,
}

impl VisibilityCaster {
    pub fn new(screen_width: u32) -> Self {
        let blank = RayHit {
            perp_distance: f32::INFINITY,
            side: Side::Vertical,
            tile: Tile::Wall,
            cell: (0, 0),
        };
        Self { hits: vec![blank; screen_width as usize], depth: DepthBuffer::new(screen_width) }
    }

    pub fn screen_width(&self) -> u32 {
        self.hits.len() as u32
    }

    /// Cast one ray per column for `camera` and fill the depth buffer.
    pub fn cast(&mut self, map: &LevelMap, camera: &Camera) {
        let width = self.screen_width();
        let forward = camera.forward();
        let plane = camera.plane();
        for x in 0..width {
            let dir = forward + plane * Camera::camera_x(x, width);
            let hit = cast_ray(map, camera.position, dir);
            self.depth.set(x as usize, hit.perp_distance);
            self.hits[x as usize] = hit;
        }
    }

    pub fn hits(&self) -> &[RayHit] {
        &self.hits
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }
}
