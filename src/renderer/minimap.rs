use glam::Vec2;

use crate::collectible::{Collectible, CollectibleKind};
use crate::map::{LevelMap, Tile};
use crate::renderer::framebuffer::{Color, Framebuffer};

/// Pixels per map cell.
pub const MINIMAP_SCALE: i32 = 6;
/// Top-left corner of the minimap on screen.
pub const MINIMAP_OFFSET: i32 = 10;

const FLOOR: Color = Color::rgb(40, 40, 40);
const WALL: Color = Color::rgb(100, 100, 100);
const HEADING_LENGTH: f32 = 10.0;

/// Screen pixel of world position `pos` on the minimap.
#[inline]
pub fn to_minimap(pos: Vec2) -> (i32, i32) {
    (
        MINIMAP_OFFSET + (pos.x * MINIMAP_SCALE as f32) as i32,
        MINIMAP_OFFSET + (pos.y * MINIMAP_SCALE as f32) as i32,
    )
}

/// What the minimap shows besides the grid itself.
pub struct MinimapView<'a> {
    pub map: &'a LevelMap,
    pub collectibles: &'a [Collectible],
    pub player: Vec2,
    pub facing: Vec2,
    /// Drawn only when the player owns the radar perk.
    pub pursuer: Option<Vec2>,
}

pub fn draw_minimap(fb: &mut Framebuffer, view: &MinimapView<'_>) {
    for (x, y, tile) in view.map.cells() {
        let color = match tile {
            Tile::Floor => FLOOR,
            Tile::Wall => WALL,
            Tile::Door => Color::RED,
        };
        fb.fill_rect(
            MINIMAP_OFFSET + x * MINIMAP_SCALE,
            MINIMAP_OFFSET + y * MINIMAP_SCALE,
            MINIMAP_SCALE,
            MINIMAP_SCALE,
            color,
        );
    }

    for item in view.collectibles.iter().filter(|c| !c.collected) {
        let (x, y) = to_minimap(item.position);
        let color = match item.kind {
            CollectibleKind::Coin => Color::GOLD,
            CollectibleKind::SpeedBoost => Color::BLUE,
        };
        fb.fill_circle(x, y, 2, color);
    }

    if let Some(pursuer) = view.pursuer {
        let (x, y) = to_minimap(pursuer);
        fb.fill_circle(x, y, 3, Color::RED);
    }

    let (px, py) = to_minimap(view.player);
    fb.fill_circle(px, py, 3, Color::YELLOW);
    let tip = view.player * MINIMAP_SCALE as f32 + view.facing * HEADING_LENGTH;
    fb.line(
        px,
        py,
        MINIMAP_OFFSET + tip.x as i32,
        MINIMAP_OFFSET + tip.y as i32,
        Color::YELLOW,
    );
}
