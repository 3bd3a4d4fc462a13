pub mod framebuffer;
pub mod minimap;
pub mod raycast;
pub mod sprite;

use framebuffer::{Color, Framebuffer};
use minimap::{draw_minimap, MinimapView};
use raycast::VisibilityCaster;
use sprite::{Projection, SpriteKind};

use crate::collectible::CollectibleKind;
use crate::game::{Game, GameMode};

const CEILING: Color = Color::rgb(30, 30, 30);
const FLOOR: Color = Color::rgb(50, 50, 50);
const PURSUER_BODY: Color = Color::rgb(20, 20, 20);
const MENU_BACKGROUND: Color = Color::rgb(10, 10, 10);
const SHOP_BACKGROUND: Color = Color::rgb(20, 20, 30);
const WON_BACKGROUND: Color = Color::rgb(0, 40, 0);
const LOST_BACKGROUND: Color = Color::rgb(40, 0, 0);

/// Vertical bob of collectibles, in pixels.
const BOB_AMPLITUDE: f32 = 10.0;
const BOB_SPEED: f32 = 3.0;
/// Depth of the red vignette during a stab, in pixels.
const STAB_VIGNETTE: i32 = 100;

/// What went into the last frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Wall columns actually drawn (open doors are skipped).
    pub wall_columns: u32,
    /// Sprites that passed the occlusion test.
    pub sprites: u32,
}

/// Software renderer. The framebuffer and the per-column buffers are
/// allocated once for the configured resolution and reused every frame.
pub struct Renderer {
    framebuffer: Framebuffer,
    caster: VisibilityCaster,
    fog_distance: f32,
}

impl Renderer {
    pub fn new(width: u32, height: u32, fog_distance: f32) -> Self {
        Self {
            framebuffer: Framebuffer::new(width, height),
            caster: VisibilityCaster::new(width),
            fog_distance,
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn caster(&self) -> &VisibilityCaster {
        &self.caster
    }

    /// Draw the current state of `game`.
    pub fn render(&mut self, game: &Game) -> FrameStats {
        match game.mode() {
            GameMode::Playing => self.render_playing(game),
            GameMode::MainMenu => self.clear_to(MENU_BACKGROUND),
            GameMode::Shop => self.clear_to(SHOP_BACKGROUND),
            GameMode::Won => self.clear_to(WON_BACKGROUND),
            GameMode::Lost => self.clear_to(LOST_BACKGROUND),
            GameMode::Loading => {
                self.framebuffer.clear(Color::BLACK);
                self.draw_loading_bar(game.loading_progress());
                FrameStats::default()
            }
        }
    }

    fn clear_to(&mut self, color: Color) -> FrameStats {
        self.framebuffer.clear(color);
        FrameStats::default()
    }

    fn render_playing(&mut self, game: &Game) -> FrameStats {
        let (w, h) = (self.framebuffer.width(), self.framebuffer.height());
        let camera = game.camera();
        let mut stats = FrameStats::default();

        self.framebuffer.fill_rect(0, 0, w as i32, h as i32 / 2, CEILING);
        self.framebuffer.fill_rect(0, h as i32 / 2, w as i32, h as i32 - h as i32 / 2, FLOOR);

        self.caster.cast(game.map(), &camera);
        let door_open = game.door_open();
        for (x, hit) in self.caster.hits().iter().enumerate() {
            let Some(color) = hit.shade(self.fog_distance, door_open) else {
                continue;
            };
            let (start, end) = hit.span(h);
            self.framebuffer.vline(x as i32, start, end, color);
            stats.wall_columns += 1;
        }

        let mut sprites: Vec<Projection> = Vec::new();
        let depth = self.caster.depth();

        let pursuer = game.pursuer();
        if pursuer.is_active() {
            sprites.extend(sprite::project_visible(
                &camera,
                pursuer.position,
                SpriteKind::Pursuer,
                depth,
                h,
            ));
        }
        for item in game.collectibles().iter().filter(|c| !c.collected) {
            let kind = match item.kind {
                CollectibleKind::Coin => SpriteKind::Coin,
                CollectibleKind::SpeedBoost => SpriteKind::SpeedBoost,
            };
            sprites.extend(sprite::project_visible(&camera, item.position, kind, depth, h));
        }

        // Painter's order: farthest first.
        sprites.sort_by(|a, b| b.transform.y.total_cmp(&a.transform.y));
        let bob = ((game.anim_time() * BOB_SPEED).sin() * BOB_AMPLITUDE) as i32;
        for projection in &sprites {
            self.draw_sprite(projection, bob);
        }
        stats.sprites = sprites.len() as u32;

        draw_minimap(
            &mut self.framebuffer,
            &MinimapView {
                map: game.map(),
                collectibles: game.collectibles(),
                player: game.player().position,
                facing: game.player().forward(),
                pursuer: (game.has_radar() && pursuer.is_active()).then_some(pursuer.position),
            },
        );

        if game.is_attacked() {
            let intensity = (game.stab_timer() / game.config().stab_duration).clamp(0.0, 1.0);
            self.draw_stab(intensity);
        }

        stats
    }

    /// Fill the sprite's columns that are in front of the walls.
    fn draw_sprite(&mut self, p: &Projection, bob: i32) {
        let depth = self.caster.depth();
        let (color, offset) = match p.kind {
            SpriteKind::Coin => (Color::GOLD, bob),
            SpriteKind::SpeedBoost => (Color::BLUE, bob),
            SpriteKind::Pursuer => (PURSUER_BODY, 0),
        };
        let fog = (p.transform.y / self.fog_distance).min(1.0);
        let color = color.fogged(fog);

        for x in (p.start_x..=p.end_x).filter(|&x| p.column_visible(x, depth)) {
            self.framebuffer.vline(x, p.start_y + offset, p.end_y + offset, color);
        }

        if p.kind == SpriteKind::Pursuer {
            let eye_y = p.start_y + p.height / 5;
            let eye_dx = (p.width / 5).max(1);
            let eye_r = (p.width / 16).max(1);
            self.framebuffer.fill_circle(p.screen_x - eye_dx, eye_y, eye_r, Color::RED);
            self.framebuffer.fill_circle(p.screen_x + eye_dx, eye_y, eye_r, Color::RED);
        }
    }

    fn draw_stab(&mut self, intensity: f32) {
        let alpha = (intensity * 200.0) as u8;
        self.framebuffer.vignette(STAB_VIGNETTE, Color::RED, 2.5 * intensity);
        let slash = Color::rgba(255, 0, 0, alpha);
        self.framebuffer.line(100, 100, 400, 300, slash);
        self.framebuffer.line(500, 150, 700, 400, slash);
        self.framebuffer.line(200, 400, 350, 500, slash);
        let (w, h) = (self.framebuffer.width() as i32, self.framebuffer.height() as i32);
        self.framebuffer.fill_rect(0, 0, w, h, Color::rgba(255, 0, 0, (alpha as f32 * 0.3) as u8));
    }

    fn draw_loading_bar(&mut self, progress: f32) {
        let (w, h) = (self.framebuffer.width() as i32, self.framebuffer.height() as i32);
        let (bar_w, bar_h) = (400, 30);
        let (x, y) = (w / 2 - bar_w / 2, h / 2 - bar_h / 2);
        self.framebuffer.fill_rect(x, y, bar_w, bar_h, Color::rgb(80, 80, 80));
        self.framebuffer.fill_rect(x, y, (bar_w as f32 * progress) as i32, bar_h, Color::rgb(255, 161, 0));
    }
}
