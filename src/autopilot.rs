// =============================================================================
// AUTOPILOT.RS: Scripted player for headless sessions
//
// Produces one `InputState` per frame from the current game state: starts a
// run from the menu, walks A* routes to the nearest collectible and then to
// the exit door, buys the cheapest affordable perk and leaves the shop.
// =============================================================================

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::collectible::CollectibleKind;
use crate::game::{Game, GameMode};
use crate::geometry::CARDINALS;
use crate::input::{InputState, Key};
use crate::map::{cell_center, cell_of, LevelMap, Tile};
use crate::pathfinding::prelude::find_path;

const PERK_KEYS: [Key; 3] = [Key::Digit1, Key::Digit2, Key::Digit3];

#[derive(Debug, Default)]
pub struct Autopilot {
    /// Frames spent in the current shop visit.
    shop_frames: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_input(&mut self, game: &Game) -> InputState {
        let mut input = InputState::new();
        match game.mode() {
            GameMode::MainMenu => input.press(Key::Enter),
            GameMode::Shop => self.shop(game, &mut input),
            GameMode::Playing => {
                self.shop_frames = 0;
                steer(game, &mut input);
            }
            GameMode::Loading | GameMode::Won | GameMode::Lost => {}
        }
        input
    }

    fn shop(&mut self, game: &Game, input: &mut InputState) {
        self.shop_frames += 1;
        let cheapest = game
            .offers()
            .iter()
            .enumerate()
            .filter(|(_, perk)| perk.cost <= game.gold())
            .min_by_key(|(_, perk)| perk.cost);

        match cheapest {
            Some((slot, _)) if self.shop_frames == 1 => {
                input.press(PERK_KEYS[slot]);
                input.press(Key::Enter);
            }
            _ => input.press(Key::Space),
        }
    }
}

/// Turn toward the next waypoint and walk forward.
fn steer(game: &Game, input: &mut InputState) {
    let player = game.player();
    let Some(target) = next_target(game) else {
        return;
    };

    let to_target = target - player.position;
    let desired = to_target.y.atan2(to_target.x);
    let turn = (desired - player.angle + PI).rem_euclid(TAU) - PI;
    if player.mouse_sensitivity > 0.0 {
        input.mouse_delta_x = turn / player.mouse_sensitivity;
    }
    input.press(Key::W);
}

/// The point to walk toward this frame.
fn next_target(game: &Game) -> Option<Vec2> {
    let map = game.map();
    let position = game.player().position;

    if game.door_open() {
        let (door, approach) = door_approach(map)?;
        if cell_of(position) == approach {
            return Some(cell_center(door.0, door.1));
        }
        return route(map, position, cell_center(approach.0, approach.1));
    }

    let goal = game
        .collectibles()
        .iter()
        .filter(|c| !c.collected)
        .min_by(|a, b| {
            let rank = |kind| if kind == CollectibleKind::Coin { 0.0 } else { 1.0 };
            (a.position.distance(position) + rank(a.kind))
                .total_cmp(&(b.position.distance(position) + rank(b.kind)))
        })?
        .position;
    route(map, position, goal)
}

fn route(map: &LevelMap, from: Vec2, to: Vec2) -> Option<Vec2> {
    let path = find_path(map, from, to);
    Some(path.first().copied().unwrap_or(to))
}

/// The exit door and the floor cell next to it.
fn door_approach(map: &LevelMap) -> Option<((i32, i32), (i32, i32))> {
    map.cells().filter(|&(_, _, t)| t == Tile::Door).find_map(|(x, y, _)| {
        CARDINALS
            .iter()
            .map(|&(dx, dy)| (x + dx, y + dy))
            .find(|&(nx, ny)| map.is_walkable(nx, ny))
            .map(|approach| ((x, y), approach))
    })
}
