// =============================================================================
// COLLECTIBLE.RS: Gold coins and speed boosts
//
// Placed once per level by rejection sampling, flagged as collected on
// pickup and never removed from the list.
// =============================================================================

use glam::Vec2;
use rand::Rng;

use crate::map::LevelMap;

/// Gold granted by one coin before the player's multiplier.
pub const COIN_VALUE: f32 = 10.0;
/// Minimum spacing between coins.
const COIN_SPACING: f32 = 2.0;
/// Minimum spacing between a boost and any other collectible.
const BOOST_SPACING: f32 = 3.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollectibleKind {
    Coin,
    SpeedBoost,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collectible {
    pub position: Vec2,
    pub collected: bool,
    pub value: f32,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn coin(position: Vec2) -> Self {
        Self { position, collected: false, value: COIN_VALUE, kind: CollectibleKind::Coin }
    }

    pub fn speed_boost(position: Vec2) -> Self {
        Self { position, collected: false, value: 0.0, kind: CollectibleKind::SpeedBoost }
    }
}

/// What happened when the player walked over a collectible.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Pickup {
    /// Gold actually added, after the multiplier.
    Gold(u32),
    SpeedBoost,
}

/// Scatter 15–24 coins and 1–2 speed boosts over floor cells of `map`.
///
/// Coins keep 2 cells from each other and stay 2 cells from the border;
/// boosts keep 3 cells from everything and stay 3 cells from the border.
/// Placement gives up after a bounded number of attempts, so cramped maps
/// simply get fewer items.
pub fn generate(map: &LevelMap, rng: &mut impl Rng) -> Vec<Collectible> {
    let mut items = Vec::new();

    let coin_target = 15 + rng.gen_range(0..10);
    let mut attempts = 0;
    while items.len() < coin_target && attempts < coin_target * 10 {
        attempts += 1;
        let Some(pos) = sample_cell(map, 2, rng) else { break };
        if !map.is_walkable_at(pos) || too_close(&items, pos, COIN_SPACING) {
            continue;
        }
        items.push(Collectible::coin(pos));
    }

    let boost_target = 1 + rng.gen_range(0..2);
    let mut boosts = 0;
    attempts = 0;
    while boosts < boost_target && attempts < 100 {
        attempts += 1;
        let Some(pos) = sample_cell(map, 3, rng) else { break };
        if !map.is_walkable_at(pos) || too_close(&items, pos, BOOST_SPACING) {
            continue;
        }
        items.push(Collectible::speed_boost(pos));
        boosts += 1;
    }

    items
}

/// Centre of a random cell at least `margin` cells inside the border.
fn sample_cell(map: &LevelMap, margin: i32, rng: &mut impl Rng) -> Option<Vec2> {
    let (lo_x, hi_x) = (margin, map.width() - margin);
    let (lo_y, hi_y) = (margin, map.height() - margin);
    if lo_x >= hi_x || lo_y >= hi_y {
        return None;
    }
    let x = rng.gen_range(lo_x..hi_x);
    let y = rng.gen_range(lo_y..hi_y);
    Some(Vec2::new(x as f32 + 0.5, y as f32 + 0.5))
}

fn too_close(items: &[Collectible], pos: Vec2, spacing: f32) -> bool {
    items.iter().any(|c| c.position.distance_squared(pos) < spacing * spacing)
}

/// Collect everything within `radius` of `player`. Coins yield
/// `floor(value * gold_multiplier)` gold.
pub fn collect_nearby(
    items: &mut [Collectible],
    player: Vec2,
    radius: f32,
    gold_multiplier: f32,
) -> Vec<Pickup> {
    let mut pickups = Vec::new();
    for item in items.iter_mut().filter(|c| !c.collected) {
        if item.position.distance(player) >= radius {
            continue;
        }
        item.collected = true;
        pickups.push(match item.kind {
            CollectibleKind::Coin => Pickup::Gold((item.value * gold_multiplier) as u32),
            CollectibleKind::SpeedBoost => Pickup::SpeedBoost,
        });
    }
    pickups
}

/// Number of collectibles still on the floor.
pub fn remaining(items: &[Collectible]) -> usize {
    items.iter().filter(|c| !c.collected).count()
}
