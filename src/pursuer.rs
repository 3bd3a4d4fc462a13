// =============================================================================
// PURSUER.RS: The maze killer
//
// Owns its position and current route, replans on a countdown, walks the
// route waypoint by waypoint and decides whether the player has been caught.
// =============================================================================

use glam::Vec2;
use tracing::{debug, warn};

use crate::config::PursuerConfig;
use crate::geometry::{line_of_sight, step_toward};
use crate::levels::SpawnRule;
use crate::map::{cell_center, LevelMap};
use crate::pathfinding::PathStrategy;

/// A waypoint closer than this counts as reached.
pub const WAYPOINT_REACHED: f32 = 0.3;
/// Sampling step of the capture line-of-sight march.
pub const SIGHT_STEP: f32 = 0.1;
/// Closer than this the player is caught regardless of walls.
pub const POINT_BLANK: f32 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PursuerState {
    /// Never updates, renders or catches.
    Inactive,
    /// Always chasing.
    Active,
}

#[derive(Clone, Debug)]
pub struct Pursuer {
    pub position: Vec2,
    pub speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub state: PursuerState,
    pub chasing: bool,
    pub strategy: PathStrategy,
    path: Vec<Vec2>,
    waypoint: usize,
    recompute_timer: f32,
    /// Last replan found nothing; wait for the timer instead of replanning
    /// every frame.
    stalled: bool,
}

impl Pursuer {
    pub fn new(position: Vec2, config: &PursuerConfig) -> Self {
        Self {
            position,
            speed: config.speed,
            detection_range: config.detection_range,
            attack_range: config.attack_range,
            state: PursuerState::Active,
            chasing: false,
            strategy: config.strategy,
            path: Vec::new(),
            waypoint: 0,
            recompute_timer: 0.0,
            stalled: false,
        }
    }

    pub fn inactive(config: &PursuerConfig) -> Self {
        Self { state: PursuerState::Inactive, ..Self::new(Vec2::ZERO, config) }
    }

    /// Place a pursuer for a new level according to `rule`.
    pub fn spawn(map: &LevelMap, player: Vec2, rule: SpawnRule, config: &PursuerConfig) -> Self {
        match rule {
            SpawnRule::Inactive => Self::inactive(config),
            SpawnRule::Fixed([x, y]) => {
                let pos = cell_center(x, y);
                if map.is_walkable(x, y) {
                    Self::new(pos, config)
                } else {
                    warn!(x, y, "fixed pursuer spawn is solid; using farthest candidate");
                    Self::new(farthest_spawn(map, player), config)
                }
            }
            SpawnRule::Farthest => Self::new(farthest_spawn(map, player), config),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == PursuerState::Active
    }

    /// Waypoints of the current route.
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Index of the waypoint currently being walked toward.
    pub fn waypoint_index(&self) -> usize {
        self.waypoint
    }

    pub fn recompute_timer(&self) -> f32 {
        self.recompute_timer
    }

    /// The waypoint currently being walked toward, if any.
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.path.get(self.waypoint).copied()
    }

    /// Advance one frame of `dt` seconds toward `player`.
    pub fn update(&mut self, map: &LevelMap, player: Vec2, dt: f32) {
        if !self.is_active() {
            return;
        }
        self.chasing = true;

        self.recompute_timer -= dt;
        let exhausted = self.waypoint >= self.path.len();
        if self.recompute_timer <= 0.0 || (exhausted && !self.stalled) {
            self.replan(map, player);
        }

        // A reached waypoint is dropped before moving, so this frame already
        // heads for the next one.
        if let Some(target) = self.current_waypoint() {
            if self.position.distance(target) < WAYPOINT_REACHED {
                self.waypoint += 1;
            }
        }

        let Some(target) = self.current_waypoint() else {
            return;
        };
        let next = step_toward(self.position, target, self.speed * dt);
        if next != self.position {
            self.move_with_collision(map, next);
        }
    }

    fn replan(&mut self, map: &LevelMap, player: Vec2) {
        self.path = self.strategy.plan(map, self.position, player);
        self.waypoint = 0;
        self.recompute_timer = self.strategy.recompute_interval();
        self.stalled = self.path.is_empty();
        if self.stalled {
            debug!(position = %self.position, target = %player, "pursuer holding: no route");
        }
    }

    /// Take `next` if it is on floor, else slide along one axis, else stay
    /// put and replan on the next frame.
    fn move_with_collision(&mut self, map: &LevelMap, next: Vec2) {
        if map.is_walkable_at(next) {
            self.position = next;
            return;
        }
        let slide_x = Vec2::new(next.x, self.position.y);
        if map.is_walkable_at(slide_x) {
            self.position = slide_x;
            return;
        }
        let slide_y = Vec2::new(self.position.x, next.y);
        if map.is_walkable_at(slide_y) {
            self.position = slide_y;
            return;
        }
        self.recompute_timer = 0.0;
        self.stalled = false;
    }

    /// Whether the pursuer reaches the player this frame: within attack range
    /// with nothing solid on the straight line between them.
    pub fn is_caught(&self, map: &LevelMap, player: Vec2) -> bool {
        if !self.is_active() {
            return false;
        }
        let dist = self.position.distance(player);
        if dist >= self.attack_range {
            return false;
        }
        if dist < POINT_BLANK {
            return true;
        }
        line_of_sight(self.position, player, SIGHT_STEP, |x, y| map.tile(x, y).is_solid())
    }
}

/// Candidate spawn cells near the corners and edge midpoints of the map.
pub fn spawn_candidates(map: &LevelMap) -> [(i32, i32); 6] {
    let (w, h) = (map.width(), map.height());
    [
        (w - 2, h - 2),
        (2, h - 2),
        (w - 2, 2),
        (2, 2),
        (w / 2, 2),
        (w / 2, h - 2),
    ]
}

/// Centre of the walkable candidate farthest from `player`. Falls back to
/// the farthest floor cell of the whole map when no candidate is walkable.
pub fn farthest_spawn(map: &LevelMap, player: Vec2) -> Vec2 {
    let best = spawn_candidates(map)
        .into_iter()
        .filter(|&(x, y)| map.is_walkable(x, y))
        .map(|(x, y)| cell_center(x, y))
        .max_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));

    if let Some(pos) = best {
        return pos;
    }

    warn!("no spawn candidate is walkable; scanning the whole map");
    map.cells()
        .filter(|&(_, _, t)| !t.is_solid())
        .map(|(x, y, _)| cell_center(x, y))
        .max_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
        .unwrap_or(player)
}
