mod astar;
mod reactive;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::map::LevelMap;

pub mod prelude {
    pub use crate::pathfinding::astar::*;
    pub use crate::pathfinding::reactive::*;
    pub use crate::pathfinding::PathStrategy;
}

/// How the pursuer plans its route.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStrategy {
    /// Full A* search to the player's cell.
    #[default]
    ShortestPath,
    /// Cheap greedy stepping; gets stuck in dead ends.
    Reactive,
}

impl PathStrategy {
    /// Seconds between route recomputations.
    pub fn recompute_interval(self) -> f32 {
        match self {
            PathStrategy::ShortestPath => 0.5,
            PathStrategy::Reactive => 0.3,
        }
    }

    /// Plan a route from `from` to `to`. An empty result means "no move
    /// available right now".
    pub fn plan(self, map: &LevelMap, from: Vec2, to: Vec2) -> Vec<Vec2> {
        match self {
            PathStrategy::ShortestPath => astar::find_path(map, from, to),
            PathStrategy::Reactive => {
                let step = reactive::reactive_step(map, from, to);
                if step == from { Vec::new() } else { vec![step] }
            }
        }
    }
}
