use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use glam::Vec2;
use tracing::debug;

use crate::geometry::{distance_manhattan, CARDINALS};
use crate::map::{cell_center, cell_of, LevelMap};

// =============================================================================
// A* PATHFINDING
// =============================================================================
///
/// A* over the 4-connected floor cells of `map`.
///
/// Returns the cells strictly after `start` up to and including `goal`.
/// Returns `None` if either endpoint is not walkable or no path exists;
/// `Some(vec![])` when `start == goal`.
///
/// # Arguments
/// * `start` - Starting cell (x, y)
/// * `goal` - Target cell (x, y)
/// * `map` - Grid to search; only `Tile::Floor` is passable
pub fn astar(start: (i32, i32), goal: (i32, i32), map: &LevelMap) -> Option<Vec<(i32, i32)>> {
    if !map.is_walkable(start.0, start.1) || !map.is_walkable(goal.0, goal.1) {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }

    // Priority queue: (f_score, g_score, x, y) - use Reverse for min-heap.
    // Ties on f prefer the smaller g, then lower coordinates.
    let mut open: BinaryHeap<Reverse<(i32, i32, i32, i32)>> = BinaryHeap::new();
    let mut came_from: HashMap<(i32, i32), (i32, i32)> = HashMap::new();
    let mut g_score: HashMap<(i32, i32), i32> = HashMap::new();
    let mut closed: HashSet<(i32, i32)> = HashSet::new();

    g_score.insert(start, 0);
    let h = distance_manhattan(start.0, start.1, goal.0, goal.1);
    open.push(Reverse((h, 0, start.0, start.1)));

    while let Some(Reverse((_, g, cx, cy))) = open.pop() {
        let current = (cx, cy);

        // Stale heap entry or already expanded.
        if g > g_score[&current] || !closed.insert(current) {
            continue;
        }

        // Reached goal, reconstruct path
        if current == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }

        for (dx, dy) in CARDINALS {
            let next = (cx + dx, cy + dy);
            if closed.contains(&next) || !map.is_walkable(next.0, next.1) {
                continue;
            }

            let new_g = g + 1;
            let existing_g = g_score.get(&next).copied().unwrap_or(i32::MAX);

            if new_g < existing_g {
                g_score.insert(next, new_g);
                came_from.insert(next, current);
                let f = new_g + distance_manhattan(next.0, next.1, goal.0, goal.1);
                open.push(Reverse((f, new_g, next.0, next.1)));
            }
        }
    }

    None // Frontier exhausted: goal lies in a disconnected region.
}

/// Walk parent pointers back from `goal`, then reverse into start→goal
/// order. The start cell itself is left out.
fn reconstruct_path(
    came_from: &HashMap<(i32, i32), (i32, i32)>,
    start: (i32, i32),
    goal: (i32, i32),
) -> Vec<(i32, i32)> {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}

/// Shortest walkable route between two world positions, as cell-centre
/// waypoints. Empty when unreachable, when either endpoint is inside a solid
/// cell, or when both positions share a cell.
pub fn find_path(map: &LevelMap, from: Vec2, to: Vec2) -> Vec<Vec2> {
    let start = cell_of(from);
    let goal = cell_of(to);
    match astar(start, goal, map) {
        Some(cells) => cells.into_iter().map(|(x, y)| cell_center(x, y)).collect(),
        None => {
            debug!(?start, ?goal, "no path");
            Vec::new()
        }
    }
}
