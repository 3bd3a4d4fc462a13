use glam::Vec2;
use mazekiller::map::{cell_of, LevelMap};
use mazekiller::pathfinding::prelude::*;

fn open_grid(size: usize) -> LevelMap {
    LevelMap::bordered(size, size).unwrap()
}

fn is_adjacent(a: (i32, i32), b: (i32, i32)) -> bool {
    (a.0 - b.0).abs() + (a.1 - b.1).abs() == 1
}

// ── A* ────────────────────────────────────────────────────────────────────────

#[test]
fn astar_same_start_and_goal_is_empty() {
    let map = open_grid(5);
    assert_eq!(astar((2, 2), (2, 2), &map), Some(vec![]));
}

#[test]
fn astar_straight_line() {
    let map = open_grid(10);
    let path = astar((1, 1), (5, 1), &map).unwrap();
    assert_eq!(path, vec![(2, 1), (3, 1), (4, 1), (5, 1)]);
}

#[test]
fn astar_wall_goal_returns_none() {
    let map = open_grid(6);
    assert_eq!(astar((1, 1), (0, 0), &map), None);
    assert_eq!(astar((0, 0), (1, 1), &map), None);
}

#[test]
fn astar_disconnected_returns_none() {
    let map = LevelMap::from_rows(&[
        "#######",
        "#..#..#",
        "#..#..#",
        "#######",
    ])
    .unwrap();
    assert_eq!(astar((1, 1), (5, 2), &map), None);
}

#[test]
fn astar_navigates_around_wall() {
    let map = LevelMap::from_rows(&[
        "#######",
        "#.....#",
        "#.###.#",
        "#.....#",
        "#######",
    ])
    .unwrap();
    let path = astar((1, 2), (5, 2), &map).unwrap();
    assert_eq!(path.last(), Some(&(5, 2)));
    assert!(path.iter().all(|&(x, y)| map.is_walkable(x, y)));
    assert_eq!(path.len(), 6);
}

#[test]
fn astar_does_not_walk_through_doors() {
    let map = LevelMap::from_rows(&[
        "#####",
        "#.D.#",
        "#####",
    ])
    .unwrap();
    assert_eq!(astar((1, 1), (3, 1), &map), None);
}

// ── World-space routes ────────────────────────────────────────────────────────

#[test]
fn open_grid_corner_to_corner() {
    let map = open_grid(16);
    let path = find_path(&map, Vec2::new(1.5, 1.5), Vec2::new(14.5, 14.5));

    assert!(path.len() >= 26, "path too short: {}", path.len());
    assert_eq!(path.last().map(|&p| cell_of(p)), Some((14, 14)));
    assert!(is_adjacent((1, 1), cell_of(path[0])));
    for pair in path.windows(2) {
        assert!(is_adjacent(cell_of(pair[0]), cell_of(pair[1])));
    }
    assert!(path.iter().all(|&p| map.is_walkable_at(p)));
}

#[test]
fn waypoints_are_cell_centres() {
    let map = open_grid(8);
    let path = find_path(&map, Vec2::new(1.2, 1.9), Vec2::new(4.7, 1.1));
    assert_eq!(path, vec![Vec2::new(2.5, 1.5), Vec2::new(3.5, 1.5), Vec2::new(4.5, 1.5)]);
}

#[test]
fn route_into_wall_is_empty() {
    let map = open_grid(8);
    assert!(find_path(&map, Vec2::new(1.5, 1.5), Vec2::new(0.5, 0.5)).is_empty());
}

#[test]
fn route_within_one_cell_is_empty() {
    let map = open_grid(8);
    assert!(find_path(&map, Vec2::new(3.1, 3.1), Vec2::new(3.9, 3.9)).is_empty());
}

// ── Reactive stepper ──────────────────────────────────────────────────────────

#[test]
fn reactive_steps_straight_when_clear() {
    let map = open_grid(10);
    let step = reactive_step(&map, Vec2::new(2.5, 2.5), Vec2::new(7.5, 2.5));
    assert!((step - Vec2::new(3.0, 2.5)).length() < 1e-5);
}

#[test]
fn reactive_sidesteps_a_wall() {
    let map = LevelMap::from_rows(&[
        "#######",
        "#.....#",
        "#..#..#",
        "#.....#",
        "#######",
    ])
    .unwrap();
    let from = Vec2::new(2.7, 2.5);
    let step = reactive_step(&map, from, Vec2::new(5.5, 2.5));
    assert_ne!(step, from);
    assert!(map.is_walkable_at(step));
    assert!((step.distance(from) - STEP_LENGTH).abs() < 1e-5);
}

#[test]
fn reactive_at_goal_stays_put() {
    let map = open_grid(5);
    let from = Vec2::new(2.5, 2.5);
    let goal = Vec2::new(2.55, 2.5);
    assert_eq!(reactive_step(&map, from, goal), from);
    assert!(PathStrategy::Reactive.plan(&map, from, goal).is_empty());
}

#[test]
fn reactive_never_steps_into_walls() {
    let map = LevelMap::from_rows(&["###", "#.#", "###"]).unwrap();
    let from = Vec2::new(1.5, 1.5);
    for goal in [Vec2::new(5.0, 5.0), Vec2::new(-3.0, 1.5), Vec2::new(1.5, -4.0)] {
        assert!(map.is_walkable_at(reactive_step(&map, from, goal)));
    }
}

// ── Strategy selection ────────────────────────────────────────────────────────

#[test]
fn strategy_intervals() {
    assert_eq!(PathStrategy::default(), PathStrategy::ShortestPath);
    assert_eq!(PathStrategy::ShortestPath.recompute_interval(), 0.5);
    assert_eq!(PathStrategy::Reactive.recompute_interval(), 0.3);
}

#[test]
fn strategy_plans_differ() {
    let map = open_grid(10);
    let (from, to) = (Vec2::new(1.5, 1.5), Vec2::new(6.5, 1.5));
    assert_eq!(PathStrategy::ShortestPath.plan(&map, from, to).len(), 5);
    assert_eq!(PathStrategy::Reactive.plan(&map, from, to), vec![Vec2::new(2.0, 1.5)]);
}

#[test]
fn strategy_reads_snake_case() {
    let s: PathStrategy = serde_json::from_str("\"reactive\"").unwrap();
    assert_eq!(s, PathStrategy::Reactive);
    let s: PathStrategy = serde_json::from_str("\"shortest_path\"").unwrap();
    assert_eq!(s, PathStrategy::ShortestPath);
}
