use mazekiller::error::Error;
use mazekiller::levels::*;
use mazekiller::map::{cell_of, Tile};
use mazekiller::pathfinding::prelude::astar;
use serde_json::json;

#[test]
fn builtin_table_has_five_levels() {
    let table = LevelTable::builtin().unwrap();
    assert_eq!(table.len(), 5);
    assert!(!table.is_empty());
}

#[test]
fn door_costs_rise_per_level() {
    let table = LevelTable::builtin().unwrap();
    let costs: Vec<u32> = (1..=5).map(|n| table.load(n).unwrap().door_cost).collect();
    assert_eq!(costs, vec![50, 80, 120, 150, 200]);
}

#[test]
fn pursuer_rules_per_level() {
    let table = LevelTable::builtin().unwrap();
    assert_eq!(table.load(1).unwrap().spawn, SpawnRule::Inactive);
    assert_eq!(table.load(2).unwrap().spawn, SpawnRule::Fixed([22, 22]));
    for n in 3..=5 {
        assert_eq!(table.load(n).unwrap().spawn, SpawnRule::Farthest);
    }
}

#[test]
fn every_level_is_enclosed_with_one_reachable_door() {
    let table = LevelTable::builtin().unwrap();
    for n in 1..=table.len() {
        let level = table.load(n).unwrap();
        let map = &level.map;
        assert_eq!(level.number, n);
        assert!(map.is_walkable_at(level.player_start));

        let w = map.width();
        let h = map.height();
        let mut doors = Vec::new();
        for (x, y, tile) in map.cells() {
            if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                assert!(tile.is_solid(), "level {n}: open border at ({x}, {y})");
            }
            if tile == Tile::Door {
                doors.push((x, y));
            }
        }
        assert_eq!(doors.len(), 1, "level {n}");

        let start = cell_of(level.player_start);
        let (dx, dy) = doors[0];
        let reachable = [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .iter()
            .map(|&(ox, oy)| (dx + ox, dy + oy))
            .filter(|&(x, y)| map.is_walkable(x, y))
            .any(|goal| astar(start, goal, map).is_some());
        assert!(reachable, "level {n}: door unreachable");
    }
}

#[test]
fn every_floor_cell_is_connected() {
    let table = LevelTable::builtin().unwrap();
    for n in 1..=table.len() {
        let level = table.load(n).unwrap();
        let start = cell_of(level.player_start);
        for (x, y, tile) in level.map.cells() {
            if tile == Tile::Floor {
                assert!(astar(start, (x, y), &level.map).is_some(), "level {n}: ({x}, {y}) cut off");
            }
        }
    }
}

#[test]
fn out_of_range_numbers_fail() {
    let table = LevelTable::builtin().unwrap();
    assert!(matches!(table.load(0), Err(Error::Level { level: 0, .. })));
    assert!(matches!(table.load(6), Err(Error::Level { level: 6, .. })));
}

#[test]
fn empty_table_is_rejected() {
    assert!(matches!(
        LevelTable::from_json_str(r#"{"levels": []}"#),
        Err(Error::Level { .. })
    ));
}

#[test]
fn start_inside_wall_is_rejected() {
    let json = json!({"levels": [{
        "name": "bad",
        "rows": ["###", "#.#", "###"],
        "player_start": [0.5, 0.5],
        "door_cost": 10,
        "pursuer": "inactive"
    }]});
    let table = LevelTable::from_json_str(&json.to_string()).unwrap();
    assert!(matches!(table.load(1), Err(Error::Level { level: 1, .. })));
}

#[test]
fn bad_grid_surfaces_map_error() {
    let json = json!({"levels": [{
        "name": "ragged",
        "rows": ["###", "#."],
        "player_start": [1.5, 1.5],
        "door_cost": 10,
        "pursuer": "farthest"
    }]});
    let table = LevelTable::from_json_str(&json.to_string()).unwrap();
    assert!(matches!(table.load(1), Err(Error::Map(_))));
}

#[test]
fn fixed_spawn_reads_from_json() {
    let json = json!({"levels": [{
        "name": "fixed",
        "rows": ["#####", "#...#", "#####"],
        "player_start": [1.5, 1.5],
        "door_cost": 0,
        "pursuer": {"fixed": [3, 1]}
    }]});
    let level = LevelTable::from_json_str(&json.to_string()).unwrap().load(1).unwrap();
    assert_eq!(level.spawn, SpawnRule::Fixed([3, 1]));
}
