// =============================================================================
// LEVELS.RS: Built-in level table
//
// The five stock levels live in `resources/levels.json`, embedded at compile
// time. Each entry carries the tile rows, the player start, the gold needed
// to open the exit door and how the pursuer enters the level.
// =============================================================================

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::map::LevelMap;

/// Level table embedded at compile time (see `LevelTable::builtin`).
pub const DEFAULT_LEVELS: &str = include_str!("../resources/levels.json");

/// How the pursuer is placed when a level starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnRule {
    /// No pursuer on this level.
    Inactive,
    /// Farthest walkable candidate from the player.
    Farthest,
    /// Always the centre of this cell.
    Fixed([i32; 2]),
}

/// One level as written in the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub name: String,
    pub rows: Vec<String>,
    pub player_start: [f32; 2],
    pub door_cost: u32,
    pub pursuer: SpawnRule,
}

/// A level ready to play: the parsed grid plus its parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    /// 1-based level number.
    pub number: u32,
    pub name: String,
    pub map: LevelMap,
    pub player_start: Vec2,
    pub door_cost: u32,
    pub spawn: SpawnRule,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    pub levels: Vec<LevelSpec>,
}

impl LevelTable {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        if table.levels.is_empty() {
            return Err(Error::Level { level: 0, reason: "level table is empty".into() });
        }
        Ok(table)
    }

    /// The stock five-level campaign.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(DEFAULT_LEVELS)
    }

    pub fn len(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Build the playable level for 1-based `number`.
    ///
    /// Fails if the number is out of range, the grid does not parse, or the
    /// player start is not on a floor cell.
    pub fn load(&self, number: u32) -> Result<Level> {
        let spec = number
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .ok_or_else(|| Error::Level {
                level: number,
                reason: format!("only {} levels exist", self.levels.len()),
            })?;

        let map = LevelMap::from_rows(&spec.rows)?;
        let player_start = Vec2::from(spec.player_start);
        if !map.is_walkable_at(player_start) {
            return Err(Error::Level {
                level: number,
                reason: format!("player start {player_start} is not on floor"),
            });
        }

        Ok(Level {
            number,
            name: spec.name.clone(),
            map,
            player_start,
            door_cost: spec.door_cost,
            spawn: spec.pursuer,
        })
    }
}
