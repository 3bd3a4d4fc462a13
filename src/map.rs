// =============================================================================
// MAP.RS: Per-level tile grid
//
// A `LevelMap` is built once when a level loads and then only read. Every
// consumer (ray caster, path finder, pursuer, player movement) borrows the
// same value, so there is no hidden global map state.
// =============================================================================

use glam::Vec2;
use thiserror::Error;

/// A single grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Floor,
    Wall,
    /// Level exit. Solid until the player can pay the door cost.
    Door,
}

impl Tile {
    /// Numeric tile code as stored in level tables (0 floor, 1 wall, 2 door).
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Tile::Floor => 0,
            Tile::Wall => 1,
            Tile::Door => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Tile::Floor),
            1 => Some(Tile::Wall),
            2 => Some(Tile::Door),
            _ => None,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | ' ' => Some(Tile::Floor),
            '#' => Some(Tile::Wall),
            'D' => Some(Tile::Door),
            _ => None,
        }
    }

    /// Anything that is not floor stops rays, agents and line of sight.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != Tile::Floor
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("grid must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unknown tile symbol '{symbol}' at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },
    #[error("unknown tile code {code} at index {index}")]
    UnknownCode { code: u8, index: usize },
    #[error("{width}x{height} grid needs {expected} codes, got {found}")]
    SizeMismatch { width: usize, height: usize, expected: usize, found: usize },
}

/// Immutable rectangular tile grid. Out-of-bounds lookups read as `Tile::Wall`.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl LevelMap {
    /// Parse text rows: `#` wall, `.` (or space) floor, `D` door.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(MapError::RaggedRow { row: y, expected: width, found });
            }
            for (x, symbol) in row.chars().enumerate() {
                let tile = Tile::from_symbol(symbol)
                    .ok_or(MapError::UnknownSymbol { symbol, x, y })?;
                tiles.push(tile);
            }
        }

        Ok(Self { width: width as i32, height: height as i32, tiles })
    }

    /// Build from raw row-major tile codes.
    pub fn from_codes(width: usize, height: usize, codes: &[u8]) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        let expected = width * height;
        if codes.len() != expected {
            return Err(MapError::SizeMismatch { width, height, expected, found: codes.len() });
        }
        let tiles = codes
            .iter()
            .enumerate()
            .map(|(index, &code)| Tile::from_code(code).ok_or(MapError::UnknownCode { code, index }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { width: width as i32, height: height as i32, tiles })
    }

    /// An all-floor grid enclosed by a one-cell wall border.
    pub fn bordered(width: usize, height: usize) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        let mut tiles = vec![Tile::Floor; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    tiles[y * width + x] = Tile::Wall;
                }
            }
        }
        Ok(Self { width: width as i32, height: height as i32, tiles })
    }

    #[inline]
    pub fn width(&self) -> i32 { self.width }
    #[inline]
    pub fn height(&self) -> i32 { self.height }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Tile at integer cell `(x, y)`. Total over all integers.
    #[inline]
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        if !self.in_bounds(x, y) {
            return Tile::Wall;
        }
        self.tiles[(y * self.width + x) as usize]
    }

    /// Tile code at `(x, y)`; 1 outside the grid.
    #[inline]
    pub fn code(&self, x: i32, y: i32) -> u8 {
        self.tile(x, y).code()
    }

    #[inline]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Tile::Floor
    }

    /// Tile under a continuous world position.
    #[inline]
    pub fn tile_at(&self, pos: Vec2) -> Tile {
        let (x, y) = cell_of(pos);
        self.tile(x, y)
    }

    #[inline]
    pub fn is_walkable_at(&self, pos: Vec2) -> bool {
        self.tile_at(pos) == Tile::Floor
    }

    /// Iterate `(x, y, tile)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        self.tiles.iter().enumerate().map(move |(i, &t)| {
            let i = i as i32;
            (i % self.width, i / self.width, t)
        })
    }
}

/// Integer cell containing a continuous position (truncation toward zero,
/// matching how positions were always mapped onto the grid).
#[inline]
pub fn cell_of(pos: Vec2) -> (i32, i32) {
    (pos.x as i32, pos.y as i32)
}

/// World-space centre of cell `(x, y)`.
#[inline]
pub fn cell_center(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}
