//! Level boards
//!
//! A level file is a grid of tile codes, one row per line, separated by
//! whitespace. The grid is kept so a board can be rebuilt on reset; the board
//! lays the grid out as bricks across the top part of the play area.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::state::MovingBody;
use crate::consts::LEVEL_COUNT;

/// Tile codes found in level files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    /// Indestructible
    Solid,
    Blue,
    Green,
    Yellow,
    Orange,
}

impl TileType {
    /// Map a level-file code to a tile; codes past the known range are empty
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => TileType::Solid,
            2 => TileType::Blue,
            3 => TileType::Green,
            4 => TileType::Yellow,
            5 => TileType::Orange,
            _ => TileType::Empty,
        }
    }

    pub fn is_solid(&self) -> bool {
        *self == TileType::Solid
    }

    pub fn color(&self) -> Vec3 {
        match self {
            TileType::Solid => Vec3::new(0.8, 0.8, 0.7),
            TileType::Blue => Vec3::new(0.2, 0.6, 1.0),
            TileType::Green => Vec3::new(0.0, 0.7, 0.0),
            TileType::Yellow => Vec3::new(0.8, 0.8, 0.4),
            TileType::Orange => Vec3::new(1.0, 0.5, 0.0),
            TileType::Empty => crate::WHITE,
        }
    }
}

/// Parsed level file: a rectangular grid of tile codes (row-major)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGrid {
    rows: Vec<Vec<u32>>,
}

impl LevelGrid {
    /// Parse level text. Malformed input (non-integer tokens, ragged rows)
    /// yields an empty grid.
    pub fn parse(text: &str) -> Self {
        let mut rows: Vec<Vec<u32>> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row: Result<Vec<u32>, _> = line.split_whitespace().map(str::parse).collect();
            match row {
                Ok(row) => rows.push(row),
                Err(e) => {
                    log::warn!("Level line {}: {} - ignoring level", line_no + 1, e);
                    return Self::default();
                }
            }
        }

        if let Some(first) = rows.first() {
            let width = first.len();
            if rows.iter().any(|r| r.len() != width) {
                log::warn!("Level rows have differing lengths - ignoring level");
                return Self::default();
            }
        }

        Self { rows }
    }

    /// Read and parse a level file
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }
}

/// One cell of a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub tile: TileType,
    pub body: MovingBody,
}

impl Brick {
    pub fn is_solid(&self) -> bool {
        self.body.is_solid
    }

    pub fn is_destroyed(&self) -> bool {
        self.body.destroyed
    }
}

/// A level laid out as bricks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelBoard {
    name: String,
    grid: LevelGrid,
    /// Area the grid is stretched over
    width: f32,
    height: f32,
    /// Row-major, empty cells omitted
    bricks: Vec<Brick>,
}

impl LevelBoard {
    pub fn new(name: impl Into<String>, grid: LevelGrid, width: f32, height: f32) -> Self {
        let mut board = Self {
            name: name.into(),
            grid,
            width,
            height,
            bricks: Vec::new(),
        };
        board.reset();
        board
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn bricks_mut(&mut self) -> &mut [Brick] {
        &mut self.bricks
    }

    /// Rebuild every brick from the grid (nothing destroyed)
    pub fn reset(&mut self) {
        self.bricks.clear();
        if self.grid.is_empty() || self.grid.width() == 0 {
            return;
        }

        let unit = Vec2::new(
            self.width / self.grid.width() as f32,
            self.height / self.grid.height() as f32,
        );

        for (y, row) in self.grid.rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let tile = TileType::from_code(code);
                if tile == TileType::Empty {
                    continue;
                }
                let position = Vec2::new(unit.x * x as f32, unit.y * y as f32);
                let mut body = MovingBody::new(position, unit).with_color(tile.color());
                body.is_solid = tile.is_solid();
                self.bricks.push(Brick { tile, body });
            }
        }
    }

    /// Breakable bricks still standing
    pub fn remaining(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| !b.is_solid() && !b.is_destroyed())
            .count()
    }

    /// Complete once every non-solid brick is destroyed
    pub fn is_completed(&self) -> bool {
        self.remaining() == 0
    }
}

/// File names of the level set, in selection order
pub const LEVEL_FILES: [&str; LEVEL_COUNT] = ["one.lvl", "two.lvl", "three.lvl", "four.lvl"];

const BUILTIN_LEVELS: [&str; LEVEL_COUNT] = [
    include_str!("../../levels/one.lvl"),
    include_str!("../../levels/two.lvl"),
    include_str!("../../levels/three.lvl"),
    include_str!("../../levels/four.lvl"),
];

/// The level set compiled into the binary
pub fn builtin_levels(width: f32, height: f32) -> Vec<LevelBoard> {
    LEVEL_FILES
        .iter()
        .zip(BUILTIN_LEVELS)
        .map(|(name, text)| LevelBoard::new(*name, LevelGrid::parse(text), width, height))
        .collect()
}

/// Load the level set from `dir`, falling back to the built-in level for any
/// file that cannot be read
pub fn load_levels(dir: Option<&Path>, width: f32, height: f32) -> Vec<LevelBoard> {
    let Some(dir) = dir else {
        return builtin_levels(width, height);
    };

    LEVEL_FILES
        .iter()
        .zip(BUILTIN_LEVELS)
        .map(|(name, builtin)| {
            let path = dir.join(name);
            let grid = match LevelGrid::load(&path) {
                Ok(grid) => {
                    log::info!("Loaded level {} ({}x{})", path.display(), grid.width(), grid.height());
                    grid
                }
                Err(e) => {
                    log::warn!("Failed to read {}: {} - using built-in level", path.display(), e);
                    LevelGrid::parse(builtin)
                }
            };
            LevelBoard::new(*name, grid, width, height)
        })
        .collect()
}
