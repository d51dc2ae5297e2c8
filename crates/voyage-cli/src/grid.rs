//! # Terrain Grid Maps
//!
//! Plain-text terrain maps, one row per line:
//!
//! ```text
//! ..~~..
//! .##~..
//! ......
//! ```
//!
//! - `.` open ground, step cost 1 per unit of distance.
//! - `~` rough ground (slopes, shallow water), step cost 3 per unit.
//! - `#` impassable.
//!
//! Blank lines are ignored. Every remaining row must have the same width.
//! Coordinates are `(x, y)` with `(0, 0)` at the top-left corner.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use voyage_core::HasNeighbours;

/// Cost multiplier applied when entering rough ground.
pub const ROUGH_MULTIPLIER: f64 = 3.0;

/// Terrain class of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    /// Open ground.
    Open,
    /// Passable at a higher cost.
    Rough,
    /// Impassable.
    Blocked,
}

impl Terrain {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Open),
            '~' => Some(Self::Rough),
            '#' => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Cost multiplier for entering this terrain. `None` if impassable.
    pub fn multiplier(self) -> Option<f64> {
        match self {
            Self::Open => Some(1.0),
            Self::Rough => Some(ROUGH_MULTIPLIER),
            Self::Blocked => None,
        }
    }

    /// Whether a route may enter this terrain.
    pub fn is_passable(self) -> bool {
        self != Self::Blocked
    }
}

/// Grid coordinate, parsed from `X,Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Column, left to right.
    pub x: usize,
    /// Row, top to bottom.
    pub y: usize,
}

impl FromStr for Coord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got \"{s}\""))?;
        let x = x
            .trim()
            .parse()
            .map_err(|e| format!("invalid x coordinate \"{}\": {e}", x.trim()))?;
        let y = y
            .trim()
            .parse()
            .map_err(|e| format!("invalid y coordinate \"{}\": {e}", y.trim()))?;
        Ok(Self { x, y })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Rectangular terrain map.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    width: usize,
    height: usize,
    terrain: Vec<Terrain>,
    diagonal: bool,
}

impl GridMap {
    /// Parse a map from its text form.
    pub fn parse(text: &str) -> Result<Self> {
        let mut width = 0;
        let mut terrain = Vec::new();
        let mut height = 0;

        for (line_no, line) in text.lines().enumerate() {
            let row = line.trim_end();
            if row.is_empty() {
                continue;
            }
            let mut row_width = 0;
            for (col, c) in row.chars().enumerate() {
                let Some(cell) = Terrain::from_char(c) else {
                    bail!("unknown terrain '{c}' at line {}, column {}", line_no + 1, col + 1);
                };
                terrain.push(cell);
                row_width += 1;
            }
            if height == 0 {
                width = row_width;
            } else if row_width != width {
                bail!(
                    "line {} has width {row_width}, expected {width}",
                    line_no + 1
                );
            }
            height += 1;
        }

        if height == 0 {
            bail!("map contains no rows");
        }

        Ok(Self {
            width,
            height,
            terrain,
            diagonal: false,
        })
    }

    /// Read and parse a map file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read map file: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse map file: {}", path.display()))
    }

    /// Allow diagonal moves. Diagonals may not cut past a blocked corner.
    pub fn with_diagonal(mut self, diagonal: bool) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Terrain at `coord`, or `None` outside the map.
    pub fn terrain(&self, coord: Coord) -> Option<Terrain> {
        if coord.x < self.width && coord.y < self.height {
            Some(self.terrain[coord.y * self.width + coord.x])
        } else {
            None
        }
    }

    fn is_passable(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.terrain(Coord {
            x: x as usize,
            y: y as usize,
        })
        .is_some_and(Terrain::is_passable)
    }

    /// Graph node for `coord` on a shared map, or `None` outside the map.
    pub fn cell(map: &Arc<GridMap>, coord: Coord) -> Option<Cell> {
        map.terrain(coord)?;
        Some(Cell {
            map: Arc::clone(map),
            coord,
        })
    }
}

/// A position on a shared [`GridMap`]. Equality and hashing use the
/// coordinate only.
#[derive(Clone)]
pub struct Cell {
    map: Arc<GridMap>,
    coord: Coord,
}

impl Cell {
    /// Position of this cell.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Terrain under this cell.
    pub fn terrain(&self) -> Terrain {
        self.map.terrain[self.coord.y * self.map.width + self.coord.x]
    }

    /// Straight-line distance to `other`.
    pub fn euclidean(&self, other: Coord) -> f64 {
        let dx = self.coord.x.abs_diff(other.x) as f64;
        let dy = self.coord.y.abs_diff(other.y) as f64;
        dx.hypot(dy)
    }

    /// Cost of stepping from `self` into the adjacent cell `to`: the length of
    /// the move times the terrain multiplier of the cell entered.
    pub fn step_cost(&self, to: &Cell) -> f64 {
        let multiplier = to.terrain().multiplier().unwrap_or(f64::INFINITY);
        self.euclidean(to.coord) * multiplier
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.coord)
    }
}

const ORTHOGONAL: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const DIAGONAL: [(isize, isize); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

impl HasNeighbours for Cell {
    type Neighbours = Vec<Cell>;

    fn neighbours(&self) -> Vec<Cell> {
        let map = &self.map;
        let (x, y) = (self.coord.x as isize, self.coord.y as isize);
        let mut out = Vec::with_capacity(8);

        let mut push = |nx: isize, ny: isize| {
            out.push(Cell {
                map: Arc::clone(map),
                coord: Coord {
                    x: nx as usize,
                    y: ny as usize,
                },
            });
        };

        for (dx, dy) in ORTHOGONAL {
            if map.is_passable(x + dx, y + dy) {
                push(x + dx, y + dy);
            }
        }
        if map.diagonal {
            for (dx, dy) in DIAGONAL {
                if map.is_passable(x + dx, y + dy)
                    && map.is_passable(x + dx, y)
                    && map.is_passable(x, y + dy)
                {
                    push(x + dx, y + dy);
                }
            }
        }
        out
    }
}
