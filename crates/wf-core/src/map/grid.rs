//! Map grid and tile coordinates

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Tile;

/// Integer tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance (king moves)
    pub fn distance(self, other: Pos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Squared euclidean distance
    pub fn distance_sq(self, other: Pos) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// True if the two positions touch (including diagonals) and differ
    pub fn is_adjacent(self, other: Pos) -> bool {
        self != other && self.distance(other) <= 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A 2D grid of tiles, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Map {
    /// Create a map filled with one tile
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    /// Walkable floor surrounded by a wall border
    pub fn walled_room(width: usize, height: usize) -> Self {
        let mut map = Self::filled(width, height, Tile::Floor);
        for x in 0..width {
            map.tiles[x] = Tile::Wall;
            map.tiles[(height.saturating_sub(1)) * width + x] = Tile::Wall;
        }
        for y in 0..height {
            map.tiles[y * width] = Tile::Wall;
            map.tiles[y * width + width.saturating_sub(1)] = Tile::Wall;
        }
        map
    }

    /// Build a map from text rows using tile symbols
    ///
    /// Unknown characters become walls; short rows are padded with walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut map = Self::filled(width, height, Tile::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                map.tiles[y * width + x] = Tile::from_symbol(c).unwrap_or(Tile::Wall);
            }
        }
        map
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid dimensions as (width, height)
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Check if position is within map bounds
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    /// Tile at position, None when out of bounds
    pub fn get(&self, pos: Pos) -> Option<Tile> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// Replace the tile at position; out-of-bounds writes are ignored
    pub fn set(&mut self, pos: Pos, tile: Tile) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = tile;
        }
    }

    /// Check if a position can be walked on
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(|t| t.is_walkable())
    }

    /// Check if a position blocks sight (out of bounds blocks)
    pub fn blocks_sight(&self, pos: Pos) -> bool {
        self.get(pos).is_none_or(|t| t.blocks_sight())
    }

    /// First position holding `tile`, scanning rows top to bottom
    pub fn find(&self, tile: Tile) -> Option<Pos> {
        self.tiles
            .iter()
            .position(|t| *t == tile)
            .map(|i| Pos::new((i % self.width) as i32, (i / self.width) as i32))
    }

    /// First walkable position, scanning rows top to bottom
    pub fn first_walkable(&self) -> Option<Pos> {
        self.tiles
            .iter()
            .position(|t| t.is_walkable())
            .map(|i| Pos::new((i % self.width) as i32, (i / self.width) as i32))
    }

    /// Render as text rows (debugging and tests)
    pub fn to_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(Tile::symbol).collect())
            .collect()
    }
}
