//! Map system
//!
//! Contains the tile grid, tile types, coordinates and the field-of-view cache.

mod grid;
mod tile;
pub mod visibility;

pub use grid::{Map, Pos};
pub use tile::{Tile, TileFlags};
pub use visibility::{Recompute, VisibilityCache, has_line_of_sight};
