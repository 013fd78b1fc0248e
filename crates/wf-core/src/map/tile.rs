//! Map tile types

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

bitflags! {
    /// Tile property flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TileFlags: u8 {
        const WALKABLE = 0x01;
        const BLOCKS_SIGHT = 0x02;
        /// Overworld site entrance
        const MARKER = 0x04;
    }
}

/// Tile/terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Wall = 0,
    Floor = 1,
    Door = 2,
    StairsUp = 3,
    StairsDown = 4,
    Window = 5,
    Grass = 6,
    Water = 7,
    Road = 8,
    Gate = 9,
    SettlementMarker = 10,
    DungeonMarker = 11,
}

impl Tile {
    /// Property flags for this tile
    pub const fn flags(&self) -> TileFlags {
        match self {
            Tile::Wall => TileFlags::BLOCKS_SIGHT,
            Tile::Window | Tile::Water => TileFlags::empty(),
            Tile::Floor
            | Tile::Door
            | Tile::StairsUp
            | Tile::StairsDown
            | Tile::Grass
            | Tile::Road
            | Tile::Gate => TileFlags::WALKABLE,
            Tile::SettlementMarker | Tile::DungeonMarker => {
                TileFlags::WALKABLE.union(TileFlags::MARKER)
            }
        }
    }

    /// Check if this is passable (can walk through)
    pub const fn is_walkable(&self) -> bool {
        self.flags().contains(TileFlags::WALKABLE)
    }

    /// Check if this tile stops line of sight
    pub const fn blocks_sight(&self) -> bool {
        self.flags().contains(TileFlags::BLOCKS_SIGHT)
    }

    /// Check if this is an overworld site entrance
    pub const fn is_marker(&self) -> bool {
        self.flags().contains(TileFlags::MARKER)
    }

    /// Get the display character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Door => '+',
            Tile::StairsUp => '<',
            Tile::StairsDown => '>',
            Tile::Window => '=',
            Tile::Grass => '"',
            Tile::Water => '~',
            Tile::Road => ':',
            Tile::Gate => 'G',
            Tile::SettlementMarker => 'T',
            Tile::DungeonMarker => 'D',
        }
    }

    /// Parse a display character back into a tile
    pub const fn from_symbol(c: char) -> Option<Tile> {
        Some(match c {
            '#' => Tile::Wall,
            '.' => Tile::Floor,
            '+' => Tile::Door,
            '<' => Tile::StairsUp,
            '>' => Tile::StairsDown,
            '=' => Tile::Window,
            '"' => Tile::Grass,
            '~' => Tile::Water,
            ':' => Tile::Road,
            'G' => Tile::Gate,
            'T' => Tile::SettlementMarker,
            'D' => Tile::DungeonMarker,
            _ => return None,
        })
    }
}
