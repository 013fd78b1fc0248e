//! Player action system
//!
//! Commands a front end hands to [`GameSession::tick`](crate::GameSession::tick)
//! and the handlers that resolve them.

pub mod fight;
pub mod level_change;
pub mod movement;
pub mod quaff;

use serde::{Deserialize, Serialize};

/// Player command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Step one tile; bumping an enemy attacks it
    Move(Direction),
    /// Attack the enemy in a direction
    Fight(Direction),
    /// Let a turn pass
    Rest,
    /// Go into the settlement or dungeon under the player
    Enter,
    /// Leave through the exit anchor
    Exit,
    /// Drink the potion at an inventory index
    Quaff(usize),
    /// Equip the item at an inventory index
    Equip(usize),
}

/// Movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All eight directions, in the order a scrambled move indexes them
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Get the delta (dx, dy) for this direction
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Direction for a unit delta, None for (0, 0) or longer steps
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (1, -1) => Some(Direction::NorthEast),
            (-1, -1) => Some(Direction::NorthWest),
            (1, 1) => Some(Direction::SouthEast),
            (-1, 1) => Some(Direction::SouthWest),
            _ => None,
        }
    }

    /// Vi-key for this direction
    pub const fn key(&self) -> char {
        match self {
            Direction::North => 'k',
            Direction::South => 'j',
            Direction::East => 'l',
            Direction::West => 'h',
            Direction::NorthEast => 'u',
            Direction::NorthWest => 'y',
            Direction::SouthEast => 'n',
            Direction::SouthWest => 'b',
        }
    }

    /// Direction for a vi-key
    pub const fn from_key(c: char) -> Option<Self> {
        match c {
            'k' => Some(Direction::North),
            'j' => Some(Direction::South),
            'l' => Some(Direction::East),
            'h' => Some(Direction::West),
            'u' => Some(Direction::NorthEast),
            'y' => Some(Direction::NorthWest),
            'n' => Some(Direction::SouthEast),
            'b' => Some(Direction::SouthWest),
            _ => None,
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    /// Action resolved, time passes
    Success,
    /// Nothing happened, or a mode transition; no time passes
    NoTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_roundtrip() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(dir));
            assert_eq!(Direction::from_key(dir.key()), Some(dir));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }
}
