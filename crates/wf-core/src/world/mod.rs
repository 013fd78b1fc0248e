//! World-level state
//!
//! Simulation mode, overworld sites, the in-game clock and options.

mod clock;
mod options;

pub use clock::{ClockTime, GameClock};
pub use options::{CoreOptions, OptionsError};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::MAX_DEPTH;
use crate::map::Pos;

/// Top-level simulation mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Mode {
    #[default]
    World,
    Settlement,
    Dungeon,
}

/// What an overworld site leads into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SiteKind {
    Settlement,
    Dungeon,
}

impl SiteKind {
    /// Mode entered through a site of this kind
    pub const fn mode(&self) -> Mode {
        match self {
            SiteKind::Settlement => Mode::Settlement,
            SiteKind::Dungeon => Mode::Dungeon,
        }
    }
}

/// An overworld entrance recorded by the world generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub pos: Pos,
    pub kind: SiteKind,
    pub name: String,
    /// Recorded difficulty; dungeons derive their depth from it
    pub difficulty: u32,
}

impl Site {
    pub fn new(pos: Pos, kind: SiteKind, name: impl Into<String>, difficulty: u32) -> Self {
        Self {
            pos,
            kind,
            name: name.into(),
            difficulty,
        }
    }

    /// Dungeon depth generated behind this entrance
    pub fn depth(&self) -> u32 {
        self.difficulty.clamp(1, MAX_DEPTH)
    }
}

/// Description of the area a snapshot belongs to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DungeonInfo {
    pub name: String,
    pub difficulty: u32,
}

impl From<&Site> for DungeonInfo {
    fn from(site: &Site) -> Self {
        Self {
            name: site.name.clone(),
            difficulty: site.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_clamped() {
        let shallow = Site::new(Pos::new(0, 0), SiteKind::Dungeon, "Barrow", 0);
        let deep = Site::new(Pos::new(0, 0), SiteKind::Dungeon, "Abyss", 40);
        let mid = Site::new(Pos::new(0, 0), SiteKind::Dungeon, "Crypt", 4);
        assert_eq!(shallow.depth(), 1);
        assert_eq!(deep.depth(), MAX_DEPTH);
        assert_eq!(mid.depth(), 4);
    }

    #[test]
    fn test_site_kind_mode() {
        assert_eq!(SiteKind::Settlement.mode(), Mode::Settlement);
        assert_eq!(SiteKind::Dungeon.mode(), Mode::Dungeon);
    }
}
