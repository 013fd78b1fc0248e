//! Persisted state of one settlement or dungeon

use serde::{Deserialize, Serialize};

use super::{Corpse, Decal};
use crate::map::{Map, Pos};
use crate::monster::{Enemy, Npc};
use crate::world::{DungeonInfo, SiteKind};

/// Everything needed to restore an area verbatim on re-entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonSnapshot {
    pub kind: SiteKind,
    pub map: Map,
    pub seen: Vec<Vec<bool>>,
    pub visible: Vec<Vec<bool>>,
    pub enemies: Vec<Enemy>,
    /// Settlement inhabitants; empty for dungeons
    #[serde(default)]
    pub npcs: Vec<Npc>,
    pub corpses: Vec<Corpse>,
    pub decals: Vec<Decal>,
    /// Tile the player arrives on and leaves from
    pub exit_anchor: Pos,
    pub dungeon_info: DungeonInfo,
    pub depth_level: u32,
}

impl DungeonSnapshot {
    /// Living enemies in the snapshot
    pub fn live_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| !e.is_dead()).count()
    }
}
