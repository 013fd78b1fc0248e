//! Spatial occupancy index

use hashbrown::HashMap;

use crate::map::Pos;
use crate::monster::{Enemy, EnemyId, Npc};

/// What stands on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Enemy(EnemyId),
    /// Index into the settlement NPC list
    Npc(usize),
}

/// Position lookup for the creatures on the current map
///
/// Rebuilt wholesale; between rebuilds it may lag behind the entity lists.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: HashMap<Pos, Occupant>,
    rebuilds: u64,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index living enemies
    pub fn rebuild_enemies(&mut self, enemies: &[Enemy]) {
        self.cells.clear();
        for enemy in enemies.iter().filter(|e| !e.is_dead()) {
            self.cells.insert(enemy.pos, Occupant::Enemy(enemy.id));
        }
        self.rebuilds += 1;
    }

    /// Index settlement NPCs
    pub fn rebuild_npcs(&mut self, npcs: &[Npc]) {
        self.cells.clear();
        for (idx, npc) in npcs.iter().enumerate() {
            self.cells.insert(npc.pos, Occupant::Npc(idx));
        }
        self.rebuilds += 1;
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn get(&self, pos: Pos) -> Option<Occupant> {
        self.cells.get(&pos).copied()
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.cells.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of rebuilds so far (diagnostics)
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}
