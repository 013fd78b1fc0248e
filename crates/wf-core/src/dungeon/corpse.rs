//! Corpses left by dead enemies

use serde::{Deserialize, Serialize};

use crate::map::Pos;
use crate::monster::EnemyKind;
use crate::object::Item;

/// Remains of a killed enemy and what it dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpse {
    pub pos: Pos,
    pub kind: EnemyKind,
    pub loot: Vec<Item>,
    /// Turn of death
    pub turn: u64,
}

/// Evict the oldest corpses beyond `cap`, returning how many were dropped
///
/// Corpses are kept in order of death.
pub fn cap_corpses(corpses: &mut Vec<Corpse>, cap: usize) -> usize {
    let excess = corpses.len().saturating_sub(cap);
    corpses.drain(..excess);
    excess
}
