//! Loot contract

use crate::map::Pos;
use crate::monster::EnemyKind;
use crate::object::Item;
use crate::rng::GameRng;

/// What is being looted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LootSource {
    /// A freshly killed enemy
    Enemy {
        kind: EnemyKind,
        level: u32,
        pos: Pos,
    },
}

/// Produces the ordered drop list for a source
pub trait LootTable {
    fn generate(&mut self, source: LootSource, rng: &mut GameRng) -> Vec<Item>;
}

/// Fallback: nothing drops
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoot;

impl LootTable for NoLoot {
    fn generate(&mut self, _source: LootSource, _rng: &mut GameRng) -> Vec<Item> {
        Vec::new()
    }
}
