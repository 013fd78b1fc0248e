//! External collaborators
//!
//! Map generation, enemy/NPC AI, loot and the UI observer are supplied from
//! outside the core through the traits here. Each has a built-in fallback
//! that keeps the game playable when nothing richer is registered.

mod ai;
mod generator;
mod loot;
mod observer;

pub use ai::{AttackRequest, CombatAI, EnemyTurn, NpcTurn};
pub use generator::{FlatGenerator, GenRequest, Generated, GenerationError, WorldGenerator};
pub use loot::{LootSource, LootTable, NoLoot};
pub use observer::{GameObserver, NullObserver, Severity};

use crate::dungeon::{MemoryStore, SnapshotStore};
use crate::monster::BasicAi;

/// The set of collaborators a session calls into
pub struct Collaborators {
    pub generator: Box<dyn WorldGenerator>,
    pub ai: Box<dyn CombatAI>,
    pub loot: Box<dyn LootTable>,
    pub observer: Box<dyn GameObserver>,
    pub store: Box<dyn SnapshotStore>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            generator: Box::new(FlatGenerator),
            ai: Box::new(BasicAi::default()),
            loot: Box::new(NoLoot),
            observer: Box::new(NullObserver),
            store: Box::new(MemoryStore::new()),
        }
    }
}

impl Collaborators {
    pub fn with_generator(mut self, generator: impl WorldGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    pub fn with_ai(mut self, ai: impl CombatAI + 'static) -> Self {
        self.ai = Box::new(ai);
        self
    }

    pub fn with_loot(mut self, loot: impl LootTable + 'static) -> Self {
        self.loot = Box::new(loot);
        self
    }

    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn with_store(mut self, store: impl SnapshotStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }
}

impl core::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collaborators")
            .field("snapshots", &self.store.keys().len())
            .finish_non_exhaustive()
    }
}
