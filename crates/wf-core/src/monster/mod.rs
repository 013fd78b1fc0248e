//! Monster system
//!
//! Hostile enemy instances, settlement NPCs and the built-in movement AI.

pub mod ai;
mod enemy;
mod npc;

pub use ai::BasicAi;
pub use enemy::{Enemy, EnemyId, EnemyKind, EnemyStatus};
pub use npc::{Npc, NpcRole};
