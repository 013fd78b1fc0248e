//! Player character: stats, equipment, inventory and status counters

mod equipment;
mod you;

pub use equipment::{EquipError, Equipment};
pub use you::{LevelUp, Player, PlayerStatus, next_requirement};
