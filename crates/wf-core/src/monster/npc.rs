//! Settlement inhabitants

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::map::Pos;

/// What an NPC does in town
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum NpcRole {
    Villager,
    Merchant,
    Guard,
    Smith,
    Innkeeper,
}

impl NpcRole {
    /// Shopkeepers hold their post
    pub const fn is_stationary(&self) -> bool {
        matches!(self, NpcRole::Merchant | NpcRole::Smith | NpcRole::Innkeeper)
    }
}

/// A peaceful settlement inhabitant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub pos: Pos,
    pub name: String,
    pub role: NpcRole,
}

impl Npc {
    pub fn new(pos: Pos, name: impl Into<String>, role: NpcRole) -> Self {
        Self {
            pos,
            name: name.into(),
            role,
        }
    }
}
