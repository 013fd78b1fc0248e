//! AI contract

use crate::map::{Map, Pos};
use crate::monster::{Enemy, EnemyId, Npc};
use crate::rng::GameRng;

/// What enemy AI may see and touch during its turn
pub struct EnemyTurn<'a> {
    pub map: &'a Map,
    pub player: Pos,
    /// Living enemies; AI moves them in place
    pub enemies: &'a mut [Enemy],
    pub rng: &'a mut GameRng,
}

/// What settlement AI may see and touch during its tick
pub struct NpcTurn<'a> {
    pub map: &'a Map,
    pub player: Pos,
    pub npcs: &'a mut [Npc],
    pub rng: &'a mut GameRng,
    /// Settlement tick counter
    pub tick: u64,
}

/// An enemy asking to strike the player
///
/// Requests are resolved in order through the same combat code as player
/// attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRequest {
    pub attacker: EnemyId,
}

/// Enemy and NPC behavior
pub trait CombatAI {
    /// Move every enemy and collect the attacks they want to make
    fn act_all_enemies(&mut self, turn: EnemyTurn<'_>) -> Vec<AttackRequest>;

    /// Move settlement NPCs; no-op unless overridden
    fn act_settlement_npcs(&mut self, _turn: NpcTurn<'_>) {}
}
