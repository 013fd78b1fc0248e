//! Built-in enemy and NPC movement
//!
//! Hostile enemies that can see the player close in greedily and attack
//! once adjacent; NPCs that are not tied to a post drift around town.

use crate::collab::{AttackRequest, CombatAI, EnemyTurn, NpcTurn};
use crate::map::{Map, Pos, has_line_of_sight};
use crate::rng::GameRng;

use super::Enemy;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Chance per tick that a free-roaming NPC takes a step
const NPC_WANDER_CHANCE: f64 = 0.25;

/// Fallback AI used when no richer one is registered
#[derive(Debug, Clone, Copy)]
pub struct BasicAi {
    /// Enemies farther than this (Chebyshev) ignore the player
    pub chase_radius: i32,
}

impl Default for BasicAi {
    fn default() -> Self {
        Self { chase_radius: 8 }
    }
}

impl CombatAI for BasicAi {
    fn act_all_enemies(&mut self, turn: EnemyTurn<'_>) -> Vec<AttackRequest> {
        let EnemyTurn {
            map,
            player,
            enemies,
            rng,
        } = turn;
        let mut attacks = Vec::new();

        for idx in 0..enemies.len() {
            let enemy = &enemies[idx];
            if !enemy.can_act() {
                continue;
            }
            if enemy.is_adjacent(player) {
                attacks.push(AttackRequest { attacker: enemy.id });
                continue;
            }
            if enemy.pos.distance(player) > self.chase_radius
                || !has_line_of_sight(map, enemy.pos, player)
            {
                continue;
            }
            if let Some(next) = step_toward(map, player, enemies, idx, rng) {
                enemies[idx].pos = next;
            }
        }
        attacks
    }

    fn act_settlement_npcs(&mut self, turn: NpcTurn<'_>) {
        let NpcTurn {
            map,
            player,
            npcs,
            rng,
            ..
        } = turn;

        for idx in 0..npcs.len() {
            if npcs[idx].role.is_stationary() || !rng.chance(NPC_WANDER_CHANCE) {
                continue;
            }
            let (dx, dy) = DIRECTIONS[rng.int(0, 7) as usize];
            let target = npcs[idx].pos.offset(dx, dy);
            if map.is_walkable(target) && target != player && !npcs.iter().any(|n| n.pos == target)
            {
                npcs[idx].pos = target;
            }
        }
    }
}

/// Walkable, not the player, no living enemy there
fn is_free(map: &Map, player: Pos, enemies: &[Enemy], pos: Pos) -> bool {
    map.is_walkable(pos)
        && pos != player
        && !enemies.iter().any(|e| !e.is_dead() && e.pos == pos)
}

/// Next tile for enemy `idx` toward `target`, sidestepping when blocked
fn step_toward(
    map: &Map,
    target: Pos,
    enemies: &[Enemy],
    idx: usize,
    rng: &mut GameRng,
) -> Option<Pos> {
    let from = enemies[idx].pos;
    let dx = (target.x - from.x).signum();
    let dy = (target.y - from.y).signum();

    let preferred = from.offset(dx, dy);
    if is_free(map, target, enemies, preferred) {
        return Some(preferred);
    }

    let mut alternatives = if dx == 0 {
        [(1, dy), (-1, dy)]
    } else if dy == 0 {
        [(dx, 1), (dx, -1)]
    } else {
        [(dx, 0), (0, dy)]
    };
    if rng.chance(0.5) {
        alternatives.reverse();
    }
    alternatives
        .into_iter()
        .map(|(ax, ay)| from.offset(ax, ay))
        .find(|&pos| is_free(map, target, enemies, pos))
}
