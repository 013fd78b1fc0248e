//! Player melee

use super::{ActionResult, Direction};
use crate::collab::Severity;
use crate::combat::player_attack_enemy;
use crate::dungeon::splatter;
use crate::gameloop::GameSession;

impl GameSession {
    /// Attack the enemy in a direction; rejected if there is none
    pub(crate) fn do_fight(&mut self, dir: Direction) -> ActionResult {
        let (dx, dy) = dir.delta();
        let target = self.state.player.pos.offset(dx, dy);
        match self.state.enemies.iter().position(|e| e.pos == target) {
            Some(idx) => self.attack_enemy(idx),
            None => {
                self.log("You attack thin air.", Severity::Info);
                ActionResult::NoTime
            }
        }
    }

    /// Resolve a swing at the enemy at `idx`
    pub(crate) fn attack_enemy(&mut self, idx: usize) -> ActionResult {
        let overrides = self.overrides();
        let state = &mut self.state;
        let enemy = &mut state.enemies[idx];
        let pos = enemy.pos;
        let report = player_attack_enemy(&mut state.player, enemy, &mut state.rng, overrides);
        tracing::debug!(
            location = %report.location,
            blocked = report.blocked,
            crit = report.crit,
            damage = report.damage,
            "player attack"
        );

        for msg in &report.messages {
            self.log(msg.clone(), Severity::Combat);
        }
        if !report.blocked {
            splatter(&mut self.state.decals, pos, report.crit);
        }
        if report.killed {
            self.kill_enemy(idx);
        }
        ActionResult::Success
    }
}
