//! Player movement
//!
//! A move into an enemy attacks it; a move into a wall, water or an NPC is
//! rejected without using a turn. While dazed the direction is scrambled.

use super::{ActionResult, Direction};
use crate::collab::Severity;
use crate::dungeon::Occupant;
use crate::gameloop::GameSession;
use crate::map::Pos;

impl GameSession {
    /// Step the player one tile
    pub(crate) fn do_move(&mut self, dir: Direction) -> ActionResult {
        let dir = self.confdir(dir);
        let (dx, dy) = dir.delta();
        let target = self.state.player.pos.offset(dx, dy);

        if let Some(Occupant::Enemy(id)) = self.occupancy.get(target) {
            if let Some(idx) = self.state.enemy_index(id) {
                return self.attack_enemy(idx);
            }
        }

        // The NPC index lags behind on stride ticks; block on live positions
        if let Some(npc) = self.state.npcs.iter().find(|n| n.pos == target) {
            tracing::info!(?target, npc = %npc.name, "move blocked by npc");
            return ActionResult::NoTime;
        }

        if !self.state.map.is_walkable(target) {
            tracing::info!(?target, "move blocked");
            return ActionResult::NoTime;
        }

        self.state.player.pos = target;
        self.collect_loot(target);
        ActionResult::Success
    }

    /// Scramble the direction while dazed (one draw per move)
    pub(crate) fn confdir(&mut self, dir: Direction) -> Direction {
        if !self.state.player.is_dazed() {
            return dir;
        }
        let idx = self.state.rng.int(0, 7) as usize;
        Direction::ALL[idx]
    }

    /// Pick up whatever the corpses on `pos` dropped
    fn collect_loot(&mut self, pos: Pos) {
        let mut picked = Vec::new();
        for corpse in self.state.corpses.iter_mut().filter(|c| c.pos == pos) {
            picked.append(&mut corpse.loot);
        }
        if picked.is_empty() {
            return;
        }
        let names: Vec<_> = picked.iter().map(|i| i.name.clone()).collect();
        for item in picked {
            self.state.player.add_item(item);
        }
        self.log(format!("You pick up {}.", names.join(", ")), Severity::Info);
        self.collab.observer.on_stats_changed(&self.state.player);
    }
}
