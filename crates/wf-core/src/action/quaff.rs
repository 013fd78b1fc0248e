//! Inventory actions: drinking potions and equipping items

use super::ActionResult;
use crate::collab::Severity;
use crate::gameloop::GameSession;
use crate::player::EquipError;

impl GameSession {
    /// Drink the potion at an inventory index
    pub(crate) fn do_quaff(&mut self, idx: usize) -> ActionResult {
        match self.state.player.quaff(idx) {
            Some((name, healed)) => {
                self.log(
                    format!("You drink the {} and recover {:.1} HP.", name, healed),
                    Severity::Info,
                );
                ActionResult::Success
            }
            None => {
                self.log("You have no potion there.", Severity::Info);
                ActionResult::NoTime
            }
        }
    }

    /// Equip the item at an inventory index
    pub(crate) fn do_equip(&mut self, idx: usize) -> ActionResult {
        let name = self.state.player.inventory.get(idx).map(|i| i.name.clone());
        match self.state.player.equip_from_inventory(idx) {
            Ok(()) => {
                self.log(format!("You equip the {}.", name.unwrap_or_default()), Severity::Info);
                ActionResult::Success
            }
            Err(EquipError::NotEquippable(item)) => {
                self.log(format!("You cannot equip the {}.", item.name), Severity::Info);
                ActionResult::NoTime
            }
            Err(EquipError::NoItem(_)) => {
                self.log("You have nothing there.", Severity::Info);
                ActionResult::NoTime
            }
        }
    }
}
