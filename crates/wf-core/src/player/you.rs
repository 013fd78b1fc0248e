//! Player state

use serde::{Deserialize, Serialize};

use super::{EquipError, Equipment};
use crate::consts::{
    HP_PER_LEVEL, START_ATTACK, START_DEFENSE, START_HP, XP_FIRST_LEVEL, XP_GROWTH, XP_STEP,
};
use crate::map::Pos;
use crate::object::{Item, ItemKind};
use crate::rng::round1;

/// Transient status counters (turns remaining)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub daze: u32,
    pub bleed: u32,
}

/// A level gained from experience
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUp {
    pub level: u32,
    pub hp_max: f64,
    pub attack_gained: bool,
}

/// Experience needed for the level after one that needed `prev`
pub fn next_requirement(prev: u32) -> u32 {
    (prev as f64 * XP_GROWTH + XP_STEP).floor() as u32
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Pos,
    pub hp: f64,
    pub hp_max: f64,
    pub base_attack: f64,
    pub base_defense: f64,
    pub level: u32,
    /// Experience toward the next level
    pub xp: u32,
    /// Experience needed for the next level
    pub xp_next: u32,
    pub equipment: Equipment,
    pub inventory: Vec<Item>,
    pub status: PlayerStatus,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Pos::default())
    }
}

impl Player {
    /// Fresh level-1 character
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            hp: START_HP,
            hp_max: START_HP,
            base_attack: START_ATTACK,
            base_defense: START_DEFENSE,
            level: 1,
            xp: 0,
            xp_next: XP_FIRST_LEVEL,
            equipment: Equipment::default(),
            inventory: Vec::new(),
            status: PlayerStatus::default(),
        }
    }

    /// Base attack plus equipment
    pub fn attack(&self) -> f64 {
        self.base_attack + self.equipment.attack_bonus()
    }

    /// Base defense plus equipment
    pub fn defense(&self) -> f64 {
        self.base_defense + self.equipment.defense_bonus()
    }

    /// Check if player is dead
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Take damage; HP is kept to one decimal
    pub fn take_damage(&mut self, damage: f64) {
        self.hp = round1(self.hp - damage.max(0.0));
    }

    /// Heal damage, returning the amount actually restored
    pub fn heal(&mut self, amount: f64) -> f64 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0.0)).min(self.hp_max);
        self.hp - before
    }

    pub fn is_dazed(&self) -> bool {
        self.status.daze > 0
    }

    /// Gain experience points, returning every level gained
    pub fn gain_xp(&mut self, amount: u32) -> Vec<LevelUp> {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = Vec::new();
        while self.xp >= self.xp_next {
            self.xp -= self.xp_next;
            self.level += 1;
            self.xp_next = next_requirement(self.xp_next);
            self.hp_max += HP_PER_LEVEL;
            self.hp += HP_PER_LEVEL;
            let attack_gained = self.level % 2 == 0;
            if attack_gained {
                self.base_attack += 1.0;
            }
            gained.push(LevelUp {
                level: self.level,
                hp_max: self.hp_max,
                attack_gained,
            });
        }
        gained
    }

    /// Add an item to the inventory; gold merges into one stack
    pub fn add_item(&mut self, item: Item) {
        if let ItemKind::Gold { amount } = item.kind {
            for held in &mut self.inventory {
                if let ItemKind::Gold { amount: stack } = &mut held.kind {
                    *stack = stack.saturating_add(amount);
                    return;
                }
            }
        }
        self.inventory.push(item);
    }

    /// Total gold carried
    pub fn gold(&self) -> u32 {
        self.inventory
            .iter()
            .map(|i| match i.kind {
                ItemKind::Gold { amount } => amount,
                _ => 0,
            })
            .sum()
    }

    /// Drink the potion at `index`, returning its name and HP restored
    ///
    /// Returns None (and keeps the inventory intact) if the index does not
    /// hold a potion.
    pub fn quaff(&mut self, index: usize) -> Option<(String, f64)> {
        let heal = match self.inventory.get(index)?.kind {
            ItemKind::Potion { heal } => heal,
            _ => return None,
        };
        let potion = self.inventory.remove(index);
        Some((potion.name, self.heal(heal)))
    }

    /// Equip the inventory item at `index`; displaced items go back to the inventory
    pub fn equip_from_inventory(&mut self, index: usize) -> Result<(), EquipError> {
        if index >= self.inventory.len() {
            return Err(EquipError::NoItem(index));
        }
        let item = self.inventory.remove(index);
        match self.equipment.equip(item) {
            Ok(displaced) => {
                self.inventory.extend(displaced);
                Ok(())
            }
            Err(EquipError::NotEquippable(item)) => {
                self.inventory.insert(index, item.clone());
                Err(EquipError::NotEquippable(item))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Slot;

    #[test]
    fn test_requirement_curve() {
        assert_eq!(next_requirement(20), 36);
        assert_eq!(next_requirement(36), 56);
        assert_eq!(next_requirement(56), 82);
    }

    #[test]
    fn test_gain_xp_multiple_levels() {
        let mut p = Player::default();
        let gained = p.gain_xp(60);
        // 60 - 20 = 40, 40 - 36 = 4
        assert_eq!(gained.len(), 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 4);
        assert_eq!(p.xp_next, 56);
        assert_eq!(p.hp_max, START_HP + 4.0);
        assert_eq!(p.base_attack, START_ATTACK + 1.0);
        assert!(gained[0].attack_gained);
        assert!(!gained[1].attack_gained);
    }

    #[test]
    fn test_heal_capped() {
        let mut p = Player::default();
        p.take_damage(5.0);
        assert_eq!(p.heal(10.0), 5.0);
        assert_eq!(p.hp, p.hp_max);
    }

    #[test]
    fn test_gold_stacks() {
        let mut p = Player::default();
        p.add_item(Item::gold(5));
        p.add_item(Item::potion("tonic", 4.0));
        p.add_item(Item::gold(7));
        assert_eq!(p.inventory.len(), 2);
        assert_eq!(p.gold(), 12);
    }

    #[test]
    fn test_quaff() {
        let mut p = Player::default();
        p.hp = 10.0;
        p.add_item(Item::weapon("sword", 2.0));
        p.add_item(Item::potion("tonic", 4.0));
        assert!(p.quaff(0).is_none());
        assert_eq!(p.quaff(1), Some(("tonic".to_string(), 4.0)));
        assert_eq!(p.inventory.len(), 1);
        assert!(p.quaff(5).is_none());
    }

    #[test]
    fn test_attack_and_defense_include_equipment() {
        let mut p = Player::default();
        p.add_item(Item::weapon("sword", 3.0));
        p.add_item(Item::armor("helm", Slot::Head, 2.0));
        p.equip_from_inventory(0).unwrap();
        p.equip_from_inventory(0).unwrap();
        assert!(p.inventory.is_empty());
        assert_eq!(p.attack(), START_ATTACK + 3.0);
        assert_eq!(p.defense(), START_DEFENSE + 2.0);
    }

    #[test]
    fn test_equip_non_equipment_restores_inventory() {
        let mut p = Player::default();
        p.add_item(Item::potion("tonic", 4.0));
        assert!(p.equip_from_inventory(0).is_err());
        assert_eq!(p.inventory.len(), 1);
    }

    #[test]
    fn test_equip_missing_slot() {
        let mut p = Player::default();
        p.add_item(Item::weapon("sword", 2.0));
        assert_eq!(p.equip_from_inventory(3), Err(EquipError::NoItem(3)));
        assert_eq!(p.inventory.len(), 1);
        assert!(p.equipment.right.is_none());

        assert_eq!(p.equip_from_inventory(0), Ok(()));
        assert!(p.inventory.is_empty());
        assert_eq!(p.attack(), START_ATTACK + 2.0);
    }
}
