//! Item instances

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::DECAY_MAX;

/// Equipment slot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    Left,
    Right,
    Head,
    Torso,
    Legs,
    Hands,
}

impl Slot {
    /// Weapon/shield slots
    pub const fn is_hand(&self) -> bool {
        matches!(self, Slot::Left | Slot::Right)
    }
}

/// Equipment stats carried by an equippable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equip {
    pub slot: Slot,
    pub attack: f64,
    pub defense: f64,
    /// Wear percentage, 0..=100; the item breaks at 100
    pub decay: f64,
    /// Occupies both hands (always stored in the right hand)
    pub two_handed: bool,
}

impl Equip {
    /// Add wear, clamped to 100
    ///
    /// Returns true only on the call that takes decay to 100.
    pub fn add_decay(&mut self, amount: f64) -> bool {
        if self.is_broken() || amount <= 0.0 {
            return false;
        }
        self.decay = (self.decay + amount).min(DECAY_MAX);
        self.is_broken()
    }

    /// Lower wear, never below 0
    pub fn repair(&mut self, amount: f64) {
        if amount > 0.0 {
            self.decay = (self.decay - amount).max(0.0);
        }
    }

    pub fn is_broken(&self) -> bool {
        self.decay >= DECAY_MAX
    }
}

/// Item kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Equip(Equip),
    Potion { heal: f64 },
    Gold { amount: u32 },
    Other,
}

/// An item in the world or an inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    /// One-handed weapon for the given hand
    pub fn weapon(name: impl Into<String>, attack: f64) -> Self {
        Self::equip(name, Slot::Right, attack, 0.0)
    }

    /// Two-handed weapon
    pub fn two_handed_weapon(name: impl Into<String>, attack: f64) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Equip(Equip {
                slot: Slot::Right,
                attack,
                defense: 0.0,
                decay: 0.0,
                two_handed: true,
            }),
        }
    }

    /// Shield (left hand)
    pub fn shield(name: impl Into<String>, defense: f64) -> Self {
        Self::equip(name, Slot::Left, 0.0, defense)
    }

    /// Armor piece for a body slot
    pub fn armor(name: impl Into<String>, slot: Slot, defense: f64) -> Self {
        Self::equip(name, slot, 0.0, defense)
    }

    /// Generic equippable item
    pub fn equip(name: impl Into<String>, slot: Slot, attack: f64, defense: f64) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Equip(Equip {
                slot,
                attack,
                defense,
                decay: 0.0,
                two_handed: false,
            }),
        }
    }

    pub fn potion(name: impl Into<String>, heal: f64) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Potion { heal },
        }
    }

    pub fn gold(amount: u32) -> Self {
        Self {
            name: "gold".to_string(),
            kind: ItemKind::Gold { amount },
        }
    }

    pub fn equip_stats(&self) -> Option<&Equip> {
        match &self.kind {
            ItemKind::Equip(e) => Some(e),
            _ => None,
        }
    }

    pub fn equip_stats_mut(&mut self) -> Option<&mut Equip> {
        match &mut self.kind {
            ItemKind::Equip(e) => Some(e),
            _ => None,
        }
    }

    pub fn attack_bonus(&self) -> f64 {
        self.equip_stats().map_or(0.0, |e| e.attack)
    }

    pub fn defense_bonus(&self) -> f64 {
        self.equip_stats().map_or(0.0, |e| e.defense)
    }

    pub fn decay(&self) -> f64 {
        self.equip_stats().map_or(0.0, |e| e.decay)
    }

    pub fn is_two_handed(&self) -> bool {
        self.equip_stats().is_some_and(|e| e.two_handed)
    }

    /// Lower wear on an equippable item; other kinds are untouched
    pub fn repair(&mut self, amount: f64) {
        if let Some(e) = self.equip_stats_mut() {
            e.repair(amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decay_breaks_once() {
        let mut item = Item::weapon("sword", 3.0);
        let e = item.equip_stats_mut().unwrap();
        e.decay = 99.0;
        assert!(e.add_decay(5.0));
        assert_eq!(e.decay, 100.0);
        assert!(!e.add_decay(5.0));
        assert_eq!(e.decay, 100.0);
    }

    #[test]
    fn test_repair_floor() {
        let mut item = Item::shield("buckler", 1.0);
        item.equip_stats_mut().unwrap().decay = 10.0;
        item.repair(4.0);
        assert_eq!(item.decay(), 6.0);
        item.repair(50.0);
        assert_eq!(item.decay(), 0.0);
    }

    #[test]
    fn test_two_handed_lives_in_right_hand() {
        let axe = Item::two_handed_weapon("greataxe", 5.0);
        assert!(axe.is_two_handed());
        assert_eq!(axe.equip_stats().unwrap().slot, Slot::Right);
    }

    proptest! {
        #[test]
        fn prop_decay_converges_to_max(step in 0.01f64..30.0) {
            let mut e = Equip {
                slot: Slot::Right,
                attack: 1.0,
                defense: 0.0,
                decay: 0.0,
                two_handed: false,
            };
            let mut breaks = 0;
            for _ in 0..20_000 {
                if e.add_decay(step) {
                    breaks += 1;
                }
                prop_assert!(e.decay <= DECAY_MAX);
                if e.is_broken() {
                    break;
                }
            }
            prop_assert_eq!(e.decay, DECAY_MAX);
            prop_assert_eq!(breaks, 1);
        }
    }
}
