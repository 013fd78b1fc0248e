//! Worn and wielded equipment
//!
//! A two-handed weapon is a single record in the right hand; while it is
//! wielded the left hand is empty and cannot take an item. Wear is therefore
//! applied to it exactly once per action.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::object::{Item, Slot};

/// Why an item could not be equipped
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquipError {
    /// The item has no equipment stats
    #[error("{} cannot be equipped", .0.name)]
    NotEquippable(Item),
    /// Nothing in the inventory at this index
    #[error("no item at inventory slot {0}")]
    NoItem(usize),
}

/// Equipment slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub left: Option<Item>,
    pub right: Option<Item>,
    pub head: Option<Item>,
    pub torso: Option<Item>,
    pub legs: Option<Item>,
    pub hands: Option<Item>,
}

impl Equipment {
    pub fn get(&self, slot: Slot) -> Option<&Item> {
        match slot {
            Slot::Left => self.left.as_ref(),
            Slot::Right => self.right.as_ref(),
            Slot::Head => self.head.as_ref(),
            Slot::Torso => self.torso.as_ref(),
            Slot::Legs => self.legs.as_ref(),
            Slot::Hands => self.hands.as_ref(),
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut Item> {
        self.slot_mut(slot).as_mut()
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Item> {
        match slot {
            Slot::Left => &mut self.left,
            Slot::Right => &mut self.right,
            Slot::Head => &mut self.head,
            Slot::Torso => &mut self.torso,
            Slot::Legs => &mut self.legs,
            Slot::Hands => &mut self.hands,
        }
    }

    /// Remove and return the item in a slot
    pub fn take(&mut self, slot: Slot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// True while a two-handed weapon is wielded
    pub fn occupies_both_hands(&self) -> bool {
        self.right.as_ref().is_some_and(Item::is_two_handed)
    }

    /// Put an item on, returning whatever it displaced
    pub fn equip(&mut self, item: Item) -> Result<Vec<Item>, EquipError> {
        let (two_handed, slot) = match item.equip_stats() {
            Some(stats) if stats.two_handed => (true, Slot::Right),
            Some(stats) => (false, stats.slot),
            None => return Err(EquipError::NotEquippable(item)),
        };

        let mut displaced = Vec::new();
        if two_handed {
            displaced.extend(self.left.take());
        } else if slot == Slot::Left && self.occupies_both_hands() {
            displaced.extend(self.right.take());
        }
        displaced.extend(self.slot_mut(slot).replace(item));
        Ok(displaced)
    }

    /// Iterate over equipped items, each once
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Item)> {
        Slot::iter().filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }

    /// Sum of attack bonuses
    pub fn attack_bonus(&self) -> f64 {
        self.iter().map(|(_, item)| item.attack_bonus()).sum()
    }

    /// Sum of defense bonuses
    pub fn defense_bonus(&self) -> f64 {
        self.iter().map(|(_, item)| item.defense_bonus()).sum()
    }

    /// Highest defense among the hand items, 0 when none
    pub fn max_hand_defense(&self) -> f64 {
        [&self.left, &self.right]
            .into_iter()
            .flatten()
            .map(Item::defense_bonus)
            .fold(0.0, f64::max)
    }

    /// Hand that wears when attacking
    ///
    /// Prefers a hand whose item has an attack bonus (right first), then any
    /// occupied hand.
    pub fn attacking_hand(&self) -> Option<Slot> {
        let armed = |item: &Option<Item>| item.as_ref().is_some_and(|i| i.attack_bonus() != 0.0);
        if armed(&self.right) {
            Some(Slot::Right)
        } else if armed(&self.left) {
            Some(Slot::Left)
        } else if self.right.is_some() {
            Some(Slot::Right)
        } else if self.left.is_some() {
            Some(Slot::Left)
        } else {
            None
        }
    }

    /// Hand that wears when blocking: the one with the best defense
    pub fn blocking_hand(&self) -> Option<Slot> {
        match (&self.left, &self.right) {
            (Some(l), Some(r)) => {
                if l.defense_bonus() >= r.defense_bonus() {
                    Some(Slot::Left)
                } else {
                    Some(Slot::Right)
                }
            }
            (Some(_), None) => Some(Slot::Left),
            (None, Some(_)) => Some(Slot::Right),
            (None, None) => None,
        }
    }

    /// Add wear to the item in `slot`
    ///
    /// When wear reaches 100 the item is unequipped and returned. An empty
    /// slot or a non-equipment item is a no-op.
    pub fn wear(&mut self, slot: Slot, amount: f64) -> Option<Item> {
        let broke = self
            .get_mut(slot)
            .and_then(Item::equip_stats_mut)
            .is_some_and(|e| e.add_decay(amount));
        if broke { self.take(slot) } else { None }
    }
}
