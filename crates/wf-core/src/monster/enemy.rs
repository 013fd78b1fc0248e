//! Enemy instances

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::consts::{XP_KILL_BASE, XP_KILL_PER_LEVEL};
use crate::map::Pos;

/// Unique identifier for enemy instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

impl EnemyId {
    pub const NONE: EnemyId = EnemyId(0);

    pub fn next(self) -> Self {
        EnemyId(self.0 + 1)
    }
}

/// Enemy type tag
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum EnemyKind {
    Rat,
    Goblin,
    Bandit,
    Skeleton,
    Wolf,
    Ogre,
    Troll,
}

impl EnemyKind {
    /// Base block chance before the hit-location modifier
    pub const fn base_block(&self) -> f64 {
        match self {
            EnemyKind::Ogre => 0.10,
            EnemyKind::Troll => 0.08,
            _ => 0.06,
        }
    }

    /// Hit points at level 1
    pub const fn base_hp(&self) -> f64 {
        match self {
            EnemyKind::Rat => 3.0,
            EnemyKind::Goblin => 5.0,
            EnemyKind::Bandit => 7.0,
            EnemyKind::Skeleton => 6.0,
            EnemyKind::Wolf => 6.0,
            EnemyKind::Ogre => 14.0,
            EnemyKind::Troll => 18.0,
        }
    }

    /// Attack at level 1
    pub const fn base_attack(&self) -> f64 {
        match self {
            EnemyKind::Rat => 1.0,
            EnemyKind::Goblin => 1.5,
            EnemyKind::Bandit => 2.0,
            EnemyKind::Skeleton => 2.0,
            EnemyKind::Wolf => 2.5,
            EnemyKind::Ogre => 4.0,
            EnemyKind::Troll => 4.5,
        }
    }
}

/// Transient status counters (turns remaining)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyStatus {
    pub immobilized: u32,
    pub bleed: u32,
}

/// A hostile creature on the current map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub pos: Pos,
    pub kind: EnemyKind,
    pub hp: f64,
    pub hp_max: f64,
    pub attack: f64,
    pub level: u32,
    pub status: EnemyStatus,
    /// Set once the player has been told about this enemy
    pub announced: bool,
}

impl Enemy {
    /// Create an enemy with explicit stats
    pub fn new(id: EnemyId, kind: EnemyKind, pos: Pos, hp: f64, attack: f64, level: u32) -> Self {
        Self {
            id,
            pos,
            kind,
            hp,
            hp_max: hp,
            attack,
            level: level.max(1),
            status: EnemyStatus::default(),
            announced: false,
        }
    }

    /// Create an enemy with stats scaled from its kind
    pub fn spawn(id: EnemyId, kind: EnemyKind, pos: Pos, level: u32) -> Self {
        let level = level.max(1);
        let extra = (level - 1) as f64;
        Self::new(
            id,
            kind,
            pos,
            kind.base_hp() + 2.0 * extra,
            kind.base_attack() + 0.5 * extra,
            level,
        )
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Immobilized enemies neither move nor attack
    pub fn can_act(&self) -> bool {
        !self.is_dead() && self.status.immobilized == 0
    }

    pub fn is_adjacent(&self, pos: Pos) -> bool {
        self.pos.is_adjacent(pos)
    }

    /// Experience granted for killing this enemy
    pub fn xp_value(&self) -> u32 {
        XP_KILL_BASE + XP_KILL_PER_LEVEL * self.level
    }

    /// Name used in narration
    pub fn name(&self) -> String {
        self.kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_block() {
        assert_eq!(EnemyKind::Ogre.base_block(), 0.10);
        assert_eq!(EnemyKind::Troll.base_block(), 0.08);
        assert_eq!(EnemyKind::Goblin.base_block(), 0.06);
    }

    #[test]
    fn test_spawn_scales_with_level() {
        let e = Enemy::spawn(EnemyId(1), EnemyKind::Goblin, Pos::new(1, 1), 3);
        assert_eq!(e.hp, 9.0);
        assert_eq!(e.hp_max, 9.0);
        assert_eq!(e.attack, 2.5);
        assert_eq!(e.xp_value(), 14);
    }

    #[test]
    fn test_immobilized_cannot_act() {
        let mut e = Enemy::spawn(EnemyId(1), EnemyKind::Rat, Pos::new(1, 1), 1);
        assert!(e.can_act());
        e.status.immobilized = 2;
        assert!(!e.can_act());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("troll".parse::<EnemyKind>(), Ok(EnemyKind::Troll));
        assert_eq!(EnemyKind::Wolf.to_string(), "wolf");
    }
}
