//! Player attacks enemy

use super::{
    Broken, CombatOverrides, HitLocation, HitProfile, crit_chance, crit_multiplier,
    roll_hit_location, wear_slot,
};
use crate::consts::{
    BLEED_TURNS_ENEMY, DECAY_FULL_SWING, DECAY_LIGHT, ENEMY_BLOCK_CAP, IMMOBILIZE_TURNS,
    PLAYER_BASE_CRIT,
};
use crate::monster::Enemy;
use crate::player::Player;
use crate::rng::{GameRng, round1};

/// Outcome of one player swing
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub location: HitLocation,
    /// The enemy blocked; no damage was dealt
    pub blocked: bool,
    pub crit: bool,
    pub damage: f64,
    pub killed: bool,
    pub immobilized: bool,
    pub bleeding: bool,
    /// Hand item destroyed by wear
    pub broken: Option<Broken>,
    /// Narration, in order
    pub messages: Vec<String>,
}

impl AttackReport {
    fn new(location: HitLocation) -> Self {
        Self {
            location,
            blocked: false,
            crit: false,
            damage: 0.0,
            killed: false,
            immobilized: false,
            bleeding: false,
            broken: None,
            messages: Vec::new(),
        }
    }
}

/// Chance that an enemy blocks a blow to the given location
pub fn enemy_block_chance(enemy: &Enemy, profile: &HitProfile) -> f64 {
    (enemy.kind.base_block() * profile.block_modifier).clamp(0.0, ENEMY_BLOCK_CAP)
}

/// Player melee attack against an adjacent enemy
///
/// Draw order: hit location (unless forced), block, crit (unless forced),
/// crit multiplier when critical.
pub fn player_attack_enemy(
    player: &mut Player,
    enemy: &mut Enemy,
    rng: &mut GameRng,
    overrides: CombatOverrides,
) -> AttackReport {
    let profile = roll_hit_location(rng, overrides.force_hit);
    let mut report = AttackReport::new(profile.part);
    let name = enemy.name();
    let hand = player.equipment.attacking_hand();

    if rng.chance(enemy_block_chance(enemy, &profile)) {
        report.blocked = true;
        report.messages.push(format!("The {} blocks your attack.", name));
        report.broken = wear_slot(player, hand, DECAY_LIGHT, &mut report.messages);
        return report;
    }

    let mut damage = player.attack() * profile.damage_multiplier;
    report.crit = overrides.always_crit || rng.chance(crit_chance(PLAYER_BASE_CRIT, &profile));
    if report.crit {
        damage *= crit_multiplier(rng);
    }
    report.damage = round1(damage).max(0.0);
    enemy.hp = round1(enemy.hp - report.damage);
    report.killed = enemy.is_dead();

    report.messages.push(if report.crit {
        format!(
            "Critical! You strike the {} in the {} for {:.1}.",
            name, profile.part, report.damage
        )
    } else {
        format!(
            "You hit the {} in the {} for {:.1}.",
            name, profile.part, report.damage
        )
    });

    if report.killed {
        report.messages.push(format!("You kill the {}!", name));
    } else if report.crit {
        if profile.part == HitLocation::Legs {
            enemy.status.immobilized = enemy.status.immobilized.max(IMMOBILIZE_TURNS);
            report.immobilized = true;
            report.messages.push(format!("The {} staggers and cannot move.", name));
        }
        enemy.status.bleed = enemy.status.bleed.max(BLEED_TURNS_ENEMY);
        report.bleeding = true;
        report.messages.push(format!("The {} is bleeding.", name));
    }

    report.broken = wear_slot(player, hand, DECAY_FULL_SWING, &mut report.messages);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Pos;
    use crate::monster::{EnemyId, EnemyKind};
    use crate::object::{Item, Slot};

    fn goblin(hp: f64) -> Enemy {
        Enemy::new(EnemyId(1), EnemyKind::Goblin, Pos::new(6, 5), hp, 1.0, 1)
    }

    fn armed_player(attack: f64) -> Player {
        let mut p = Player::new(Pos::new(5, 5));
        p.base_attack = attack;
        p
    }

    #[test]
    fn test_enemy_block_chance() {
        let ogre = Enemy::spawn(EnemyId(1), EnemyKind::Ogre, Pos::new(0, 0), 1);
        let head = HitLocation::Head.profile();
        assert!((enemy_block_chance(&ogre, &head) - 0.085).abs() < 1e-9);
        assert_eq!(
            enemy_block_chance(&goblin(4.0), &HitLocation::Torso.profile()),
            0.06
        );
    }

    #[test]
    fn test_forced_crit_to_legs_immobilizes() {
        let mut player = armed_player(3.0);
        let mut enemy = goblin(50.0);
        // Forced location and crit leave one draw for the block and one for the multiplier
        let overrides = CombatOverrides {
            force_hit: Some(HitLocation::Legs),
            always_crit: true,
        };
        let mut rng = GameRng::new(1);
        let mut report = player_attack_enemy(&mut player, &mut enemy, &mut rng, overrides);
        while report.blocked {
            report = player_attack_enemy(&mut player, &mut enemy, &mut rng, overrides);
        }
        assert!(report.crit);
        assert!(report.immobilized);
        assert!(report.bleeding);
        assert_eq!(enemy.status.immobilized, IMMOBILIZE_TURNS);
        assert_eq!(enemy.status.bleed, BLEED_TURNS_ENEMY);
        // 3 * 0.95 * [1.6, 2.0)
        assert!(report.damage >= 4.5 && report.damage <= 5.7);
    }

    #[test]
    fn test_kill_skips_status() {
        let mut player = armed_player(10.0);
        let mut enemy = goblin(1.0);
        let overrides = CombatOverrides {
            force_hit: Some(HitLocation::Legs),
            always_crit: true,
        };
        let mut rng = GameRng::new(3);
        let mut report = player_attack_enemy(&mut player, &mut enemy, &mut rng, overrides);
        while report.blocked {
            report = player_attack_enemy(&mut player, &mut enemy, &mut rng, overrides);
        }
        assert!(report.killed);
        assert!(!report.immobilized);
        assert_eq!(enemy.status.immobilized, 0);
        assert!(report.messages.iter().any(|m| m == "You kill the goblin!"));
    }

    #[test]
    fn test_swing_wears_weapon_once() {
        let mut player = armed_player(2.0);
        player.equipment.equip(Item::two_handed_weapon("greataxe", 4.0)).unwrap();
        let mut enemy = goblin(500.0);
        let mut rng = GameRng::new(9);
        let report =
            player_attack_enemy(&mut player, &mut enemy, &mut rng, CombatOverrides::default());
        let expected = if report.blocked { DECAY_LIGHT } else { DECAY_FULL_SWING };
        assert_eq!(player.equipment.get(Slot::Right).unwrap().decay(), expected);
    }

    #[test]
    fn test_weapon_breaks_on_last_swing() {
        let mut player = armed_player(2.0);
        player.equipment.equip(Item::weapon("rusty sword", 1.0)).unwrap();
        player
            .equipment
            .get_mut(Slot::Right)
            .and_then(Item::equip_stats_mut)
            .unwrap()
            .decay = 99.9;
        let mut enemy = goblin(500.0);
        let mut rng = GameRng::new(5);
        let report =
            player_attack_enemy(&mut player, &mut enemy, &mut rng, CombatOverrides::default());
        let broken = report.broken.expect("sword should break");
        assert_eq!(broken.slot, Slot::Right);
        assert!(player.equipment.right.is_none());
        assert_eq!(report.messages.last().unwrap(), "Your rusty sword breaks!");
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let run = || {
            let mut player = armed_player(3.0);
            let mut enemy = goblin(4.0);
            let mut rng = GameRng::new(42);
            let overrides = CombatOverrides::default();
            let report = player_attack_enemy(&mut player, &mut enemy, &mut rng, overrides);
            (enemy.hp, report.messages)
        };
        assert_eq!(run(), run());
    }
}
