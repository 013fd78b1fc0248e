//! Enemy attacks player

use super::{
    Broken, HitLocation, HitProfile, crit_chance, crit_multiplier, roll_hit_location, wear_slot,
};
use crate::consts::{
    BLEED_TURNS_PLAYER, DAZE_TURNS, DECAY_ARMOR_HIT, DECAY_LIGHT, DR_CAP, DR_SOFTNESS,
    ENEMY_BASE_CRIT, MIN_DAMAGE, PLAYER_BLOCK_BASE, PLAYER_BLOCK_CAP, PLAYER_BLOCK_PER_DEF,
};
use crate::monster::Enemy;
use crate::player::Player;
use crate::rng::{GameRng, round1};

/// Outcome of one enemy attack on the player
#[derive(Debug, Clone, PartialEq)]
pub struct DefenseReport {
    pub location: HitLocation,
    /// The player blocked; no damage was taken
    pub blocked: bool,
    pub crit: bool,
    pub damage: f64,
    pub dazed: bool,
    pub bleeding: bool,
    pub died: bool,
    /// Item destroyed by wear (blocking hand or struck armor)
    pub broken: Option<Broken>,
    pub messages: Vec<String>,
}

/// Chance that the player blocks a blow to the given location
pub fn player_block_chance(player: &Player, profile: &HitProfile) -> f64 {
    let base = PLAYER_BLOCK_BASE + player.equipment.max_hand_defense() * PLAYER_BLOCK_PER_DEF;
    (base * profile.block_modifier).clamp(0.0, PLAYER_BLOCK_CAP)
}

/// Damage reduction factor for a defense value, never above 0.85
pub fn damage_reduction(defense: f64) -> f64 {
    let defense = defense.max(0.0);
    (defense / (defense + DR_SOFTNESS)).clamp(0.0, DR_CAP)
}

/// Mitigate incoming damage by the player's defense
///
/// At least 0.1 damage always lands.
pub fn enemy_damage_after_defense(raw: f64, defense: f64) -> f64 {
    MIN_DAMAGE.max(round1(raw * (1.0 - damage_reduction(defense))))
}

/// Enemy melee attack against the player
///
/// Draw order: hit location (unless forced), block, crit, crit multiplier
/// when critical.
pub fn enemy_attack_player(
    enemy: &Enemy,
    player: &mut Player,
    rng: &mut GameRng,
    force_hit: Option<HitLocation>,
) -> DefenseReport {
    let profile = roll_hit_location(rng, force_hit);
    let name = enemy.name();
    let mut report = DefenseReport {
        location: profile.part,
        blocked: false,
        crit: false,
        damage: 0.0,
        dazed: false,
        bleeding: false,
        died: false,
        broken: None,
        messages: Vec::new(),
    };

    if rng.chance(player_block_chance(player, &profile)) {
        report.blocked = true;
        report.messages.push(format!("You block the {}'s attack.", name));
        let hand = player.equipment.blocking_hand();
        report.broken = wear_slot(player, hand, DECAY_LIGHT, &mut report.messages);
        return report;
    }

    let mut raw = enemy.attack * profile.damage_multiplier;
    report.crit = rng.chance(crit_chance(ENEMY_BASE_CRIT, &profile));
    if report.crit {
        raw *= crit_multiplier(rng);
    }
    report.damage = enemy_damage_after_defense(raw, player.defense());
    player.take_damage(report.damage);

    report.messages.push(if report.crit {
        format!(
            "The {} lands a critical blow to your {} for {:.1}!",
            name, profile.part, report.damage
        )
    } else {
        format!(
            "The {} hits your {} for {:.1}.",
            name, profile.part, report.damage
        )
    });

    report.broken = wear_slot(
        player,
        Some(profile.part.armor_slot()),
        DECAY_ARMOR_HIT,
        &mut report.messages,
    );

    if report.crit {
        if profile.part == HitLocation::Head {
            player.status.daze = player.status.daze.max(DAZE_TURNS);
            report.dazed = true;
            report.messages.push("You are dazed.".to_string());
        }
        player.status.bleed = player.status.bleed.max(BLEED_TURNS_PLAYER);
        report.bleeding = true;
        report.messages.push("You are bleeding.".to_string());
    }

    report.died = player.is_dead();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Pos;
    use crate::monster::{EnemyId, EnemyKind};
    use crate::object::{Item, Slot};
    use proptest::prelude::*;

    #[test]
    fn test_heavy_defense_example() {
        // 30 / 36 stays under the cap; 5 * (1 - 0.833) rounds to 0.8
        assert_eq!(enemy_damage_after_defense(5.0, 30.0), 0.8);
    }

    #[test]
    fn test_dr_cap() {
        assert_eq!(damage_reduction(1000.0), DR_CAP);
        assert_eq!(damage_reduction(0.0), 0.0);
        assert_eq!(enemy_damage_after_defense(5.0, 1000.0), 0.8);
    }

    #[test]
    fn test_chip_damage_floor() {
        assert_eq!(enemy_damage_after_defense(0.1, 500.0), MIN_DAMAGE);
    }

    #[test]
    fn test_player_block_chance() {
        let mut p = Player::default();
        let torso = HitLocation::Torso.profile();
        assert!((player_block_chance(&p, &torso) - 0.08).abs() < 1e-9);
        p.equipment.equip(Item::shield("tower shield", 20.0)).unwrap();
        assert_eq!(player_block_chance(&p, &torso), PLAYER_BLOCK_CAP);
    }

    #[test]
    fn test_armor_wear_on_struck_slot() {
        let enemy = Enemy::new(EnemyId(1), EnemyKind::Bandit, Pos::new(1, 0), 10.0, 2.0, 1);
        let mut player = Player::default();
        player.equipment.equip(Item::armor("cap", Slot::Head, 1.0)).unwrap();
        let mut rng = GameRng::new(11);
        let head = Some(HitLocation::Head);
        let mut report = enemy_attack_player(&enemy, &mut player, &mut rng, head);
        while report.blocked {
            report = enemy_attack_player(&enemy, &mut player, &mut rng, head);
        }
        assert!(report.damage >= MIN_DAMAGE);
        assert_eq!(player.equipment.get(Slot::Head).unwrap().decay(), DECAY_ARMOR_HIT);
        assert_eq!(report.dazed, report.crit);
        assert_eq!(report.bleeding, report.crit);
    }

    #[test]
    fn test_lethal_blow() {
        let enemy = Enemy::new(EnemyId(1), EnemyKind::Troll, Pos::new(1, 0), 30.0, 50.0, 5);
        let mut player = Player::default();
        player.hp = 1.0;
        let mut rng = GameRng::new(2);
        let mut report = enemy_attack_player(&enemy, &mut player, &mut rng, None);
        while report.blocked {
            report = enemy_attack_player(&enemy, &mut player, &mut rng, None);
        }
        assert!(report.died);
        assert!(player.is_dead());
    }

    proptest! {
        #[test]
        fn prop_damage_floor(raw in 0.0001f64..1000.0, defense in 0.0f64..1e6) {
            prop_assert!(enemy_damage_after_defense(raw, defense) >= MIN_DAMAGE);
        }

        #[test]
        fn prop_dr_bounded(defense in 0.0f64..1e9) {
            let dr = damage_reduction(defense);
            prop_assert!((0.0..=DR_CAP).contains(&dr));
        }
    }
}
