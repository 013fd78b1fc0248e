//! Game constants

/// Deepest dungeon level a site can generate
pub const MAX_DEPTH: u32 = 10;

/// Largest sight radius the options accept
pub const MAX_FOV_RADIUS: i32 = 64;

/// Base critical hit chance before hit-location bonus (player attacks)
pub const PLAYER_BASE_CRIT: f64 = 0.12;
/// Base critical hit chance before hit-location bonus (enemy attacks)
pub const ENEMY_BASE_CRIT: f64 = 0.08;
/// Upper bound on any critical hit chance
pub const MAX_CRIT_CHANCE: f64 = 0.6;

/// Critical multiplier range: `CRIT_MULT_BASE + next() * CRIT_MULT_SPREAD`
pub const CRIT_MULT_BASE: f64 = 1.6;
pub const CRIT_MULT_SPREAD: f64 = 0.4;

/// Enemy block chance bounds
pub const ENEMY_BLOCK_CAP: f64 = 0.35;
/// Player block: `PLAYER_BLOCK_BASE + max hand defense * PLAYER_BLOCK_PER_DEF`
pub const PLAYER_BLOCK_BASE: f64 = 0.08;
pub const PLAYER_BLOCK_PER_DEF: f64 = 0.06;
pub const PLAYER_BLOCK_CAP: f64 = 0.6;

/// Defense mitigation: `DR = defense / (defense + DR_SOFTNESS)`, capped
pub const DR_SOFTNESS: f64 = 6.0;
pub const DR_CAP: f64 = 0.85;
/// Damage that always lands after mitigation
pub const MIN_DAMAGE: f64 = 0.1;

/// Decay added to the weapon hand on a full swing
pub const DECAY_FULL_SWING: f64 = 1.5;
/// Decay added to a hand item on a blocked or blocking swing
pub const DECAY_LIGHT: f64 = 0.5;
/// Decay added to armor struck by an enemy
pub const DECAY_ARMOR_HIT: f64 = 1.0;
/// Decay at which an item breaks
pub const DECAY_MAX: f64 = 100.0;

/// Turns an enemy stays immobilized after a crit to the legs
pub const IMMOBILIZE_TURNS: u32 = 2;
/// Turns of bleeding after a crit
pub const BLEED_TURNS_ENEMY: u32 = 3;
pub const BLEED_TURNS_PLAYER: u32 = 2;
/// Turns the player is dazed after a crit to the head
pub const DAZE_TURNS: u32 = 2;
/// HP lost per turn while bleeding
pub const BLEED_DAMAGE: f64 = 0.5;

/// Blood decal alpha added by a hit, and its crit scaling
pub const DECAL_HIT_ALPHA: f32 = 0.35;
pub const DECAL_CRIT_SCALE: f32 = 1.5;

/// Experience curve
pub const XP_FIRST_LEVEL: u32 = 20;
pub const XP_GROWTH: f64 = 1.3;
pub const XP_STEP: f64 = 10.0;
/// Max HP gained per level
pub const HP_PER_LEVEL: f64 = 2.0;

/// Kill experience: `XP_KILL_BASE + XP_KILL_PER_LEVEL * enemy level`
pub const XP_KILL_BASE: u32 = 5;
pub const XP_KILL_PER_LEVEL: u32 = 3;

/// Starting player stats
pub const START_HP: f64 = 20.0;
pub const START_ATTACK: f64 = 2.0;
pub const START_DEFENSE: f64 = 1.0;
