//! UI observer contract

use strum::Display;

use crate::monster::Enemy;
use crate::player::Player;

/// Log line severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Combat,
    Warning,
}

/// Receives plain events from the core; every method defaults to a no-op
pub trait GameObserver {
    fn on_stats_changed(&mut self, _player: &Player) {}

    fn on_log(&mut self, _message: &str, _severity: Severity) {}

    fn on_player_died(&mut self, _player: &Player) {}

    fn on_enemy_died(&mut self, _enemy: &Enemy) {}

    fn on_redraw_needed(&mut self) {}
}

/// Fallback observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}
