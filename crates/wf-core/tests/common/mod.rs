//! Shared fixtures for session-level tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wf_core::collab::{
    Collaborators, GameObserver, GenRequest, Generated, GenerationError, Severity, WorldGenerator,
};
use wf_core::map::{Map, Pos, Tile};
use wf_core::monster::{Enemy, EnemyId, EnemyKind, Npc, NpcRole};
use wf_core::player::Player;
use wf_core::world::{CoreOptions, Site, SiteKind};
use wf_core::GameSession;

pub const DUNGEON_ENTRANCE: Pos = Pos { x: 10, y: 20 };
pub const SETTLEMENT_ENTRANCE: Pos = Pos { x: 3, y: 3 };
pub const WORLD_SPAWN: Pos = Pos { x: 9, y: 20 };
pub const DUNGEON_SPAWN: Pos = Pos { x: 5, y: 5 };
pub const SETTLEMENT_SPAWN: Pos = Pos { x: 5, y: 4 };

// ============================================================================
// Generator with fixed layouts
// ============================================================================

/// Grass overworld with one dungeon and one settlement; dungeons are a
/// walled room holding `enemies`
#[derive(Clone, Default)]
pub struct ScriptedGenerator {
    pub enemies: Vec<Enemy>,
    pub npcs: Vec<Npc>,
    pub dungeon_calls: Rc<Cell<u32>>,
    pub settlement_calls: Rc<Cell<u32>>,
}

impl ScriptedGenerator {
    pub fn with_enemies(enemies: Vec<Enemy>) -> Self {
        Self {
            enemies,
            npcs: vec![Npc::new(Pos::new(2, 2), "Mara", NpcRole::Merchant)],
            ..Self::default()
        }
    }
}

impl WorldGenerator for ScriptedGenerator {
    fn generate_world(&mut self, _req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        let mut map = Map::filled(30, 24, Tile::Grass);
        map.set(DUNGEON_ENTRANCE, Tile::DungeonMarker);
        map.set(SETTLEMENT_ENTRANCE, Tile::SettlementMarker);
        let mut world = Generated::new(map, WORLD_SPAWN);
        world.sites = vec![
            Site::new(DUNGEON_ENTRANCE, SiteKind::Dungeon, "the Old Barrow", 3),
            Site::new(SETTLEMENT_ENTRANCE, SiteKind::Settlement, "Millbrook", 1),
        ];
        Ok(world)
    }

    fn generate_settlement(&mut self, _req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        self.settlement_calls.set(self.settlement_calls.get() + 1);
        let mut town = Generated::new(Map::walled_room(10, 8), SETTLEMENT_SPAWN);
        town.npcs = self.npcs.clone();
        Ok(town)
    }

    fn generate_dungeon(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        self.dungeon_calls.set(self.dungeon_calls.get() + 1);
        assert_eq!(req.depth, 3);
        let mut dungeon = Generated::new(Map::walled_room(12, 10), DUNGEON_SPAWN);
        dungeon.enemies = self.enemies.clone();
        Ok(dungeon)
    }
}

/// Generator that never succeeds
pub struct FailingGenerator;

impl WorldGenerator for FailingGenerator {
    fn generate_world(&mut self, _req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        Err(GenerationError::Failed("no terrain".to_string()))
    }

    fn generate_settlement(&mut self, _req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        Err(GenerationError::Failed("no houses".to_string()))
    }

    fn generate_dungeon(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        // Spawn inside the wall
        Ok(Generated::new(
            Map::walled_room(req.width, req.height),
            Pos::new(0, 0),
        ))
    }
}

// ============================================================================
// Observer that records callbacks
// ============================================================================

#[derive(Debug, Default)]
pub struct Events {
    pub logs: Vec<(String, Severity)>,
    pub stats: u32,
    pub redraws: u32,
    pub enemy_deaths: Vec<EnemyKind>,
    pub player_deaths: u32,
}

#[derive(Clone, Default)]
pub struct RecordingObserver(pub Rc<RefCell<Events>>);

impl GameObserver for RecordingObserver {
    fn on_stats_changed(&mut self, _player: &Player) {
        self.0.borrow_mut().stats += 1;
    }

    fn on_log(&mut self, msg: &str, severity: Severity) {
        self.0.borrow_mut().logs.push((msg.to_string(), severity));
    }

    fn on_player_died(&mut self, _player: &Player) {
        self.0.borrow_mut().player_deaths += 1;
    }

    fn on_enemy_died(&mut self, enemy: &Enemy) {
        self.0.borrow_mut().enemy_deaths.push(enemy.kind);
    }

    fn on_redraw_needed(&mut self) {
        self.0.borrow_mut().redraws += 1;
    }
}

// ============================================================================
// Session builders
// ============================================================================

pub fn goblin_at(pos: Pos, hp: f64) -> Enemy {
    Enemy::new(EnemyId::NONE, EnemyKind::Goblin, pos, hp, 1.0, 1)
}

pub fn options(seed: u32) -> CoreOptions {
    CoreOptions {
        seed: Some(seed),
        world_width: 30,
        world_height: 24,
        dungeon_width: 12,
        dungeon_height: 10,
        settlement_width: 10,
        settlement_height: 8,
        ..CoreOptions::default()
    }
}

pub fn session_with(options: CoreOptions, generator: ScriptedGenerator) -> GameSession {
    GameSession::new(options, Collaborators::default().with_generator(generator))
}

pub fn observed_session(
    options: CoreOptions,
    generator: ScriptedGenerator,
) -> (GameSession, Rc<RefCell<Events>>) {
    let observer = RecordingObserver::default();
    let events = Rc::clone(&observer.0);
    let collab = Collaborators::default()
        .with_generator(generator)
        .with_observer(observer);
    (GameSession::new(options, collab), events)
}
