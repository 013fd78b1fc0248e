//! Game session and turn scheduler
//!
//! [`GameSession`] owns the authoritative state and the collaborators. Each
//! call to [`GameSession::tick`] resolves one player command; only resolved
//! actions run [`turn`](GameSession::tick), which advances the clock, lets
//! enemies or NPCs act, ticks status effects and refreshes visibility.

use serde::{Deserialize, Serialize};

use crate::action::{ActionResult, Command};
use crate::collab::{
    Collaborators, EnemyTurn, FlatGenerator, GenRequest, Generated, LootSource, NpcTurn, Severity,
};
use crate::combat::{CombatOverrides, enemy_attack_player};
use crate::consts::BLEED_DAMAGE;
use crate::dungeon::{
    Corpse, Decal, DungeonSnapshot, EntranceKey, Occupancy, cap_corpses, fade_decals,
};
use crate::map::{Map, Pos, Tile, VisibilityCache};
use crate::monster::{Enemy, EnemyId, Npc};
use crate::player::Player;
use crate::rng::{GameRng, round1};
use crate::world::{ClockTime, CoreOptions, DungeonInfo, GameClock, Mode, Site, SiteKind};

/// Game loop result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameLoopResult {
    /// Continue playing
    Continue,
    /// Player died with message
    PlayerDied(String),
}

/// The settlement or dungeon the player is inside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaState {
    pub key: EntranceKey,
    pub kind: SiteKind,
    /// Arrival tile; standing here allows Exit
    pub exit_anchor: Pos,
    /// Overworld position restored on exit
    pub world_return: Pos,
    pub info: DungeonInfo,
    pub depth_level: u32,
    /// Overworld map, parked until exit
    pub(crate) world_map: Map,
}

/// Main game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Player character
    pub player: Player,

    /// Current map (overworld, settlement or dungeon)
    pub map: Map,

    /// Field of view over the current map
    pub visibility: VisibilityCache,

    /// Enemies on the current map
    pub enemies: Vec<Enemy>,

    /// Settlement inhabitants on the current map
    pub npcs: Vec<Npc>,

    /// Corpses on the current map, oldest first
    pub corpses: Vec<Corpse>,

    /// Blood decals on the current map
    pub decals: Vec<Decal>,

    /// Overworld entrances
    pub sites: Vec<Site>,

    /// Set while inside a settlement or dungeon
    pub area: Option<AreaState>,

    /// Random number generator
    pub rng: GameRng,

    /// Turn counter
    pub turns: u64,

    /// Settlement tick counter
    pub settlement_ticks: u64,

    /// In-game clock driven by the turn counter
    pub clock: GameClock,

    /// Next id handed to a generated enemy
    pub next_enemy_id: EnemyId,

    /// Why the player died
    pub death_cause: Option<String>,

    /// Messages for the current turn
    #[serde(skip)]
    pub messages: Vec<String>,

    /// Permanent message history
    #[serde(skip)]
    pub message_history: Vec<String>,
}

impl GameState {
    /// Empty state around a seeded generator; the world is not generated yet
    pub fn new(rng: GameRng, clock: GameClock) -> Self {
        Self {
            player: Player::default(),
            map: Map::filled(0, 0, Tile::Wall),
            visibility: VisibilityCache::default(),
            enemies: Vec::new(),
            npcs: Vec::new(),
            corpses: Vec::new(),
            decals: Vec::new(),
            sites: Vec::new(),
            area: None,
            rng,
            turns: 0,
            settlement_ticks: 0,
            clock,
            next_enemy_id: EnemyId(1),
            death_cause: None,
            messages: Vec::new(),
            message_history: Vec::new(),
        }
    }

    /// Current mode, derived from the area the player is in
    pub fn mode(&self) -> Mode {
        self.area.as_ref().map_or(Mode::World, |a| a.kind.mode())
    }

    /// Add a message to display
    pub fn message(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        self.messages.push(msg.clone());
        self.message_history.push(msg);
    }

    /// Index of the living enemy with this id
    pub fn enemy_index(&self, id: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|e| e.id == id)
    }

    /// Overworld site recorded at a position
    pub fn site_at(&self, pos: Pos) -> Option<&Site> {
        self.sites.iter().find(|s| s.pos == pos)
    }

    /// Current in-game time
    pub fn time(&self) -> ClockTime {
        self.clock.at(self.turns)
    }
}

/// A running game: state plus the collaborators it calls into
pub struct GameSession {
    pub(crate) state: GameState,
    pub(crate) options: CoreOptions,
    pub(crate) collab: Collaborators,
    pub(crate) occupancy: Occupancy,
}

impl GameSession {
    /// Seed the generator, build the overworld and place the player
    pub fn new(options: CoreOptions, collab: Collaborators) -> Self {
        let rng = GameRng::from_option(options.seed);
        let clock = GameClock::new(options.start_hour);
        let mut session = Self {
            state: GameState::new(rng, clock),
            options,
            collab,
            occupancy: Occupancy::new(),
        };
        session.build_world();
        session
    }

    /// Start over with a fresh player, world and generator seed
    ///
    /// All persisted snapshots are discarded.
    pub fn restart(&mut self, seed: u32) {
        tracing::info!(seed, "restarting session");
        self.options.seed = Some(seed);
        let clock = GameClock::new(self.options.start_hour);
        self.state = GameState::new(GameRng::new(seed), clock);
        if let Err(err) = self.collab.store.clear() {
            tracing::warn!(%err, "could not clear snapshot store");
        }
        self.occupancy.clear();
        self.build_world();
    }

    /// Get reference to game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get mutable reference to game state
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn options(&self) -> &CoreOptions {
        &self.options
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Collaborators, e.g. to inspect the snapshot store
    pub fn collaborators(&self) -> &Collaborators {
        &self.collab
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Resolve one command
    ///
    /// Rejected commands and mode transitions leave the turn counter alone.
    pub fn tick(&mut self, command: Command) -> GameLoopResult {
        self.state.messages.clear();
        if let Some(cause) = &self.state.death_cause {
            return GameLoopResult::PlayerDied(cause.clone());
        }

        match self.execute_command(command) {
            ActionResult::Success => {}
            ActionResult::NoTime => return GameLoopResult::Continue,
        }

        let result = self.turn();

        if result == GameLoopResult::Continue && matches!(command, Command::Move(_)) {
            self.enter_at_player();
        }
        result
    }

    /// Execute a player command
    fn execute_command(&mut self, command: Command) -> ActionResult {
        match command {
            Command::Move(dir) => self.do_move(dir),
            Command::Fight(dir) => self.do_fight(dir),
            Command::Rest => ActionResult::Success,
            Command::Enter => self.do_enter(),
            Command::Exit => self.do_exit(),
            Command::Quaff(idx) => self.do_quaff(idx),
            Command::Equip(idx) => self.do_equip(idx),
        }
    }

    /// One simulation step after a resolved action
    fn turn(&mut self) -> GameLoopResult {
        self.state.turns += 1;

        match self.state.mode() {
            Mode::Dungeon => {
                self.move_enemies();
                self.occupancy.rebuild_enemies(&self.state.enemies);
                self.tick_enemy_statuses();
                fade_decals(
                    &mut self.state.decals,
                    self.options.decal_fade,
                    self.options.decal_min_alpha,
                );
                let evicted = cap_corpses(&mut self.state.corpses, self.options.corpse_cap);
                if evicted > 0 {
                    tracing::debug!(evicted, "corpse cap reached");
                }
            }
            Mode::Settlement => {
                self.state.settlement_ticks += 1;
                let tick = self.state.settlement_ticks;
                self.collab.ai.act_settlement_npcs(NpcTurn {
                    map: &self.state.map,
                    player: self.state.player.pos,
                    npcs: &mut self.state.npcs,
                    rng: &mut self.state.rng,
                    tick,
                });
                if tick % self.options.settlement_stride.max(1) == 0 {
                    self.occupancy.rebuild_npcs(&self.state.npcs);
                }
            }
            Mode::World => {}
        }

        self.tick_player_status();
        self.refresh_visibility();

        if self.state.mode() == Mode::Dungeon {
            self.announce_enemies();
            self.persist_area();
        }

        self.collab.observer.on_stats_changed(&self.state.player);
        self.collab.observer.on_redraw_needed();

        if self.state.player.is_dead() {
            return self.player_died();
        }
        GameLoopResult::Continue
    }

    /// Let enemy AI act and resolve the attacks it asks for
    fn move_enemies(&mut self) {
        let requests = self.collab.ai.act_all_enemies(EnemyTurn {
            map: &self.state.map,
            player: self.state.player.pos,
            enemies: &mut self.state.enemies,
            rng: &mut self.state.rng,
        });

        for request in requests {
            if self.state.player.is_dead() {
                break;
            }
            let Some(enemy) = self.state.enemies.iter().find(|e| e.id == request.attacker) else {
                continue;
            };
            if !enemy.can_act() || !enemy.is_adjacent(self.state.player.pos) {
                tracing::debug!(id = ?enemy.id, "ignoring attack request from out of reach");
                continue;
            }
            let report = enemy_attack_player(
                enemy,
                &mut self.state.player,
                &mut self.state.rng,
                self.options.force_hit,
            );
            if report.died && self.state.death_cause.is_none() {
                self.state.death_cause = Some(format!("killed by a {}", enemy.kind));
            }
            for msg in &report.messages {
                self.log(msg.clone(), Severity::Combat);
            }
        }
    }

    /// Count down enemy statuses; bleeding may kill
    fn tick_enemy_statuses(&mut self) {
        let mut bled_out = Vec::new();
        for enemy in &mut self.state.enemies {
            if enemy.status.immobilized > 0 {
                enemy.status.immobilized -= 1;
            }
            if enemy.status.bleed > 0 {
                enemy.status.bleed -= 1;
                enemy.hp = round1(enemy.hp - BLEED_DAMAGE);
                if enemy.is_dead() {
                    bled_out.push(enemy.id);
                }
            }
        }
        for id in bled_out {
            if let Some(idx) = self.state.enemy_index(id) {
                let name = self.state.enemies[idx].name();
                self.log(format!("The {} bleeds out.", name), Severity::Combat);
                self.kill_enemy(idx);
            }
        }
    }

    /// Count down player statuses in every mode
    fn tick_player_status(&mut self) {
        let status = &mut self.state.player.status;
        let mut cleared = false;
        if status.daze > 0 {
            status.daze -= 1;
            cleared = status.daze == 0;
        }
        let bleeding = status.bleed > 0;
        if bleeding {
            status.bleed -= 1;
        }

        if cleared {
            self.log("Your head clears.", Severity::Info);
        }
        if bleeding {
            self.state.player.take_damage(BLEED_DAMAGE);
            self.log("You bleed.", Severity::Combat);
            if self.state.player.is_dead() && self.state.death_cause.is_none() {
                self.state.death_cause = Some("bled to death".to_string());
            }
        }
    }

    fn player_died(&mut self) -> GameLoopResult {
        let cause = self
            .state
            .death_cause
            .get_or_insert_with(|| "died".to_string())
            .clone();
        tracing::info!(%cause, turns = self.state.turns, "player died");
        self.log("You die...", Severity::Warning);
        self.collab.observer.on_player_died(&self.state.player);
        GameLoopResult::PlayerDied(cause)
    }

    /// Remove a dead enemy: corpse with loot, experience, persistence
    pub(crate) fn kill_enemy(&mut self, idx: usize) {
        let enemy = self.state.enemies.remove(idx);
        let loot = self.collab.loot.generate(
            LootSource::Enemy {
                kind: enemy.kind,
                level: enemy.level,
                pos: enemy.pos,
            },
            &mut self.state.rng,
        );
        self.state.corpses.push(Corpse {
            pos: enemy.pos,
            kind: enemy.kind,
            loot,
            turn: self.state.turns,
        });

        let xp = enemy.xp_value();
        for up in self.state.player.gain_xp(xp) {
            let mut msg = format!("Welcome to level {}! Max HP is now {}.", up.level, up.hp_max);
            if up.attack_gained {
                msg.push_str(" You feel stronger.");
            }
            self.log(msg, Severity::Info);
        }

        self.collab.observer.on_enemy_died(&enemy);
        self.occupancy.rebuild_enemies(&self.state.enemies);
        self.persist_area();
    }

    /// Recompute visibility, self-healing a dark player tile
    pub(crate) fn refresh_visibility(&mut self) {
        let mode = self.state.mode();
        let radius = match mode {
            Mode::Dungeon => self.options.dungeon_fov,
            Mode::Settlement => self.options.settlement_fov,
            Mode::World => 0,
        };
        if self.state.visibility.recompute_checked(
            &self.state.map,
            self.state.player.pos,
            radius,
            mode,
        ) {
            self.log("Your eyes adjust.", Severity::Warning);
        }
    }

    /// Narrate enemies seen for the first time
    pub(crate) fn announce_enemies(&mut self) {
        let mut spotted = Vec::new();
        for enemy in &mut self.state.enemies {
            if !enemy.announced && self.state.visibility.is_visible(enemy.pos) {
                enemy.announced = true;
                spotted.push(enemy.kind);
            }
        }
        for kind in spotted {
            self.log(format!("You spot a {}.", kind), Severity::Info);
        }
    }

    /// Snapshot of the current settlement or dungeon
    pub fn snapshot(&self) -> Option<DungeonSnapshot> {
        let area = self.state.area.as_ref()?;
        let (seen, visible) = self.state.visibility.grids();
        Some(DungeonSnapshot {
            kind: area.kind,
            map: self.state.map.clone(),
            seen,
            visible,
            enemies: self.state.enemies.clone(),
            npcs: self.state.npcs.clone(),
            corpses: self.state.corpses.clone(),
            decals: self.state.decals.clone(),
            exit_anchor: area.exit_anchor,
            dungeon_info: area.info.clone(),
            depth_level: area.depth_level,
        })
    }

    /// Persist the current area; no-op in the overworld
    ///
    /// Returns false when nothing was written.
    pub fn save(&mut self) -> bool {
        let Some(key) = self.state.area.as_ref().map(|a| a.key) else {
            return false;
        };
        let Some(snapshot) = self.snapshot() else {
            return false;
        };
        match self.collab.store.save(key, snapshot) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%key, %err, "snapshot save failed, continuing without persistence");
                false
            }
        }
    }

    pub(crate) fn persist_area(&mut self) {
        self.save();
    }

    /// Validate a generator result, falling back to a flat map
    pub(crate) fn checked_generation(
        result: Result<Generated, crate::collab::GenerationError>,
        width: usize,
        height: usize,
        what: &str,
    ) -> Generated {
        match result.and_then(|g| g.validate().map(|()| g)) {
            Ok(g) => g,
            Err(err) => {
                tracing::warn!(%err, what, "generation failed, using flat fallback");
                FlatGenerator::flat(width, height)
            }
        }
    }

    /// Give generated enemies session-unique ids
    pub(crate) fn assign_enemy_ids(&mut self, enemies: &mut [Enemy]) {
        for enemy in enemies {
            enemy.id = self.state.next_enemy_id;
            self.state.next_enemy_id = self.state.next_enemy_id.next();
        }
    }

    /// Generate the overworld and place the player at its spawn
    fn build_world(&mut self) {
        let (width, height) = (self.options.world_width, self.options.world_height);
        let result = self.collab.generator.generate_world(GenRequest {
            rng: &mut self.state.rng,
            width,
            height,
            site: None,
            depth: 1,
        });
        let world = Self::checked_generation(result, width, height, "world");
        tracing::info!(
            seed = self.state.rng.seed(),
            time_derived = self.state.rng.is_time_derived(),
            sites = world.sites.len(),
            "world generated"
        );

        self.state.visibility = VisibilityCache::new(world.map.dims());
        self.state.map = world.map;
        self.state.sites = world.sites;
        self.state.player = Player::new(world.spawn);
        self.refresh_visibility();
        self.collab.observer.on_stats_changed(&self.state.player);
        self.collab.observer.on_redraw_needed();
    }

    /// Debug overrides for player attacks
    pub(crate) fn overrides(&self) -> CombatOverrides {
        CombatOverrides {
            force_hit: self.options.force_hit,
            always_crit: self.options.always_crit,
        }
    }

    /// Narrate to the player and the observer
    pub(crate) fn log(&mut self, msg: impl Into<String>, severity: Severity) {
        let msg = msg.into();
        self.collab.observer.on_log(&msg, severity);
        self.state.message(msg);
    }
}

impl core::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameSession")
            .field("mode", &self.state.mode())
            .field("turns", &self.state.turns)
            .field("seed", &self.state.rng.seed())
            .field("collab", &self.collab)
            .finish_non_exhaustive()
    }
}
