//! Mode transitions between the overworld and its settlements and dungeons
//!
//! Entering swaps the overworld map out for the area's map in one step and
//! parks it until exit; leaving persists the area and swaps it back. An
//! area that was visited before is restored from its snapshot verbatim.

use core::mem;

use super::ActionResult;
use crate::collab::{GenRequest, Severity};
use crate::dungeon::{DungeonSnapshot, EntranceKey};
use crate::gameloop::{AreaState, GameSession};
use crate::map::{Tile, VisibilityCache};
use crate::world::{DungeonInfo, Mode, Site, SiteKind};

impl GameSession {
    /// Handle the Enter command
    pub(crate) fn do_enter(&mut self) -> ActionResult {
        if !self.enter_at_player() {
            self.log("There is nothing to enter here.", Severity::Info);
        }
        ActionResult::NoTime
    }

    /// Handle the Exit command
    pub(crate) fn do_exit(&mut self) -> ActionResult {
        let on_anchor = self
            .state
            .area
            .as_ref()
            .is_some_and(|a| a.exit_anchor == self.state.player.pos);
        if on_anchor {
            self.exit_area();
        } else {
            self.log("You can't leave from here.", Severity::Info);
        }
        ActionResult::NoTime
    }

    /// Enter the site under the player, if any; true when a transition ran
    pub(crate) fn enter_at_player(&mut self) -> bool {
        if self.state.mode() != Mode::World {
            return false;
        }
        let pos = self.state.player.pos;
        let kind = match self.state.map.get(pos) {
            Some(Tile::SettlementMarker) => SiteKind::Settlement,
            Some(Tile::DungeonMarker) => SiteKind::Dungeon,
            _ => return false,
        };
        let site = match self.state.site_at(pos) {
            Some(site) if site.kind == kind => site.clone(),
            _ => {
                tracing::warn!(%pos, %kind, "marker without a matching site record");
                Site::new(pos, kind, format!("Nameless {}", kind), 1)
            }
        };
        self.enter_site(site);
        true
    }

    /// Swap the overworld out for a settlement or dungeon
    fn enter_site(&mut self, site: Site) {
        let key = EntranceKey::from(site.pos);
        let stored = match self.collab.store.load(key) {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(%key, %err, "snapshot load failed, regenerating");
                None
            }
        };
        let fresh = stored.is_none();
        let snapshot = match stored {
            Some(snapshot) => snapshot,
            None => self.generate_area(&site),
        };

        let DungeonSnapshot {
            kind,
            map,
            seen,
            visible,
            enemies,
            npcs,
            corpses,
            decals,
            exit_anchor,
            dungeon_info,
            depth_level,
        } = snapshot;

        let world_map = mem::replace(&mut self.state.map, map);
        self.state.visibility = VisibilityCache::from_grids(seen, visible);
        self.state.enemies = enemies;
        self.state.npcs = npcs;
        self.state.corpses = corpses;
        self.state.decals = decals;
        self.state.area = Some(AreaState {
            key,
            kind,
            exit_anchor,
            world_return: self.state.player.pos,
            info: dungeon_info,
            depth_level,
            world_map,
        });
        self.state.player.pos = exit_anchor;

        match kind {
            SiteKind::Dungeon => self.occupancy.rebuild_enemies(&self.state.enemies),
            SiteKind::Settlement => self.occupancy.rebuild_npcs(&self.state.npcs),
        }

        tracing::info!(%key, %kind, fresh, depth = depth_level, "entering {}", site.name);
        self.log(format!("You enter {}.", site.name), Severity::Info);
        self.refresh_visibility();
        if kind == SiteKind::Dungeon {
            self.announce_enemies();
        }
        if fresh {
            self.persist_area();
        }
        self.collab.observer.on_redraw_needed();
    }

    /// Persist the current area and return to the overworld
    fn exit_area(&mut self) {
        self.persist_area();
        let Some(area) = self.state.area.take() else {
            return;
        };

        self.state.map = area.world_map;
        self.state.visibility = VisibilityCache::new(self.state.map.dims());
        self.state.enemies.clear();
        self.state.npcs.clear();
        self.state.corpses.clear();
        self.state.decals.clear();
        self.state.player.pos = area.world_return;
        self.occupancy.clear();

        tracing::info!(key = %area.key, "returning to the overworld");
        self.log(format!("You leave {}.", area.info.name), Severity::Info);
        self.refresh_visibility();
        self.collab.observer.on_redraw_needed();
    }

    /// Ask the generator for a new area and wrap it as a snapshot
    fn generate_area(&mut self, site: &Site) -> DungeonSnapshot {
        let (width, height, depth) = match site.kind {
            SiteKind::Settlement => (
                self.options.settlement_width,
                self.options.settlement_height,
                1,
            ),
            SiteKind::Dungeon => (
                self.options.dungeon_width,
                self.options.dungeon_height,
                site.depth(),
            ),
        };
        let req = GenRequest {
            rng: &mut self.state.rng,
            width,
            height,
            site: Some(site),
            depth,
        };
        let result = match site.kind {
            SiteKind::Settlement => self.collab.generator.generate_settlement(req),
            SiteKind::Dungeon => self.collab.generator.generate_dungeon(req),
        };
        let mut generated = Self::checked_generation(result, width, height, &site.name);
        self.assign_enemy_ids(&mut generated.enemies);

        let dims = generated.map.dims();
        let grid = vec![vec![false; dims.0]; dims.1];
        DungeonSnapshot {
            kind: site.kind,
            map: generated.map,
            seen: grid.clone(),
            visible: grid,
            enemies: generated.enemies,
            npcs: generated.npcs,
            corpses: Vec::new(),
            decals: Vec::new(),
            exit_anchor: generated.spawn,
            dungeon_info: DungeonInfo::from(site),
            depth_level: depth,
        }
    }
}
