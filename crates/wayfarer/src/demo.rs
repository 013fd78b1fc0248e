//! Demo content: a small overworld, walled towns and pillared dungeons
//!
//! Everything is drawn from the session generator so a seed replays the
//! same world.

use strum::IntoEnumIterator;

use wf_core::collab::{
    GenRequest, Generated, GenerationError, LootSource, LootTable, WorldGenerator,
};
use wf_core::map::{Map, Pos, Tile};
use wf_core::monster::{Enemy, EnemyId, EnemyKind, Npc, NpcRole};
use wf_core::object::{Item, Slot};
use wf_core::world::{Site, SiteKind};
use wf_core::GameRng;

const TOWN_NAMES: [&str; 4] = ["Millbrook", "Ashford", "Kettlewick", "Dunmere"];
const DUNGEON_NAMES: [&str; 4] = [
    "the Old Barrow",
    "the Sunken Crypt",
    "the Howling Mine",
    "the Black Vault",
];
const NPC_NAMES: [&str; 6] = ["Mara", "Tobin", "Elsa", "Garrick", "Wren", "Osric"];

/// Smallest area the demo will lay out
const MIN_SIDE: usize = 12;

/// Random floor tile not already taken
fn free_floor(map: &Map, rng: &mut GameRng, taken: &[Pos]) -> Option<Pos> {
    let (w, h) = map.dims();
    for _ in 0..200 {
        let pos = Pos::new(rng.int(1, w as i32 - 2), rng.int(1, h as i32 - 2));
        if map.get(pos) == Some(Tile::Floor) && !taken.contains(&pos) {
            return Some(pos);
        }
    }
    None
}

fn check_size(width: usize, height: usize) -> Result<(), GenerationError> {
    if width < MIN_SIDE || height < MIN_SIDE / 2 {
        return Err(GenerationError::InvalidSize(width, height));
    }
    Ok(())
}

/// Generator for the demo world
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoGenerator;

impl WorldGenerator for DemoGenerator {
    fn generate_world(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        let GenRequest {
            rng, width, height, ..
        } = req;
        check_size(width, height)?;

        let mut map = Map::filled(width, height, Tile::Grass);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if rng.chance(0.05) {
                    map.set(Pos::new(x, y), Tile::Water);
                }
            }
        }

        let mid = height as i32 / 2;
        for x in 0..width as i32 {
            map.set(Pos::new(x, mid), Tile::Road);
        }

        let spawn = Pos::new(width as i32 / 2, mid);
        let town = Pos::new(width as i32 / 4, mid);
        let near = Pos::new(width as i32 * 3 / 4, mid);
        let far = Pos::new((near.x + 2).min(width as i32 - 2), (mid / 2).max(1));

        let mut generated = Generated::new(map, spawn);
        let town_name = rng.choose(&TOWN_NAMES).copied().unwrap_or("Millbrook");
        generated
            .sites
            .push(Site::new(town, SiteKind::Settlement, town_name, 1));
        generated.sites.push(Site::new(
            near,
            SiteKind::Dungeon,
            DUNGEON_NAMES[0],
            rng.int(1, 3) as u32,
        ));
        generated.sites.push(Site::new(
            far,
            SiteKind::Dungeon,
            DUNGEON_NAMES[rng.int(1, 3) as usize],
            rng.int(4, 8) as u32,
        ));

        for site in &generated.sites {
            let tile = match site.kind {
                SiteKind::Settlement => Tile::SettlementMarker,
                SiteKind::Dungeon => Tile::DungeonMarker,
            };
            generated.map.set(site.pos, tile);
            // Keep every entrance reachable from the road
            for y in site.pos.y.min(mid)..=site.pos.y.max(mid) {
                let pos = Pos::new(site.pos.x, y);
                if y != site.pos.y && !generated.map.get(pos).is_some_and(|t| t.is_marker()) {
                    generated.map.set(pos, Tile::Road);
                }
            }
        }
        Ok(generated)
    }

    fn generate_settlement(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        let GenRequest {
            rng, width, height, ..
        } = req;
        check_size(width, height)?;

        let mut map = Map::walled_room(width, height);
        let spawn = Pos::new(width as i32 / 2, height as i32 - 2);
        map.set(spawn.offset(0, 1), Tile::Gate);

        // A few one-room houses with a door facing south
        for i in 0..3 {
            let x0 = 2 + i * (width as i32 / 3);
            let y0 = 2;
            for dx in 0..4 {
                for dy in 0..3 {
                    map.set(Pos::new(x0 + dx, y0 + dy), Tile::Wall);
                }
            }
            map.set(Pos::new(x0 + 1, y0 + 2), Tile::Door);
        }

        let mut generated = Generated::new(map, spawn);
        let mut taken = vec![spawn];
        let roles: Vec<NpcRole> = NpcRole::iter().collect();
        for name in NPC_NAMES.iter().take(rng.int(3, 6) as usize) {
            let Some(pos) = free_floor(&generated.map, rng, &taken) else {
                break;
            };
            let role = rng.choose(&roles).copied().unwrap_or(NpcRole::Villager);
            taken.push(pos);
            generated.npcs.push(Npc::new(pos, *name, role));
        }
        Ok(generated)
    }

    fn generate_dungeon(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        let GenRequest {
            rng,
            width,
            height,
            depth,
            ..
        } = req;
        check_size(width, height)?;

        let mut map = Map::walled_room(width, height);
        let spawn = Pos::new(2, height as i32 / 2);
        for y in 1..height as i32 - 1 {
            for x in 1..width as i32 - 1 {
                let pos = Pos::new(x, y);
                if pos.distance(spawn) > 2 && rng.chance(0.08) {
                    map.set(pos, Tile::Wall);
                }
            }
        }
        map.set(spawn, Tile::StairsUp);

        let kinds: Vec<EnemyKind> = EnemyKind::iter().collect();
        let strongest = (depth as usize + 1).min(kinds.len() - 1);
        let mut generated = Generated::new(map, spawn);
        let mut taken = vec![spawn];
        for _ in 0..(2 + depth) {
            let Some(pos) = free_floor(&generated.map, rng, &taken) else {
                break;
            };
            if pos.distance(spawn) < 4 {
                continue;
            }
            let kind = kinds[rng.int(0, strongest as i32) as usize];
            taken.push(pos);
            generated
                .enemies
                .push(Enemy::spawn(EnemyId::NONE, kind, pos, depth));
        }
        Ok(generated)
    }
}

/// Loot for the demo world: coins, the odd potion and a rare weapon
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoLoot;

impl LootTable for DemoLoot {
    fn generate(&mut self, source: LootSource, rng: &mut GameRng) -> Vec<Item> {
        let LootSource::Enemy { kind, level, .. } = source;
        let mut drops = Vec::new();
        if kind != EnemyKind::Rat && rng.chance(0.5) {
            drops.push(Item::gold(rng.int(1, 5 * level as i32 + 5) as u32));
        }
        if rng.chance(0.15) {
            drops.push(Item::potion("healing draught", 5.0));
        }
        if rng.chance(0.08) {
            let item = match kind {
                EnemyKind::Skeleton => Item::shield("cracked buckler", 1.0),
                EnemyKind::Ogre | EnemyKind::Troll => Item::two_handed_weapon("maul", 4.0),
                EnemyKind::Bandit => Item::armor("leather cap", Slot::Head, 1.0),
                _ => Item::weapon("short sword", 2.0),
            };
            drops.push(item);
        }
        drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rng: &mut GameRng, width: usize, height: usize, depth: u32) -> GenRequest<'_> {
        GenRequest {
            rng,
            width,
            height,
            site: None,
            depth,
        }
    }

    #[test]
    fn test_world_has_reachable_sites() {
        let mut rng = GameRng::new(3);
        let world = DemoGenerator.generate_world(request(&mut rng, 48, 24, 1)).unwrap();
        assert!(world.validate().is_ok());
        assert_eq!(world.sites.len(), 3);
        for site in &world.sites {
            assert!(world.map.get(site.pos).is_some_and(|t| t.is_marker()));
        }
    }

    #[test]
    fn test_world_markers_survive_road_carving() {
        for (seed, width) in [(1, 12), (2, 13), (5, 48), (8, 80)] {
            let mut rng = GameRng::new(seed);
            let world = DemoGenerator
                .generate_world(request(&mut rng, width, 24, 1))
                .unwrap();
            let markers = world
                .sites
                .iter()
                .filter(|s| world.map.get(s.pos).is_some_and(|t| t.is_marker()))
                .count();
            assert_eq!(markers, 3, "width {}", width);
            let dungeons: Vec<_> = world
                .sites
                .iter()
                .filter(|s| s.kind == SiteKind::Dungeon)
                .map(|s| s.pos)
                .collect();
            assert_ne!(dungeons[0], dungeons[1]);
        }
    }

    #[test]
    fn test_dungeon_spawns_enemies_away_from_entry() {
        let mut rng = GameRng::new(9);
        let dungeon = DemoGenerator
            .generate_dungeon(request(&mut rng, 48, 24, 4))
            .unwrap();
        assert!(dungeon.validate().is_ok());
        assert!(!dungeon.enemies.is_empty());
        assert!(dungeon.enemies.iter().all(|e| e.pos.distance(dungeon.spawn) >= 4));
        assert!(dungeon.enemies.iter().all(|e| e.level == 4));
    }

    #[test]
    fn test_too_small_is_rejected() {
        let mut rng = GameRng::new(1);
        let err = DemoGenerator
            .generate_settlement(request(&mut rng, 5, 5, 1))
            .unwrap_err();
        assert_eq!(err, GenerationError::InvalidSize(5, 5));
    }

    #[test]
    fn test_same_seed_same_world() {
        let mut a = GameRng::new(77);
        let mut b = GameRng::new(77);
        let wa = DemoGenerator.generate_world(request(&mut a, 40, 20, 1)).unwrap();
        let wb = DemoGenerator.generate_world(request(&mut b, 40, 20, 1)).unwrap();
        assert_eq!(wa, wb);
    }
}
