//! Map generation contract

use thiserror::Error;

use crate::map::{Map, Pos};
use crate::monster::{Enemy, Npc};
use crate::rng::GameRng;
use crate::world::Site;

/// Generator could not produce a usable map
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid map size {0}x{1}")]
    InvalidSize(usize, usize),
    #[error("spawn tile {0} is not walkable")]
    BadSpawn(Pos),
    #[error("generator failed: {0}")]
    Failed(String),
}

/// Inputs handed to a generator
///
/// Generators must draw randomness only from `rng`.
pub struct GenRequest<'a> {
    pub rng: &'a mut GameRng,
    pub width: usize,
    pub height: usize,
    /// Site being entered; None for the overworld
    pub site: Option<&'a Site>,
    /// Dungeon depth, 1 outside dungeons
    pub depth: u32,
}

/// A generated area
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub map: Map,
    pub enemies: Vec<Enemy>,
    pub npcs: Vec<Npc>,
    /// Overworld entrances; only read from world generation
    pub sites: Vec<Site>,
    /// Player start in the overworld, or the entry tile that becomes the
    /// exit anchor of a settlement or dungeon
    pub spawn: Pos,
}

impl Generated {
    pub fn new(map: Map, spawn: Pos) -> Self {
        Self {
            map,
            enemies: Vec::new(),
            npcs: Vec::new(),
            sites: Vec::new(),
            spawn,
        }
    }

    /// Reject results the engine cannot play on
    pub fn validate(&self) -> Result<(), GenerationError> {
        let (w, h) = self.map.dims();
        if w == 0 || h == 0 {
            return Err(GenerationError::InvalidSize(w, h));
        }
        if !self.map.is_walkable(self.spawn) {
            return Err(GenerationError::BadSpawn(self.spawn));
        }
        Ok(())
    }
}

/// Procedural generation of the overworld, settlements and dungeons
pub trait WorldGenerator {
    fn generate_world(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError>;

    fn generate_settlement(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError>;

    fn generate_dungeon(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError>;
}

/// Fallback generator: one walled, empty floor
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatGenerator;

impl FlatGenerator {
    /// Walled floor of at least 3x3 with the spawn in the middle
    pub fn flat(width: usize, height: usize) -> Generated {
        let (w, h) = (width.max(3), height.max(3));
        let spawn = Pos::new((w / 2) as i32, (h / 2) as i32);
        Generated::new(Map::walled_room(w, h), spawn)
    }
}

impl WorldGenerator for FlatGenerator {
    fn generate_world(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        Ok(Self::flat(req.width, req.height))
    }

    fn generate_settlement(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        Ok(Self::flat(req.width, req.height))
    }

    fn generate_dungeon(&mut self, req: GenRequest<'_>) -> Result<Generated, GenerationError> {
        Ok(Self::flat(req.width, req.height))
    }
}
