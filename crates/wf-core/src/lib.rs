//! wf-core: Simulation core for the Wayfarer roguelike
//!
//! Owns the authoritative game state and advances it one resolved action
//! at a time: melee combat, field of view, overworld/settlement/dungeon
//! transitions and per-entrance persistence of visited areas.
//!
//! The crate does no rendering, input handling or content generation.
//! Those are supplied through the traits in [`collab`], each of which has a
//! built-in fallback.

pub mod action;
pub mod collab;
pub mod combat;
pub mod dungeon;
pub mod map;
pub mod monster;
pub mod object;
pub mod player;
pub mod world;

mod consts;
mod gameloop;
mod rng;

pub use consts::*;
pub use gameloop::{AreaState, GameLoopResult, GameSession, GameState};
pub use rng::{GameRng, round_to, round1};
