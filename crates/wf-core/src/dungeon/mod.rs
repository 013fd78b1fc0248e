//! Dungeon persistence
//!
//! Per-entrance snapshots of settlements and dungeons, the keyed store that
//! holds them, and the transient floor dressing (decals, corpses) and
//! occupancy index that live alongside the current map.

mod corpse;
mod decal;
mod occupancy;
mod snapshot;
mod store;

pub use corpse::{Corpse, cap_corpses};
pub use decal::{Decal, fade_decals, splatter};
pub use occupancy::{Occupancy, Occupant};
pub use snapshot::DungeonSnapshot;
pub use store::{EntranceKey, EntranceKeyError, MemoryStore, SnapshotStore, StoreError};
