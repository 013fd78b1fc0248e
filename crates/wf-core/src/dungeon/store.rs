//! Keyed snapshot store
//!
//! Snapshots are keyed by the overworld entrance coordinate, written as the
//! string `"x,y"`. A save replaces whatever was stored under the key.

use core::fmt;
use core::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DungeonSnapshot;
use crate::map::Pos;

/// Malformed entrance key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntranceKeyError {
    #[error("entrance key '{0}' is missing a ',' separator")]
    MissingSeparator(String),
    #[error("invalid coordinate '{1}' in entrance key '{0}'")]
    InvalidCoordinate(String, String),
}

/// Persistence boundary failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Key(#[from] EntranceKeyError),
    #[error("snapshot backend error: {0}")]
    Backend(String),
}

/// Overworld coordinate an area is entered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntranceKey {
    pub x: i32,
    pub y: i32,
}

impl EntranceKey {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Pos> for EntranceKey {
    fn from(pos: Pos) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

impl fmt::Display for EntranceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for EntranceKey {
    type Err = EntranceKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| EntranceKeyError::MissingSeparator(s.to_string()))?;
        let coord = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| EntranceKeyError::InvalidCoordinate(s.to_string(), part.to_string()))
        };
        Ok(Self {
            x: coord(x)?,
            y: coord(y)?,
        })
    }
}

/// Save/load contract for area snapshots
///
/// The engine only needs these operations; a backend may keep snapshots in
/// memory or write them somewhere durable.
pub trait SnapshotStore {
    /// Store a snapshot, replacing any previous one under the key
    fn save(&mut self, key: EntranceKey, snapshot: DungeonSnapshot) -> Result<(), StoreError>;

    /// Copy of the snapshot under the key, if any
    fn load(&self, key: EntranceKey) -> Result<Option<DungeonSnapshot>, StoreError>;

    /// Remove and return the snapshot under the key
    fn remove(&mut self, key: EntranceKey) -> Result<Option<DungeonSnapshot>, StoreError>;

    /// Keys with a stored snapshot
    fn keys(&self) -> Vec<EntranceKey>;

    /// Drop every snapshot
    fn clear(&mut self) -> Result<(), StoreError>;

    fn contains(&self, key: EntranceKey) -> bool {
        self.keys().contains(&key)
    }
}

/// In-memory snapshot store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(with = "entrance_map_serde")]
    snapshots: HashMap<EntranceKey, DungeonSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, key: EntranceKey, snapshot: DungeonSnapshot) -> Result<(), StoreError> {
        tracing::debug!(%key, enemies = snapshot.enemies.len(), "saving snapshot");
        self.snapshots.insert(key, snapshot);
        Ok(())
    }

    fn load(&self, key: EntranceKey) -> Result<Option<DungeonSnapshot>, StoreError> {
        Ok(self.snapshots.get(&key).cloned())
    }

    fn remove(&mut self, key: EntranceKey) -> Result<Option<DungeonSnapshot>, StoreError> {
        Ok(self.snapshots.remove(&key))
    }

    fn keys(&self) -> Vec<EntranceKey> {
        let mut keys: Vec<_> = self.snapshots.keys().copied().collect();
        keys.sort_by_key(|k| (k.y, k.x));
        keys
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.snapshots.clear();
        Ok(())
    }

    fn contains(&self, key: EntranceKey) -> bool {
        self.snapshots.contains_key(&key)
    }
}

/// Serialize the snapshot map with `"x,y"` string keys
mod entrance_map_serde {
    use super::*;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;

    pub fn serialize<S>(
        map: &HashMap<EntranceKey, DungeonSnapshot>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut ser_map = serializer.serialize_map(Some(map.len()))?;
        for (key, snapshot) in map {
            ser_map.serialize_entry(&key.to_string(), snapshot)?;
        }
        ser_map.end()
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<HashMap<EntranceKey, DungeonSnapshot>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct EntranceMapVisitor;

        impl<'de> Visitor<'de> for EntranceMapVisitor {
            type Value = HashMap<EntranceKey, DungeonSnapshot>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map with \"x,y\" string keys")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut map = HashMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, DungeonSnapshot>()? {
                    let key: EntranceKey = key.parse().map_err(de::Error::custom)?;
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(EntranceMapVisitor)
    }
}
