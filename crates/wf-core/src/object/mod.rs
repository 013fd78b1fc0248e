//! Object system
//!
//! Items, their kinds, and equipment wear.

mod item;

pub use item::{Equip, Item, ItemKind, Slot};
