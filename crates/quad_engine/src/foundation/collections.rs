//! Collection types shared across the engine
//!
//! Entity storage uses generational slot maps. Registries that need O(1)
//! membership plus a deterministic iteration order use `indexmap`.

pub use indexmap::{IndexMap, IndexSet};
pub use slotmap::{Key, SlotMap};
