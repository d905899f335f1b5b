//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// A generational handle into the [`World`](super::World) entity table.
    /// Holding an `Entity` never keeps the entity alive: once it is destroyed
    /// the handle simply stops resolving.
    pub struct Entity;
}
