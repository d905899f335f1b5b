//! Entity table
//!
//! Each entity owns a scene node plus an optional collider and an optional
//! collision handler. The world does not know about the collision registry;
//! registering entities is the engine's job.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Entity;
use crate::foundation::collections::SlotMap;
use crate::physics::{Collidable, Collider, ColliderView};
use crate::scene::{QuadProvider, SceneNode};

/// Shared handle to an entity's collision handler
pub type HandlerRef = Rc<RefCell<dyn Collidable>>;

/// Everything needed to create an entity
///
/// Used both for immediate spawns and for spawns queued from inside a
/// collision callback.
pub struct EntityDesc {
    /// Scene node providing the entity's quad
    pub node: SceneNode,
    /// Optional collider
    pub collider: Option<Collider>,
    /// Optional collision handler
    pub handler: Option<HandlerRef>,
}

impl EntityDesc {
    /// Entity with only a scene node
    pub fn new(node: SceneNode) -> Self {
        Self {
            node,
            collider: None,
            handler: None,
        }
    }

    /// Attach a collider
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Attach a collision handler
    pub fn with_handler(mut self, handler: HandlerRef) -> Self {
        self.handler = Some(handler);
        self
    }
}

impl fmt::Debug for EntityDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDesc")
            .field("node", &self.node)
            .field("collider", &self.collider)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

struct EntityRecord {
    node: SceneNode,
    collider: Option<Collider>,
    handler: Option<HandlerRef>,
}

/// World containing all entities
#[derive(Default)]
pub struct World {
    entities: SlotMap<Entity, EntityRecord>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity from a scene node
    pub fn create_entity(&mut self, node: SceneNode) -> Entity {
        self.entities.insert(EntityRecord {
            node,
            collider: None,
            handler: None,
        })
    }

    /// Create an entity with its collider and handler in one go
    pub fn spawn(&mut self, desc: EntityDesc) -> Entity {
        let EntityDesc { node, collider, handler } = desc;
        let entity = self.create_entity(node);
        if let Some(collider) = collider {
            self.attach_collider(entity, collider);
        }
        if let Some(handler) = handler {
            self.attach_handler(entity, handler);
        }
        entity
    }

    /// Attach (or replace) an entity's collider; returns `false` for dead entities
    pub fn attach_collider(&mut self, entity: Entity, mut collider: Collider) -> bool {
        match self.entities.get_mut(entity) {
            Some(record) => {
                collider.bind_owner(entity);
                record.collider = Some(collider);
                true
            }
            None => false,
        }
    }

    /// Attach (or replace) an entity's collision handler; returns `false` for dead entities
    ///
    /// A replacement is picked up by the next collision step. An entity that
    /// had no handler when it was registered must be registered again.
    pub fn attach_handler(&mut self, entity: Entity, handler: HandlerRef) -> bool {
        match self.entities.get_mut(entity) {
            Some(record) => {
                record.handler = Some(handler);
                true
            }
            None => false,
        }
    }

    /// Remove an entity; returns `false` if it was already gone
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        self.entities.remove(entity).is_some()
    }

    /// Whether the handle still refers to a live entity
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Scene node of an entity
    pub fn node(&self, entity: Entity) -> Option<&SceneNode> {
        self.entities.get(entity).map(|record| &record.node)
    }

    /// Mutable scene node of an entity
    pub fn node_mut(&mut self, entity: Entity) -> Option<&mut SceneNode> {
        self.entities.get_mut(entity).map(|record| &mut record.node)
    }

    /// Collider of an entity
    pub fn collider(&self, entity: Entity) -> Option<&Collider> {
        self.entities.get(entity)?.collider.as_ref()
    }

    /// Collision handler of an entity
    pub fn handler(&self, entity: Entity) -> Option<HandlerRef> {
        self.entities.get(entity)?.handler.clone()
    }

    /// Collider paired with the entity's current quad
    pub fn collider_view(&self, entity: Entity) -> Option<ColliderView<'_>> {
        let record = self.entities.get(entity)?;
        let collider = record.collider.as_ref()?;
        Some(ColliderView::new(collider, record.node.world_quad()))
    }

    /// Iterate over all live entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }
}
