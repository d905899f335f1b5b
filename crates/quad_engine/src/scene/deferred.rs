//! Deferred scene mutations
//!
//! Collision handlers run while the registry is iterating, so anything that
//! would add or remove colliders is recorded here instead and applied once
//! the step has finished.

use std::collections::VecDeque;
use std::fmt;

use log::{debug, trace};

use crate::ecs::{Entity, EntityDesc, World};
use crate::physics::{CollisionError, CollisionRegistry};

/// Closure run against the world and registry after the step
pub type DeferredCall = Box<dyn FnOnce(&mut World, &mut CollisionRegistry) -> Result<(), CollisionError>>;

/// A mutation waiting for the end of the collision step
pub enum SceneCommand {
    /// Create an entity and register it with the collision registry
    Spawn(EntityDesc),
    /// Register an existing entity
    Register(Entity),
    /// Unregister an entity but keep it in the world
    Unregister(Entity),
    /// Unregister and remove an entity
    Destroy(Entity),
    /// Arbitrary mutation
    Call(DeferredCall),
}

impl SceneCommand {
    /// Wrap a closure as a deferred call
    pub fn call<F>(f: F) -> Self
    where
        F: FnOnce(&mut World, &mut CollisionRegistry) -> Result<(), CollisionError> + 'static,
    {
        Self::Call(Box::new(f))
    }

    fn apply(self, world: &mut World, registry: &mut CollisionRegistry) -> Result<(), CollisionError> {
        match self {
            Self::Spawn(desc) => {
                let entity = world.spawn(desc);
                registry.register(world, entity)
            }
            Self::Register(entity) => registry.register(world, entity),
            Self::Unregister(entity) => registry.unregister(entity),
            Self::Destroy(entity) => {
                registry.unregister(entity)?;
                world.destroy_entity(entity);
                Ok(())
            }
            Self::Call(f) => f(world, registry),
        }
    }
}

impl fmt::Debug for SceneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(desc) => f.debug_tuple("Spawn").field(desc).finish(),
            Self::Register(entity) => f.debug_tuple("Register").field(entity).finish(),
            Self::Unregister(entity) => f.debug_tuple("Unregister").field(entity).finish(),
            Self::Destroy(entity) => f.debug_tuple("Destroy").field(entity).finish(),
            Self::Call(_) => f.write_str("Call(..)"),
        }
    }
}

/// FIFO queue of deferred scene mutations
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: VecDeque<SceneCommand>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command
    pub fn push(&mut self, command: SceneCommand) {
        trace!("Deferring {:?}", command);
        self.commands.push_back(command);
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every queued command without applying it
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Apply every queued command in submission order
    ///
    /// Each command is applied exactly once. On error the failing command is
    /// consumed and the rest stay queued for the caller to inspect or clear.
    pub fn flush(&mut self, world: &mut World, registry: &mut CollisionRegistry) -> Result<usize, CollisionError> {
        let mut applied = 0;
        while let Some(command) = self.commands.pop_front() {
            command.apply(world, registry)?;
            applied += 1;
        }
        if applied > 0 {
            debug!("Applied {} deferred scene commands", applied);
        }
        Ok(applied)
    }
}
