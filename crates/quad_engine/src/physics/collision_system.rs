//! Collision registry
//!
//! Keeps the set of entities whose colliders take part in collision checks
//! and the subset that wants to be told about overlaps. Once per frame
//! [`CollisionRegistry::step`] tests every handler entity against every
//! registered collider and calls [`Collidable::on_collision`] for each hit.
//!
//! Handlers are looked up from the [`World`] at step time, so replacing an
//! entity's handler with [`World::attach_handler`] takes effect on the next
//! step without registering again.
//!
//! Handlers must not mutate the registry while the step runs. They get a
//! [`CollisionContext`] that exposes read-only queries plus a deferred
//! command queue. Direct registration from a handler fails in safe mode; in
//! permissive mode it is postponed until the pass has finished.

use log::{debug, trace, warn};
use thiserror::Error;

use crate::core::CollisionConfig;
use crate::debug::RegistryDiagnostics;
use crate::ecs::{Entity, HandlerRef, World};
use crate::foundation::collections::IndexSet;
use crate::scene::{CommandQueue, SceneCommand};
use super::collision::Collision;

/// Collision subsystem errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollisionError {
    /// Registry mutated while a step is iterating
    #[error("Cannot {operation} a collider while the collision step is running; defer it instead")]
    Reentrant {
        /// The rejected operation
        operation: &'static str,
    },

    /// Entity handle no longer refers to a live entity
    #[error("Unknown entity: {0:?}")]
    UnknownEntity(Entity),

    /// A collision handler failed
    #[error("Collision handler error: {0}")]
    Handler(String),
}

/// Receives overlap notifications from the registry step
pub trait Collidable {
    /// Called once per frame for every registered collider overlapping this entity
    fn on_collision(&mut self, ctx: &mut CollisionContext<'_>, other: Entity) -> Result<(), CollisionError>;
}

#[derive(Debug, Clone, Copy)]
enum PendingOp {
    Register(Entity),
    Unregister(Entity),
}

/// What a collision handler may touch while the step is running
pub struct CollisionContext<'a> {
    entity: Entity,
    world: &'a World,
    registry: &'a CollisionRegistry,
    commands: &'a mut CommandQueue,
    pending: &'a mut Vec<PendingOp>,
}

impl<'a> CollisionContext<'a> {
    /// Entity whose handler is being called
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Read-only world access
    pub fn world(&self) -> &'a World {
        self.world
    }

    /// Read-only registry access
    pub fn registry(&self) -> &'a CollisionRegistry {
        self.registry
    }

    /// Registered colliders currently overlapping this entity
    pub fn current_collisions(&self, include_triggers: bool, include_solid: bool) -> Vec<Entity> {
        self.registry
            .current_collisions(self.world, self.entity, include_triggers, include_solid)
    }

    /// Whether this entity currently overlaps `other`
    pub fn hit_test(&self, other: Entity) -> bool {
        match (self.world.collider_view(self.entity), self.world.collider_view(other)) {
            (Some(this), Some(other)) => this.hit_test(&other),
            _ => false,
        }
    }

    /// Penetration data against `other`, if overlapping
    pub fn collision_info(&self, other: Entity) -> Option<Collision> {
        let this = self.world.collider_view(self.entity)?;
        let other = self.world.collider_view(other)?;
        this.collision_info(&other)
    }

    /// Queue a scene mutation for after the step
    pub fn defer(&mut self, command: SceneCommand) {
        self.commands.push(command);
    }

    /// Register an entity from inside a handler
    ///
    /// Fails with [`CollisionError::Reentrant`] in safe mode. Otherwise the
    /// registration is applied after this pass and the entity is not
    /// checked until the next step.
    pub fn register(&mut self, entity: Entity) -> Result<(), CollisionError> {
        self.reentrant("register")?;
        self.pending.push(PendingOp::Register(entity));
        Ok(())
    }

    /// Unregister an entity from inside a handler
    ///
    /// Same rules as [`register`](Self::register).
    pub fn unregister(&mut self, entity: Entity) -> Result<(), CollisionError> {
        self.reentrant("unregister")?;
        self.pending.push(PendingOp::Unregister(entity));
        Ok(())
    }

    fn reentrant(&self, operation: &'static str) -> Result<(), CollisionError> {
        if self.registry.loop_active {
            return Err(CollisionError::Reentrant { operation });
        }
        warn!(
            "{} of {:?} requested during the collision step; postponing until the pass ends",
            operation, self.entity
        );
        Ok(())
    }
}

/// Registered colliders and collision handlers
pub struct CollisionRegistry {
    /// Entities whose colliders are tested against
    colliders: IndexSet<Entity>,

    /// Entities notified about overlaps
    handlers: IndexSet<Entity>,

    /// True while a safe-mode step is iterating
    loop_active: bool,

    safe_mode: bool,
    triggers_only: bool,
    velocity_epsilon: f32,
}

impl CollisionRegistry {
    /// Create an empty registry
    pub fn new(config: &CollisionConfig) -> Self {
        Self {
            colliders: IndexSet::new(),
            handlers: IndexSet::new(),
            loop_active: false,
            safe_mode: config.safe_mode,
            triggers_only: config.triggers_only,
            velocity_epsilon: config.velocity_epsilon,
        }
    }

    fn guard(&self, operation: &'static str) -> Result<(), CollisionError> {
        if self.loop_active {
            Err(CollisionError::Reentrant { operation })
        } else {
            Ok(())
        }
    }

    /// Register an entity
    ///
    /// A geometric collider joins the collider set and a handler joins the
    /// handler set. Registering twice changes nothing.
    pub fn register(&mut self, world: &World, entity: Entity) -> Result<(), CollisionError> {
        self.guard("register")?;
        if !world.contains(entity) {
            return Err(CollisionError::UnknownEntity(entity));
        }

        let geometric = world.collider(entity).map_or(false, |collider| collider.is_geometric());
        if geometric && self.colliders.insert(entity) {
            debug!("Registered collider for {:?}", entity);
        }
        if world.handler(entity).is_some() && self.handlers.insert(entity) {
            debug!("Registered collision handler for {:?}", entity);
        }
        Ok(())
    }

    /// Remove an entity from both sets
    pub fn unregister(&mut self, entity: Entity) -> Result<(), CollisionError> {
        self.guard("unregister")?;
        let had_collider = self.colliders.swap_remove(&entity);
        let had_handler = self.handlers.swap_remove(&entity);
        if had_collider || had_handler {
            debug!("Unregistered {:?}", entity);
        }
        Ok(())
    }

    /// Whether the entity's collider is registered
    pub fn is_registered(&self, entity: Entity) -> bool {
        self.colliders.contains(&entity)
    }

    /// Whether the entity has a registered handler
    pub fn has_handler(&self, entity: Entity) -> bool {
        self.handlers.contains(&entity)
    }

    /// Registered collider entities, in registration order
    pub fn colliders(&self) -> impl DoubleEndedIterator<Item = Entity> + '_ {
        self.colliders.iter().copied()
    }

    /// Number of registered colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// True while a safe-mode step is iterating
    pub fn is_loop_active(&self) -> bool {
        self.loop_active
    }

    /// Whether direct mutation during a step is rejected
    pub fn safe_mode(&self) -> bool {
        self.safe_mode
    }

    /// Switch between strict and permissive reentrancy handling
    pub fn set_safe_mode(&mut self, enabled: bool) {
        self.safe_mode = enabled;
    }

    /// Whether the step only reports trigger colliders
    pub fn triggers_only(&self) -> bool {
        self.triggers_only
    }

    /// Restrict the step to trigger colliders
    pub fn set_triggers_only(&mut self, enabled: bool) {
        self.triggers_only = enabled;
    }

    /// Threshold below which a projected sweep velocity counts as zero
    pub fn velocity_epsilon(&self) -> f32 {
        self.velocity_epsilon
    }

    /// Forget every registration
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.handlers.clear();
    }

    /// Registered colliders overlapping `entity`
    ///
    /// Independent of the step phase and safe to call from handlers.
    pub fn current_collisions(
        &self,
        world: &World,
        entity: Entity,
        include_triggers: bool,
        include_solid: bool,
    ) -> Vec<Entity> {
        let Some(this) = world.collider_view(entity) else {
            return Vec::new();
        };

        self.colliders
            .iter()
            .copied()
            .filter(|&other| other != entity)
            .filter_map(|other| world.collider_view(other))
            .filter(|view| {
                if view.is_trigger() {
                    include_triggers
                } else {
                    include_solid
                }
            })
            .filter(|view| this.hit_test(view))
            .map(|view| view.entity())
            .collect()
    }

    /// Run one collision pass, returning the number of dispatched callbacks
    ///
    /// Entities destroyed without unregistering are dropped first. Both sets
    /// are then snapshotted and walked back to front. Handler errors abort
    /// the pass. Every postponed permissive-mode mutation is still applied
    /// in submission order; the handler error wins over the first failed
    /// mutation when both occur.
    pub fn step(&mut self, world: &World, commands: &mut CommandQueue) -> Result<usize, CollisionError> {
        self.purge_stale(world);

        let handlers: Vec<(Entity, HandlerRef)> = self
            .handlers
            .iter()
            .filter_map(|&entity| world.handler(entity).map(|handler| (entity, handler)))
            .collect();
        let colliders: Vec<Entity> = self.colliders.iter().copied().collect();

        self.loop_active = self.safe_mode;
        let mut pending = Vec::new();
        let result = self.dispatch(world, commands, &handlers, &colliders, &mut pending);
        self.loop_active = false;

        let mut pending_error = None;
        for op in pending {
            let applied = match op {
                PendingOp::Register(entity) => self.register(world, entity),
                PendingOp::Unregister(entity) => self.unregister(entity),
            };
            if let Err(err) = applied {
                warn!("Postponed {:?} failed: {}", op, err);
                pending_error.get_or_insert(err);
            }
        }

        match (result, pending_error) {
            (Err(err), _) | (Ok(_), Some(err)) => Err(err),
            (Ok(dispatched), None) => Ok(dispatched),
        }
    }

    fn purge_stale(&mut self, world: &World) {
        let before = self.colliders.len() + self.handlers.len();
        self.colliders.retain(|&entity| world.contains(entity));
        self.handlers.retain(|&entity| world.contains(entity));
        let purged = before - self.colliders.len() - self.handlers.len();
        if purged > 0 {
            debug!("Dropped {} registrations of destroyed entities", purged);
        }
    }

    fn dispatch(
        &self,
        world: &World,
        commands: &mut CommandQueue,
        handlers: &[(Entity, HandlerRef)],
        colliders: &[Entity],
        pending: &mut Vec<PendingOp>,
    ) -> Result<usize, CollisionError> {
        let mut dispatched = 0;

        for (entity, handler) in handlers.iter().rev() {
            let Some(this) = world.collider_view(*entity) else {
                continue;
            };

            for &other in colliders.iter().rev() {
                if other == *entity {
                    continue;
                }
                let Some(other_view) = world.collider_view(other) else {
                    continue;
                };
                if !(other_view.is_trigger() || !self.triggers_only) {
                    continue;
                }
                if !this.hit_test(&other_view) {
                    continue;
                }

                trace!("Collision callback {:?} -> {:?}", entity, other);
                let mut handler = handler.try_borrow_mut().map_err(|_| {
                    CollisionError::Handler(format!("handler for {:?} is already borrowed", entity))
                })?;
                let mut ctx = CollisionContext {
                    entity: *entity,
                    world,
                    registry: self,
                    commands: &mut *commands,
                    pending: &mut *pending,
                };
                handler.on_collision(&mut ctx, other)?;
                dispatched += 1;
            }
        }

        Ok(dispatched)
    }

    /// Counts and flags for logging
    pub fn snapshot(&self) -> RegistryDiagnostics {
        RegistryDiagnostics {
            colliders: self.colliders.len(),
            handlers: self.handlers.len(),
            loop_active: self.loop_active,
            safe_mode: self.safe_mode,
            triggers_only: self.triggers_only,
        }
    }

    /// Human-readable summary of the registry
    pub fn diagnostics(&self) -> String {
        self.snapshot().to_string()
    }
}
