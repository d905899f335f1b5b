//! Core engine implementation

use crate::{
    application::Application,
    core::{ConfigError, EngineConfig},
    ecs::{Entity, EntityDesc, World},
    foundation::time::FrameClock,
    physics::{self, Collision, CollisionError, CollisionRegistry},
    scene::{CommandQueue, SceneCommand},
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the entity table, the collision registry and the deferred command
/// queue, and drives them through a fixed frame order:
///
/// 1. `before_step` hook
/// 2. `update` (movement and game logic)
/// 3. collision registry step
/// 4. deferred command flush
/// 5. `after_step` hook
pub struct Engine {
    /// Entities, their scene nodes, colliders and handlers
    pub world: World,

    /// Collision registry
    pub registry: CollisionRegistry,

    /// Mutations postponed until the current step finishes
    pub commands: CommandQueue,

    /// Engine configuration
    config: EngineConfig,

    /// Frame timing
    clock: FrameClock,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        let registry = CollisionRegistry::new(&config.collision);
        let clock = FrameClock::new(config.fixed_timestep);

        Ok(Self {
            world: World::new(),
            registry,
            commands: CommandQueue::new(),
            config,
            clock,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// The loop ends when the application calls [`request_exit`](Self::request_exit)
    /// or after `max_frames` frames.
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::Application(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running && !engine.frame_limit_reached() {
            engine.frame(app)?;
        }

        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({:.2}s simulated)",
            engine.clock.frame_count(),
            engine.clock.simulated_time()
        );
        log::debug!("{}", engine.registry.diagnostics());
        Ok(())
    }

    /// Run a single frame
    pub fn frame<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        app.before_step(self)
            .map_err(|e| EngineError::Application(format!("App before_step: {}", e)))?;

        let delta_time = self.clock.tick();
        app.update(self, delta_time)
            .map_err(|e| EngineError::Application(format!("App update: {}", e)))?;

        // Commands deferred before a failing handler still land this frame
        let stepped = self.registry.step(&self.world, &mut self.commands);
        let flushed = self.commands.flush(&mut self.world, &mut self.registry);
        let dispatched = stepped?;
        flushed?;
        log::trace!(
            "Frame {}: {} collision callbacks",
            self.clock.frame_count(),
            dispatched
        );

        app.after_step(self)
            .map_err(|e| EngineError::Application(format!("App after_step: {}", e)))?;

        Ok(())
    }

    fn frame_limit_reached(&self) -> bool {
        self.config
            .max_frames
            .map_or(false, |max| self.clock.frame_count() >= max)
    }

    /// Create an entity and register it with the collision registry
    pub fn spawn(&mut self, desc: EntityDesc) -> Result<Entity, EngineError> {
        let entity = self.world.spawn(desc);
        self.registry.register(&self.world, entity)?;
        Ok(entity)
    }

    /// Unregister and remove an entity; returns `false` if it was already gone
    pub fn destroy(&mut self, entity: Entity) -> Result<bool, EngineError> {
        self.registry.unregister(entity)?;
        Ok(self.world.destroy_entity(entity))
    }

    /// Queue a mutation for the end of the current frame's step
    pub fn defer(&mut self, command: SceneCommand) {
        self.commands.push(command);
    }

    /// Move an entity by a local displacement, stopping at the first solid collider
    pub fn move_entity(&mut self, entity: Entity, dx: f32, dy: f32) -> Result<Option<Collision>, CollisionError> {
        physics::move_until_blocked(&mut self.world, &self.registry, entity, dx, dy, None)
    }

    /// Request engine shutdown
    pub fn request_exit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get the collision registry
    pub fn registry(&self) -> &CollisionRegistry {
        &self.registry
    }

    /// Get mutable access to the collision registry
    pub fn registry_mut(&mut self) -> &mut CollisionRegistry {
        &mut self.registry
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine initialization failed
    #[error("Engine initialization failed: {0}")]
    Initialization(String),

    /// Collision subsystem error
    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    Application(String),
}
