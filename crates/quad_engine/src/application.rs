//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::physics::CollisionError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a simulation with the engine. Every frame
/// calls [`before_step`](Self::before_step), [`update`](Self::update), the
/// collision step, the deferred-command flush and then
/// [`after_step`](Self::after_step).
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the engine is initialized. Spawn the initial
    /// entities here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Called at the start of every frame, before movement
    fn before_step(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        Ok(())
    }

    /// Update the application
    ///
    /// Called every frame before the collision step. Move entities here.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Fixed simulation timestep in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Called once the collision step and deferred mutations are done
    fn after_step(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called when the main loop ends.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Collision query or movement failed
    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
