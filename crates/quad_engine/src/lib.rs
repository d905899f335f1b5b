//! # Quad Engine
//!
//! A small 2D engine core built around oriented-quad collision.
//!
//! ## Features
//!
//! - **Box Colliders**: Separating-axis overlap, point containment, penetration depth and swept time of impact for convex quads
//! - **Collision Registry**: Per-frame overlap callbacks with a reentrancy guard
//! - **Deferred Commands**: Scene mutations queued from callbacks and applied after the step
//! - **Movement**: Move-until-blocked and push-out helpers
//! - **Configuration**: TOML and RON config files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quad_engine::prelude::*;
//!
//! struct MyApp {
//!     player: Option<Entity>,
//! }
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let player = engine.spawn(
//!             EntityDesc::new(SceneNode::new(1.0, 1.0)).with_collider(Collider::boxed()),
//!         )?;
//!         self.player = Some(player);
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         if let Some(player) = self.player {
//!             engine.move_entity(player, 2.0 * delta_time, 0.0)?;
//!         }
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default().with_max_frames(120);
//!     let mut app = MyApp { player: None };
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod ecs;
pub mod scene;
pub mod physics;
pub mod debug;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineError};
pub use crate::core::config::EngineConfig;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError,
        core::config::{CollisionConfig, Config},
        foundation::{
            math::{Point2, Vec2},
            time::FrameClock,
        },
        ecs::{World, Entity, EntityDesc},
        scene::{QuadProvider, SceneNode, SceneCommand, CommandQueue},
        physics::{
            Collidable, Collider, CollisionContext, CollisionError, CollisionRegistry,
            Collision, Quad,
        },
    };
}
