//! Entity table
//!
//! Entities are generational handles; the [`World`] owns each entity's scene
//! node, its optional collider and its optional collision handler.

pub mod world;
pub mod entity;

pub use world::{World, EntityDesc, HandlerRef};
pub use entity::Entity;
