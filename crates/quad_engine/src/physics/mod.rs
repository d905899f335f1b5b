//! Physics module for 2D quad collision detection
//!
//! Geometry lives in [`box_collider`], which works on bare [`Quad`]s. The
//! [`Collider`] capability ties that geometry to an entity, the
//! [`CollisionRegistry`] dispatches per-frame overlap callbacks, and
//! [`movement`] turns sweeps into blocked moves.

pub mod box_collider;
pub mod collider;
pub mod collision;
pub mod collision_system;
pub mod movement;
pub mod quad;

#[cfg(test)]
mod tests;

pub use box_collider::{Contact, Impact, VELOCITY_EPSILON};
pub use collider::{Collider, ColliderShape, ColliderView};
pub use collision::Collision;
pub use collision_system::{Collidable, CollisionContext, CollisionError, CollisionRegistry};
pub use movement::{move_until_blocked, resolve_penetration};
pub use quad::Quad;
